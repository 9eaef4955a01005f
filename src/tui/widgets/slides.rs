//! Slide text list.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::style::Styles;

/// Renders `Slide N: content` items, `Slide N:` in bold.
pub fn render_slides(frame: &mut Frame, area: Rect, lines: &[String], title: &str, scroll: usize) {
    let items: Vec<Line> = lines
        .iter()
        .map(|line| match line.split_once(": ") {
            Some((label, content)) => Line::from(vec![
                Span::raw("• "),
                Span::styled(format!("{label}:"), Styles::help_key()),
                Span::raw(format!(" {content}")),
            ]),
            None => Line::from(format!("• {line}")),
        })
        .collect();

    let paragraph = Paragraph::new(items)
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .style(Styles::default()),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(paragraph, area);
}

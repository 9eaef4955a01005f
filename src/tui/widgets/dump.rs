//! Raw payload dump (Dashboard view).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::style::Styles;

pub fn render_dump(frame: &mut Frame, area: Rect, lines: &[String], title: &str, scroll: usize) {
    let text: Vec<Line> = lines.iter().map(|l| Line::from(l.as_str())).collect();
    let position = if lines.is_empty() {
        String::new()
    } else {
        format!(" {}/{} ", scroll + 1, lines.len())
    };

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title(format!(" {title} "))
                .title_bottom(Line::from(position).right_aligned())
                .borders(Borders::ALL)
                .style(Styles::default()),
        )
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(paragraph, area);
}

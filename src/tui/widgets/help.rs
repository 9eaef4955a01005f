//! Key binding help popup.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::quit_confirm::centered;
use crate::tui::style::Styles;

const BINDINGS: &[(&str, &str)] = &[
    ("1 / 2", "Open / (tables) or /dashboard (raw payload)"),
    ("Tab / Shift+Tab", "Focus next / previous section"),
    ("→ n", "Next page of the focused table"),
    ("← p", "Previous page of the focused table"),
    ("/", "Filter the focused table (Enter keeps, Esc clears)"),
    ("↑ ↓ PgUp PgDn", "Scroll slide text or the raw payload"),
    ("Home / End", "Jump to top / bottom"),
    ("?", "Toggle this help"),
    ("q", "Quit (asks for confirmation)"),
    ("Ctrl+C", "Quit immediately"),
];

/// Renders the help popup. `scroll` is clamped to the content.
pub fn render_help(frame: &mut Frame, area: Rect, scroll: &mut usize) {
    let popup = centered(
        area,
        percent(area.width, 60).clamp(40, 80),
        percent(area.height, 80).clamp(8, 18),
    );
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Styles::button());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    let content: Vec<Line> = BINDINGS
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!("{keys:>16}  "), Styles::help_key()),
                Span::raw(*what),
            ])
        })
        .collect();

    let max_scroll = content.len().saturating_sub(chunks[0].height as usize);
    *scroll = (*scroll).min(max_scroll);

    frame.render_widget(
        Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .scroll((*scroll as u16, 0))
            .style(Styles::default()),
        chunks[0],
    );

    let footer = Line::from(vec![
        Span::styled("Press ", Styles::help()),
        Span::styled("?", Styles::help_key()),
        Span::styled(" or ", Styles::help()),
        Span::styled("Esc", Styles::help_key()),
        Span::styled(" to close", Styles::help()),
    ]);
    frame.render_widget(Paragraph::new(footer), chunks[1]);
}

fn percent(len: u16, pct: u32) -> u16 {
    (u32::from(len) * pct / 100) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn percent_does_not_overflow_wide_terminals() {
        assert_eq!(percent(2000, 60), 1200);
        assert_eq!(percent(u16::MAX, 80), 52428);
    }

    #[test]
    fn renders_on_very_wide_terminal() {
        let mut terminal = Terminal::new(TestBackend::new(1200, 20)).unwrap();
        let mut scroll = 0;
        terminal
            .draw(|frame| render_help(frame, frame.area(), &mut scroll))
            .unwrap();
        assert_eq!(scroll, 0);
    }
}

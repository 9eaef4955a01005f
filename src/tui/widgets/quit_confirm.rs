//! Quit confirmation popup.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::Styles;

pub fn render_quit_confirm(frame: &mut Frame, area: Rect) {
    let popup = centered(area, (area.width / 2).clamp(36, 56), 7);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Exit datadash ")
        .borders(Borders::ALL)
        .border_style(Styles::button());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let option = |keys: [&'static str; 2], what: &'static str| {
        Line::from(vec![
            Span::styled(keys[0], Styles::help_key()),
            Span::styled(" or ", Styles::dim()),
            Span::styled(keys[1], Styles::help_key()),
            Span::styled(what, Styles::dim()),
        ])
    };
    let content = vec![
        Line::from("Are you sure you want to quit?"),
        Line::from(""),
        option(["Enter", "q"], " → quit"),
        option(["Esc", "n"], " → cancel"),
    ];
    frame.render_widget(
        Paragraph::new(content)
            .alignment(Alignment::Center)
            .style(Styles::default()),
        inner,
    );
}

/// Rect of `width` x `height` centered in `area`, clipped to it.
pub(super) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

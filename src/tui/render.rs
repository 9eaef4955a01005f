//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::{AppState, InputMode, MountedView, PopupState, Route};
use super::style::Styles;
use super::widgets::{
    render_app_view, render_dump, render_header, render_help, render_quit_confirm,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(3),    // Content
        Constraint::Length(1), // Key hints
    ])
    .split(area);

    render_header(frame, chunks[0], state);

    match &state.view {
        Some(view) => render_view(frame, chunks[1], view, state.input_mode),
        None => frame.render_widget(Block::default().borders(Borders::ALL), chunks[1]),
    }

    render_hints(frame, chunks[2], state);

    // Popups overlay everything.
    match &mut state.popup {
        PopupState::Help { scroll } => render_help(frame, area, scroll),
        PopupState::QuitConfirm => render_quit_confirm(frame, area),
        PopupState::None => {}
    }
}

fn render_view(frame: &mut Frame, area: Rect, view: &MountedView, mode: InputMode) {
    if view.is_loading() {
        let block = Block::default()
            .title(format!(" {} ", view.route.title()))
            .borders(Borders::ALL)
            .style(Styles::default());
        frame.render_widget(
            Paragraph::new("Loading...")
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    match view.route {
        Route::App => render_app_view(frame, area, view, mode == InputMode::Filter),
        Route::Dashboard => render_dump(frame, area, &view.dump, view.route.title(), view.scroll),
    }
}

fn render_hints(frame: &mut Frame, area: Rect, state: &AppState) {
    let hints: &[(&str, &str)] = match (state.input_mode, state.current_route()) {
        (InputMode::Filter, _) => &[("Enter", "keep"), ("Esc", "clear")],
        (_, Some(Route::Dashboard)) => &[
            ("1", "app"),
            ("↑↓", "scroll"),
            ("?", "help"),
            ("q", "quit"),
        ],
        _ => &[
            ("2", "dashboard"),
            ("Tab", "section"),
            ("←→", "page"),
            ("/", "filter"),
            ("?", "help"),
            ("q", "quit"),
        ],
    };

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, what)| {
            [
                Span::styled(format!(" {key}"), Styles::help_key()),
                Span::styled(format!(" {what} "), Styles::help()),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

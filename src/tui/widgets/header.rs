//! Header bar: app name, route tabs, source, and status.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::{AppState, InputMode, Route};
use crate::tui::style::Styles;

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(10), // Name
        Constraint::Length(30), // Routes
        Constraint::Min(10),    // Source
        Constraint::Length(36), // Status/Filter/Loaded
    ])
    .split(area);

    frame.render_widget(
        Paragraph::new(" datadash").style(Styles::header()),
        chunks[0],
    );

    let current = state.current_route();
    let tabs: Vec<Span> = Route::all()
        .iter()
        .enumerate()
        .flat_map(|(i, route)| {
            let style = if Some(*route) == current {
                Styles::tab_active()
            } else {
                Styles::tab_inactive()
            };
            vec![
                Span::styled(format!(" {}:", i + 1), Styles::dim()),
                Span::styled(format!("{} {} ", route.path(), route.name()), style),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(tabs)).style(Styles::header()),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new(format!(" {}", state.source_label)).style(Styles::header()),
        chunks[2],
    );

    frame.render_widget(
        Paragraph::new(status_line(state)).style(Styles::header()),
        chunks[3],
    );
}

fn status_line(state: &AppState) -> Line<'static> {
    if let Some(msg) = &state.status_message {
        return Line::from(Span::styled(msg.clone(), Styles::status()));
    }
    if state.input_mode == InputMode::Filter {
        let filter = state.current_filter().unwrap_or_default();
        return Line::from(vec![
            Span::raw("Search: "),
            Span::styled(format!("{filter}█"), Styles::filter_input()),
        ]);
    }
    if let Some(filter) = state.current_filter() {
        return Line::from(Span::raw(format!("/{filter}")));
    }
    match &state.view {
        Some(view) if view.is_loading() => Line::from(Span::raw("loading")),
        Some(view) => match view.loaded_at {
            Some(at) => Line::from(Span::raw(format!("loaded {}", at.format("%H:%M:%S")))),
            None => Line::default(),
        },
        None => Line::default(),
    }
}

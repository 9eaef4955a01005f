//! App view: section sidebar plus the focused panel.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::tui::state::MountedView;
use crate::tui::style::Styles;
use crate::tui::widgets::{render_records, render_slides};
use crate::view::sections::{Panel, PanelBody};

const SIDEBAR_WIDTH: u16 = 38;

pub fn render_app_view(frame: &mut Frame, area: Rect, view: &MountedView, editing: bool) {
    let chunks = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(area);

    render_sidebar(frame, chunks[0], view);

    let Some(panel) = view.focused_panel() else {
        return;
    };
    let title = panel.title();
    match &panel.body {
        PanelBody::Table(table) => render_records(frame, chunks[1], table, &title, editing),
        PanelBody::Slides(lines) => render_slides(frame, chunks[1], lines, &title, view.scroll),
        PanelBody::Placeholder(text) => {
            let block = Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .style(Styles::default());
            frame.render_widget(Paragraph::new(*text).block(block), chunks[1]);
        }
    }
}

/// Lists every panel under its section heading. Headings are printed once
/// per section; the focused panel is highlighted.
fn render_sidebar(frame: &mut Frame, area: Rect, view: &MountedView) {
    let mut items: Vec<ListItem> = Vec::new();
    let mut selected = None;
    let mut last_heading = None;

    for (idx, panel) in view.panels.iter().enumerate() {
        if last_heading != Some(panel.heading()) {
            last_heading = Some(panel.heading());
            items.push(ListItem::new(Line::from(Span::styled(
                panel.heading(),
                Styles::heading(),
            ))));
        }
        if idx == view.focused {
            selected = Some(items.len());
        }
        items.push(ListItem::new(Line::from(vec![
            Span::raw("  "),
            entry_span(panel),
        ])));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" {} ", view.route.title()))
                .borders(Borders::ALL)
                .style(Styles::default()),
        )
        .highlight_style(Styles::focused());
    let mut list_state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn entry_span(panel: &Panel) -> Span<'static> {
    let plural = |n: usize, word: &str| {
        if n == 1 {
            format!("1 {word}")
        } else {
            format!("{n} {word}s")
        }
    };

    match &panel.body {
        PanelBody::Placeholder(text) => Span::styled(*text, Styles::dim()),
        PanelBody::Slides(lines) => Span::raw(plural(lines.len(), "slide")),
        PanelBody::Table(table) => {
            let rows = plural(table.total_rows(), "row");
            match &panel.group {
                Some(group) => Span::raw(format!("{group} ({rows})")),
                None => Span::raw(rows),
            }
        }
    }
}

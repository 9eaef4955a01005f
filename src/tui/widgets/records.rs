//! Records table widget: search line, one page of rows, pager controls.
//! Thin TUI wrapper over [`crate::view::table::build_table_view`].

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::tui::style::Styles;
use crate::view::common::PagerModel;
use crate::view::table::{TableView, build_table_view};

/// Shown for a table without records.
pub const NO_DATA: &str = "No data available";

pub fn render_records(frame: &mut Frame, area: Rect, table: &TableView, title: &str, editing: bool) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .style(Styles::default());

    if table.is_empty() {
        frame.render_widget(Paragraph::new(NO_DATA).block(block), area);
        return;
    }

    let vm = build_table_view(table, title.to_string());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // Search
        Constraint::Min(1),    // Rows
        Constraint::Length(1), // Pager
    ])
    .split(inner);

    frame.render_widget(Paragraph::new(search_line(&vm.filter, editing)), chunks[0]);

    let header = Row::new(
        vm.headers
            .iter()
            .map(|h| Span::styled(h.clone(), Styles::table_header())),
    )
    .style(Styles::table_header())
    .height(1);

    let rows: Vec<Row> = vm
        .rows
        .iter()
        .map(|cells| Row::new(cells.iter().map(|c| Span::raw(c.clone()))).height(1))
        .collect();

    let mut constraints: Vec<Constraint> =
        vm.widths.iter().map(|&w| Constraint::Length(w)).collect();
    constraints.push(Constraint::Fill(1));

    let rows_widget = Table::new(rows, constraints)
        .header(header)
        .column_spacing(1)
        .style(Styles::default());
    frame.render_widget(rows_widget, chunks[1]);

    frame.render_widget(
        Paragraph::new(pager_line(&vm.pager)).alignment(Alignment::Center),
        chunks[2],
    );
}

fn search_line(filter: &str, editing: bool) -> Line<'static> {
    let label = Span::styled("Search: ", Styles::help_key());
    if editing {
        Line::from(vec![
            label,
            Span::styled(format!("{filter}█"), Styles::filter_input()),
        ])
    } else if filter.is_empty() {
        Line::from(vec![label, Span::styled("press / to filter", Styles::dim())])
    } else {
        Line::from(vec![label, Span::raw(filter.to_string())])
    }
}

fn pager_line(pager: &PagerModel) -> Line<'static> {
    let button = |text: &'static str, enabled: bool| {
        let style = if enabled {
            Styles::button()
        } else {
            Styles::button_disabled()
        };
        Span::styled(text, style)
    };

    let mut spans = vec![
        button("[ Previous ]", pager.can_previous),
        Span::raw(format!("  {}  ", pager.label())),
        button("[ Next ]", pager.can_next),
    ];
    if pager.matching_rows != pager.total_rows {
        spans.push(Span::styled(
            format!("  {} of {} rows", pager.matching_rows, pager.total_rows),
            Styles::dim(),
        ));
    } else {
        spans.push(Span::styled(
            format!("  {} rows", pager.total_rows),
            Styles::dim(),
        ));
    }
    Line::from(spans)
}

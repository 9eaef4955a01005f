//! Generic record table: column inference, free-text filter, pagination.
//!
//! `TableView` owns the per-table state (filter string, page index) together
//! with the stringified rows. `build_table_view` turns it into a
//! [`TableViewModel`] for the current page.

use std::collections::HashSet;

use crate::payload::{Record, display_value};
use crate::view::common::{PagerModel, TableViewModel, column_widths};

/// Rows per page.
pub const PAGE_SIZE: usize = 10;

/// How the column set of a table is derived from its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColumnPolicy {
    /// Keys of the first record, in its order. Extra keys of later records
    /// are not shown.
    #[default]
    #[value(name = "first")]
    FirstRecord,
    /// Union of keys across all records, in first-seen order.
    Union,
}

/// Infers the column set of `records` under `policy`.
pub fn infer_columns(records: &[Record], policy: ColumnPolicy) -> Vec<String> {
    match policy {
        ColumnPolicy::FirstRecord => records
            .first()
            .map(|r| r.keys().cloned().collect())
            .unwrap_or_default(),
        ColumnPolicy::Union => {
            let mut seen = HashSet::new();
            let mut columns = Vec::new();
            for key in records.iter().flat_map(|r| r.keys()) {
                if seen.insert(key.as_str()) {
                    columns.push(key.clone());
                }
            }
            columns
        }
    }
}

#[derive(Debug, Clone)]
struct TableRow {
    cells: Vec<String>,
    /// Lowercased cells for case-insensitive matching.
    folded: Vec<String>,
}

impl TableRow {
    fn from_record(record: &Record, columns: &[String]) -> Self {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| record.get(c).map(display_value).unwrap_or_default())
            .collect();
        let folded = cells.iter().map(|c| c.to_lowercase()).collect();
        Self { cells, folded }
    }

    fn matches(&self, folded_filter: &str) -> bool {
        folded_filter.is_empty() || self.folded.iter().any(|c| c.contains(folded_filter))
    }
}

/// State of one rendered table.
///
/// The filter matches the displayed cell text, so a `null` field (shown
/// empty) never matches the text `null`.
#[derive(Debug, Clone)]
pub struct TableView {
    columns: Vec<String>,
    rows: Vec<TableRow>,
    filter: String,
    page_index: usize,
    /// Indices into `rows` matching the current filter.
    matching: Vec<usize>,
}

impl TableView {
    pub fn new(records: &[Record], policy: ColumnPolicy) -> Self {
        let columns = infer_columns(records, policy);
        let rows: Vec<TableRow> = records
            .iter()
            .map(|r| TableRow::from_record(r, &columns))
            .collect();
        let matching = (0..rows.len()).collect();
        Self {
            columns,
            rows,
            filter: String::new(),
            page_index: 0,
            matching,
        }
    }

    /// True when there are no records at all (filter does not matter).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Replaces the filter and returns to the first page.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.refilter();
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.refilter();
    }

    pub fn pop_filter_char(&mut self) {
        if self.filter.pop().is_some() {
            self.refilter();
        }
    }

    fn refilter(&mut self) {
        let folded = self.filter.to_lowercase();
        self.matching = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.matches(&folded))
            .map(|(i, _)| i)
            .collect();
        self.page_index = 0;
    }

    /// Number of rows passing the filter.
    pub fn filtered_len(&self) -> usize {
        self.matching.len()
    }

    /// `ceil(filtered_len / PAGE_SIZE)`; zero when nothing matches.
    pub fn page_count(&self) -> usize {
        self.filtered_len().div_ceil(PAGE_SIZE)
    }

    /// Zero-based index of the current page.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    /// Moves to the previous page. Returns `false` when already on the first.
    pub fn previous_page(&mut self) -> bool {
        if !self.can_previous_page() {
            return false;
        }
        self.page_index -= 1;
        true
    }

    /// Moves to the next page. Returns `false` when already on the last.
    pub fn next_page(&mut self) -> bool {
        if !self.can_next_page() {
            return false;
        }
        self.page_index += 1;
        true
    }

    /// Cells of the rows on the current page.
    pub fn page_rows(&self) -> Vec<&[String]> {
        self.matching
            .iter()
            .skip(self.page_index * PAGE_SIZE)
            .take(PAGE_SIZE)
            .map(|&i| self.rows[i].cells.as_slice())
            .collect()
    }
}

/// Builds the view model for the current page of `table`.
pub fn build_table_view(table: &TableView, title: String) -> TableViewModel {
    let widths = column_widths(
        &table.columns,
        table.rows.iter().map(|r| r.cells.as_slice()),
    );
    let rows = table
        .page_rows()
        .into_iter()
        .map(|cells| cells.to_vec())
        .collect();

    TableViewModel {
        title,
        headers: table.columns.clone(),
        widths,
        rows,
        filter: table.filter.clone(),
        pager: PagerModel {
            page: table.page_index + 1,
            page_count: table.page_count(),
            can_previous: table.can_previous_page(),
            can_next: table.can_next_page(),
            matching_rows: table.filtered_len(),
            total_rows: table.total_rows(),
        },
    }
}

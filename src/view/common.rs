//! UI-agnostic view model types.
//!
//! These carry presentation data without depending on a rendering framework.
//! The TUI maps them to ratatui widgets.

/// Widest a column is allowed to grow, in terminal cells.
pub const MAX_COLUMN_WIDTH: u16 = 40;

/// State of the Previous / Next controls under a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerModel {
    /// 1-indexed current page.
    pub page: usize,
    pub page_count: usize,
    pub can_previous: bool,
    pub can_next: bool,
    pub matching_rows: usize,
    pub total_rows: usize,
}

impl PagerModel {
    /// `Page N` label; `N` is always at least 1.
    pub fn label(&self) -> String {
        format!("Page {}", self.page)
    }
}

/// One page of a table, ready to be rendered by any frontend.
#[derive(Debug, Clone)]
pub struct TableViewModel {
    pub title: String,
    pub headers: Vec<String>,
    pub widths: Vec<u16>,
    pub rows: Vec<Vec<String>>,
    pub filter: String,
    pub pager: PagerModel,
}

/// Column widths fitting the header and every cell, capped at
/// [`MAX_COLUMN_WIDTH`].
pub fn column_widths<'a>(
    headers: &[String],
    rows: impl Iterator<Item = &'a [String]>,
) -> Vec<u16> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths
        .into_iter()
        .map(|w| w.clamp(1, MAX_COLUMN_WIDTH as usize) as u16)
        .collect()
}

//! UI-agnostic view models.
//!
//! Each sub-module builds presentation data from the payload and per-view
//! state. The TUI maps it to ratatui widgets for rendering.

pub mod common;
pub mod dump;
pub mod sections;
pub mod table;

//! datadash - terminal viewer for the processed-data API.
//!
//! The library holds everything behind the `datadash` binary:
//! - [`payload`] - typed view of the aggregated payload
//! - [`provider`] - HTTP and file sources for the payload
//! - [`view`] - UI-agnostic table, section, and dump models
//! - [`tui`] - the interactive terminal UI

pub mod payload;
pub mod provider;
pub mod tui;
pub mod view;

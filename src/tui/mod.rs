//! Terminal User Interface for datadash.
//!
//! Two routes share one payload source: `/` lays the payload sections out as
//! paginated, filterable tables, `/dashboard` shows the raw payload. Every
//! route entry mounts a fresh view that fetches the payload once.

mod app;
mod event;
mod input;
mod render;
mod state;
mod style;
mod widgets;

pub use app::App;
pub use state::{AppState, Route};

//! TUI widgets for datadash.

mod dump;
mod header;
mod help;
mod quit_confirm;
mod records;
mod sections;
mod slides;

pub use dump::render_dump;
pub use header::render_header;
pub use help::render_help;
pub use quit_confirm::render_quit_confirm;
pub use records::{NO_DATA, render_records};
pub use sections::render_app_view;
pub use slides::render_slides;

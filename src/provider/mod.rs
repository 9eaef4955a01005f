//! Payload source abstraction.
//!
//! The `PayloadSource` trait lets the TUI work with different origins of the
//! same payload document through one interface:
//! - `HttpSource`: GET against the backend endpoint
//! - `FileSource`: a saved response on disk

mod file;
mod http;

pub use file::FileSource;
pub use http::{DEFAULT_API_URL, HttpSource};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::payload::Payload;

/// Errors that can occur while fetching the payload.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connect, DNS, body read).
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },
    /// Server answered with a non-2xx status.
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    /// Response body or file is not valid JSON.
    #[error("invalid JSON from {origin}: {message}")]
    Parse { origin: String, message: String },
    /// Reading a local payload file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Where the payload comes from.
///
/// `fetch` is called once per view mount, from a worker thread, hence
/// `Send + Sync`.
pub trait PayloadSource: Send + Sync {
    /// Retrieves the raw payload document.
    fn fetch(&self) -> Result<Value, FetchError>;

    /// Human-readable origin for the header and logs.
    fn describe(&self) -> String;
}

/// Fetches and decodes the payload, logging and swallowing any failure.
///
/// `None` means "nothing to show"; callers cannot tell a failure from an
/// empty response apart, and are not meant to.
pub fn fetch_payload(source: &dyn PayloadSource) -> Option<Payload> {
    match source.fetch() {
        Ok(Value::Null) => {
            debug!(origin = %source.describe(), "payload is null");
            None
        }
        Ok(value) => {
            let payload = Payload::from_value(value);
            debug!(origin = %source.describe(), sections = %payload.summary(), "payload fetched");
            Some(payload)
        }
        Err(e) => {
            error!(origin = %source.describe(), error = %e, "payload fetch failed");
            None
        }
    }
}

//! HTTP payload source.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use super::{FetchError, PayloadSource};

/// Endpoint served by the processing backend.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api/data";

/// Issues a single `GET` to a fixed URL. No query, body, auth, retry or
/// request timeout. Connects directly, ignoring proxy environment variables.
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self, FetchError> {
        let url = url.into();
        let client = Client::builder()
            .timeout(None::<Duration>)
            .no_proxy()
            .build()
            .map_err(|e| FetchError::Http {
                url: url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PayloadSource for HttpSource {
    fn fetch(&self) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| FetchError::Http {
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        debug!(url = %self.url, status = status.as_u16(), "response received");
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        response.json().map_err(|e| {
            if e.is_decode() {
                FetchError::Parse {
                    origin: self.url.clone(),
                    message: e.to_string(),
                }
            } else {
                FetchError::Http {
                    url: self.url.clone(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn describe(&self) -> String {
        self.url().to_string()
    }
}

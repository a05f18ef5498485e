//! Error types used by the crate.

use thiserror::Error;
use turterra_types::error::TypesError;

/// Turterra error type.
#[derive(Debug, Error)]
pub enum MapError {
    /// Request could not be completed (connection, timeout, body read).
    #[error("network failure: {0}")]
    Network(String),
    /// Server answered with a non-success status.
    #[error("request to {url} failed with status {status}")]
    Status {
        /// Requested url.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// Response or stored document does not have the expected shape.
    #[error("unexpected data: {0}")]
    DataShape(String),
    /// Url could not be parsed or extended.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// Item not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Error of the data model.
    #[error(transparent)]
    Types(#[from] TypesError),
}

impl From<reqwest::Error> for MapError {
    fn from(value: reqwest::Error) -> Self {
        match value.status() {
            Some(status) => Self::Status {
                url: value.url().map(|u| u.to_string()).unwrap_or_default(),
                status: status.as_u16(),
            },
            None => Self::Network(value.to_string()),
        }
    }
}

impl From<serde_json::Error> for MapError {
    fn from(value: serde_json::Error) -> Self {
        Self::DataShape(value.to_string())
    }
}

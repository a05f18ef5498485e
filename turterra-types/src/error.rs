//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum TypesError {
    /// Input is not a valid JSON document of the expected shape.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    /// Value conversion error.
    #[error("invalid input value: {0}")]
    Conversion(String),
}

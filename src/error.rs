//! Error kinds surfaced to the user via the transient banner.
//!
//! None of these are fatal: form state is always left intact so the user
//! can fix the input and retry.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// Missing required input. Handled locally, no network call is made.
    #[error("{0}")]
    Validation(String),

    /// Malformed JSON in one of the batch text areas.
    #[error("Invalid JSON format: {0}")]
    Parse(String),

    /// Non-2xx HTTP response, message extracted from the server payload
    /// when available.
    #[error("{0}")]
    Request(String),

    /// Network or local IO failure, raw error text.
    #[error("{0}")]
    Transport(String),

    /// CSV export requested with nothing rendered yet.
    #[error("No results to export")]
    EmptyExport,

    /// CSV export failed while writing the file.
    #[error("Export failed: {0}")]
    Export(String),
}

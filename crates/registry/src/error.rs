//! Error types for registry operations.

use thiserror::Error;

/// Errors that can occur reading or writing the backing store.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("spreadsheet request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("spreadsheet API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("sheet has no '{0}' column")]
    MissingColumn(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

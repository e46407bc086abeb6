//! Domain Errors
//!
//! Failure modes of the POI store and of the backend client port.

use thiserror::Error;

/// Errors raised by POI store operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoiError {
    /// A required field was empty or a value was out of range.
    /// The operation was a no-op.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An entry with this id already exists.
    #[error("duplicate POI id: {0}")]
    DuplicateId(String),
}

/// Errors returned by a backend client.
///
/// `Display` is the short message; [`BackendError::diagnostic`] is the full
/// diagnostic text. Both feed the connectivity classifier.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// The server answered with a structured (PostgREST) error body.
    #[error("{message}")]
    Api {
        status: u16,
        code: String,
        message: String,
        details: Option<String>,
        hint: Option<String>,
    },

    /// The server answered with a non-success status and an unstructured body.
    #[error("HTTP status {status}")]
    Status { status: u16, body: String },

    /// The request never got an answer: connection, DNS, TLS, timeout.
    #[error("transport error: {message}")]
    Transport { message: String, detail: String },

    /// The configured endpoint could not be turned into a request URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl BackendError {
    /// Full diagnostic text, including every structured field.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Transport { detail, .. } => detail.clone(),
            other => format!("{:?}", other),
        }
    }
}

//! Error types and handling.

use thiserror::Error;

/// Fallback text for transport failures without a server-provided message.
pub const GENERIC_FAILURE: &str = "Something went wrong!";

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed before a usable response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with `success: false`
    #[error("{0}")]
    Rejected(String),

    /// Server answered with an error status, message taken from the body
    #[error("{0}")]
    Transport(String),

    /// Input rejected locally before any request was made
    #[error("{0}")]
    Validation(String),

    /// Session storage error
    #[error("Session error: {0}")]
    Session(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Excel export error
    #[error("Export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a rejection error with message
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// Create a transport error with message
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a session error with message
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    /// Text shown to the user in the alert dialog.
    ///
    /// Server and validation messages are shown verbatim; anything else
    /// collapses to the generic failure text.
    pub fn alert_text(&self) -> String {
        match self {
            Self::Rejected(msg) | Self::Transport(msg) | Self::Validation(msg) => msg.clone(),
            Self::Http(_) => GENERIC_FAILURE.to_string(),
            other => other.to_string(),
        }
    }
}

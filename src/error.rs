// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Nothing in the connector catches or retries these: they travel unchanged
//! to whoever called discover / fetch / traverse.

use std::fmt;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Raised while building a client, never per call.
    #[error("Missing configuration: {0}")]
    Configuration(String),

    #[error("Network failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("monday.com API returned HTTP {status}: {body_preview}")]
    Http { status: u16, body_preview: String },

    #[error("monday.com API reported errors: {}", messages.join("; "))]
    GraphQl {
        messages: Vec<String>,
        partial_data: Option<serde_json::Value>,
    },

    #[error("Board {board_id} not found")]
    NotFound { board_id: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Coarse classification of an [`AppError`] for presentation layers.
///
/// This is not an error type. It tells a caller (a CLI, a request router)
/// which family of failure it is looking at so it can pick its own message
/// or status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    Http,
    GraphQl,
    NotFound,
    MalformedResponse,
    InvalidInput,
    Local,
}

impl ErrorKind {
    /// Suggested HTTP status for a layer that re-exposes the connector over HTTP.
    pub fn suggested_status(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::InvalidInput => 400,
            Self::Transport => 504,
            Self::Http | Self::GraphQl | Self::MalformedResponse => 502,
            Self::Configuration | Self::Local => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuration => "configuration",
            Self::Transport => "transport",
            Self::Http => "http",
            Self::GraphQl => "graphql",
            Self::NotFound => "not_found",
            Self::MalformedResponse => "malformed_response",
            Self::InvalidInput => "invalid_input",
            Self::Local => "local",
        };
        write!(f, "{}", name)
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Configuration(_) => ErrorKind::Configuration,
            AppError::Transport(_) => ErrorKind::Transport,
            AppError::Http { .. } => ErrorKind::Http,
            AppError::GraphQl { .. } => ErrorKind::GraphQl,
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            AppError::Validation(_) => ErrorKind::InvalidInput,
            AppError::Io(_) | AppError::Csv(_) => ErrorKind::Local,
        }
    }

    /// HTTP status carried by the error, if the service answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            AppError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }

    /// Whether the request timed out before the service answered.
    pub fn is_timeout(&self) -> bool {
        matches!(self, AppError::Transport(err) if err.is_timeout())
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

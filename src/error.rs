//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed (transport, timeout or non-2xx status)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected schema
    #[error("Parse error: {0}")]
    Parse(String),

    /// Lookup endpoint answered `success: false`
    #[error("Invalid guest code")]
    InvalidCode,

    /// Server refused the request (`success: false` on removal)
    #[error("Request rejected by server")]
    Rejected,

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// What the operator is told about a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connection,
    InvalidCode,
    Rejected,
}

impl ErrorKind {
    /// Message shown in the error modal.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::Connection => "Errore di connessione",
            ErrorKind::InvalidCode => "QR non valido",
            ErrorKind::Rejected => "Richiesta rifiutata dal server",
        }
    }
}

impl AppError {
    /// Create a parse error with message
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a config error with message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Collapse into the operator-facing taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidCode => ErrorKind::InvalidCode,
            AppError::Rejected => ErrorKind::Rejected,
            AppError::Http(_) | AppError::Parse(_) | AppError::Config(_) | AppError::Io(_) => ErrorKind::Connection,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

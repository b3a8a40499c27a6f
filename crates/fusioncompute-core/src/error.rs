//! Error types for FusionCompute operations.
//!
//! Every client crate in the workspace reports failures through the single [`Error`]
//! enum defined here, so callers can match on the failure kind regardless of which
//! operation produced it.

use thiserror::Error;

/// Main error type for FusionCompute operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The HTTP exchange itself failed (connection refused, TLS, protocol error)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The HTTP exchange did not complete before the configured timeout
    #[error("Timeout waiting for FusionCompute: {0}")]
    Timeout(String),

    /// The platform answered with a non-success status code
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// Numeric HTTP status code
        status: u16,
        /// Platform error code (`errorCode`), when the body carried one
        error_code: Option<String>,
        /// Platform error description, or the raw body text
        message: String,
        /// Raw response body
        body: String,
    },

    /// A success response whose body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Caller-supplied input was rejected before any request was sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid endpoint or request path
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Specialized result type for FusionCompute operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::HttpStatus { .. } => "HTTP_STATUS_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Config(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// HTTP status code carried by the error, if the platform produced one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true when the platform reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::HttpStatus { status: 404, .. })
    }

    /// Returns true for failures of the HTTP exchange itself.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

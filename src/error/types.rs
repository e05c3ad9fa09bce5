//! Error types
//!
//! [`Error`] covers crate-level failures (configuration, address parsing,
//! HTTP plumbing). [`ExchangeError`] is what an exchange with the MOTD server
//! resolves to when it does not succeed, carrying the same status string a
//! page script would have received.

use thiserror::Error;

/// Status sent by the server when an exchange succeeded
pub const STATUS_OK: &str = "OK";

/// Sentinel status for transport-level failures
pub const STATUS_AJAX_FAILURE: &str = "ERROR_AJAX_FAILURE";

/// Statuses the MOTDPlayer server is known to send
pub mod server_status {
    /// Token did not authenticate for the given page/session
    pub const INVALID_AUTH: &str = "INVALID_AUTH";
    /// Game server refused to bind the identity to the session
    pub const IDENTITY_REJECTED: &str = "IDENTITY_REJECTED";
    /// Web-only route used by a steamid that never authenticated
    pub const USER_DOES_NOT_EXIST: &str = "USER_DOES_NOT_EXIST";
    /// Unknown `action` in the request body
    pub const ERROR_BAD_REQUEST: &str = "ERROR_BAD_REQUEST";
    /// Game server did not answer the custom data exchange
    pub const ERROR_SRCDS_FAILURE: &str = "ERROR_SRCDS_FAILURE";
}

/// Main error type for the application
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error in {field}: {message}")]
    Config {
        /// The configuration field that has an error
        field: String,
        /// Error message describing the issue
        message: String,
    },

    /// The hosting page address does not have the MOTD route shape
    #[error("Address does not match the MOTD page route: {address}")]
    InvalidAddress {
        /// The offending address
        address: String,
    },

    /// Validation errors
    #[error("Validation failed for {field}: {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Error message describing the validation failure
        message: String,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal issue
        message: String,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(field: S, message: S) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid address error
    pub fn invalid_address(address: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::Http(..) => "http",
            Error::Json(..) => "json",
            Error::Toml(..) => "toml",
            Error::Url(..) => "url",
            Error::Io(..) => "io",
            Error::Config { .. } => "config",
            Error::InvalidAddress { .. } => "address",
            Error::Validation { .. } => "validation",
            Error::Internal { .. } => "internal",
        }
    }
}

/// Outcome of an exchange that did not succeed
///
/// `Display` renders the wire-level status string, which is also what gets
/// shown to the user when navigation fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
    /// Network error, non-200 response or unreadable body
    #[error("{}", STATUS_AJAX_FAILURE)]
    AjaxFailure,

    /// The server answered with a status other than `OK`
    #[error("{0}")]
    Rejected(String),
}

impl ExchangeError {
    /// Status string as a page script would have received it
    pub fn status(&self) -> &str {
        match self {
            ExchangeError::AjaxFailure => STATUS_AJAX_FAILURE,
            ExchangeError::Rejected(status) => status,
        }
    }

    /// Whether the server refused the credential itself
    pub fn is_auth_rejection(&self) -> bool {
        matches!(
            self,
            ExchangeError::Rejected(status)
                if status == server_status::INVALID_AUTH
                    || status == server_status::IDENTITY_REJECTED
                    || status == server_status::USER_DOES_NOT_EXIST
        )
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            ExchangeError::AjaxFailure => "transport",
            ExchangeError::Rejected(_) if self.is_auth_rejection() => "auth",
            ExchangeError::Rejected(status)
                if status == server_status::ERROR_BAD_REQUEST
                    || status == server_status::ERROR_SRCDS_FAILURE =>
            {
                "server"
            }
            ExchangeError::Rejected(_) => "other",
        }
    }
}

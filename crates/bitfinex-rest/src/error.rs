//! Error types for REST API operations
//!
//! Application-level errors reported by the exchange (for example
//! `{"message": "Invalid order: not enough balance"}`) are not represented
//! here: those bodies are returned to the caller like any other response.

use bitfinex_auth::AuthError;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP request failed (network, DNS, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not JSON
    #[error("Parse error (HTTP {status}): {message}")]
    Parse {
        /// HTTP status of the response
        status: u16,
        /// Parser message plus the start of the body
        message: String,
    },

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// A required parameter was not supplied
    #[error("Missing required parameter '{parameter}' for {endpoint}")]
    MissingParameter {
        /// Logical operation name
        endpoint: &'static str,
        /// Caller-facing parameter name
        parameter: &'static str,
    },

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// No operation with this name
    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// Signing or credential loading failed
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl RestError {
    /// The request failed on the wire or came back unreadable
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Parse { .. })
    }

    /// The request was rejected locally before anything was sent
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter { .. } | Self::InvalidParameter(_) | Self::UnknownEndpoint(_)
        )
    }

    /// Credentials were missing or unusable
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthRequired | Self::Auth(_))
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

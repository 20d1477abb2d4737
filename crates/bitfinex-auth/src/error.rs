//! Error types for authentication operations

/// Errors that can occur while loading credentials or signing
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Payload could not be serialized to (or parsed from) JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Encoded payload is not valid base64
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// The nonce counter reached `u64::MAX`
    #[error("Nonce space exhausted: no nonce greater than {} exists", u64::MAX)]
    NonceExhausted,

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

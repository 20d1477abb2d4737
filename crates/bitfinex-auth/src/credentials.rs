//! API credentials for Bitfinex authenticated endpoints
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretBox};
use sha2::Sha384;

use crate::error::{AuthError, AuthResult};

type HmacSha384 = Hmac<Sha384>;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "BITFINEX_API_KEY";

/// Environment variable holding the API secret
pub const API_SECRET_ENV: &str = "BITFINEX_API_SECRET";

/// API credentials for authenticated requests
///
/// The secret is converted to its raw UTF-8 bytes once, at construction,
/// and zeroized when the Credentials are dropped.
pub struct Credentials {
    /// API key (public), sent verbatim in `X-BFX-APIKEY`
    api_key: String,
    /// API secret bytes, used as the HMAC key
    api_secret: SecretBox<Vec<u8>>,
}

impl Credentials {
    /// Create new credentials from an API key and API secret
    ///
    /// No validation is performed: any pair of strings is accepted and the
    /// exchange is left to reject keys it does not know.
    pub fn new(api_key: impl Into<String>, api_secret: impl AsRef<str>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretBox::new(Box::new(api_secret.as_ref().as_bytes().to_vec())),
        }
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BITFINEX_API_KEY` and `BITFINEX_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_SECRET_ENV.to_string()))?;

        Ok(Self::new(api_key, api_secret))
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Compute the Bitfinex signature of an encoded payload
    ///
    /// Bitfinex v1 signature algorithm:
    /// 1. HMAC-SHA384(api_secret, base64_payload)
    /// 2. Lowercase hex encode result
    ///
    /// # Arguments
    /// * `encoded_payload` - The base64 text that is also sent as `X-BFX-PAYLOAD`
    pub fn sign(&self, encoded_payload: &str) -> String {
        // expose_secret() provides controlled access to the key
        let mut mac = HmacSha384::new_from_slice(self.api_secret.expose_secret())
            .expect("HMAC can take key of any size");
        mac.update(encoded_payload.as_bytes());

        hex::encode(mac.finalize().into_bytes())
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates new SecretBox with same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretBox::new(Box::new(self.api_secret.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", visible))
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

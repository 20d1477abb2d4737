//! Request signing and the signed header envelope
//!
//! Bitfinex v1 carries the whole request inside three headers:
//!
//! | Header            | Value                                   |
//! |-------------------|-----------------------------------------|
//! | `X-BFX-APIKEY`    | API key                                 |
//! | `X-BFX-PAYLOAD`   | base64(JSON payload)                    |
//! | `X-BFX-SIGNATURE` | hex(HMAC-SHA384(secret, X-BFX-PAYLOAD)) |

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::Serialize;

use crate::credentials::Credentials;
use crate::error::{AuthError, AuthResult};

/// Header carrying the API key
pub const HEADER_API_KEY: &str = "X-BFX-APIKEY";
/// Header carrying the hex signature
pub const HEADER_SIGNATURE: &str = "X-BFX-SIGNATURE";
/// Header carrying the base64 payload
pub const HEADER_PAYLOAD: &str = "X-BFX-PAYLOAD";

/// The three authentication header values for one request
///
/// Built fresh for every call; an envelope embeds its nonce, so sending it
/// twice gets the second copy rejected.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    /// API key, unmodified
    pub api_key: String,
    /// Lowercase hex HMAC-SHA384 of `payload`
    pub signature: String,
    /// Standard base64 of the compact JSON payload
    pub payload: String,
}

impl SignedEnvelope {
    /// Header name/value pairs in the order they are sent
    pub fn headers(&self) -> [(&'static str, &str); 3] {
        [
            (HEADER_API_KEY, self.api_key.as_str()),
            (HEADER_SIGNATURE, self.signature.as_str()),
            (HEADER_PAYLOAD, self.payload.as_str()),
        ]
    }

    /// Decode the payload header back into JSON
    pub fn decode_payload(&self) -> AuthResult<serde_json::Value> {
        decode_payload(&self.payload)
    }
}

impl std::fmt::Debug for SignedEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible: String = self.api_key.chars().take(8).collect();
        f.debug_struct("SignedEnvelope")
            .field("api_key", &format!("{}...", visible))
            .field("signature", &self.signature)
            .field("payload", &self.payload)
            .finish()
    }
}

/// Serialize a payload to compact JSON and base64 encode it
pub fn encode_payload<T: Serialize + ?Sized>(payload: &T) -> AuthResult<String> {
    let json = serde_json::to_vec(payload)?;
    Ok(BASE64.encode(json))
}

/// Inverse of [`encode_payload`]
pub fn decode_payload(encoded: &str) -> AuthResult<serde_json::Value> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|e| AuthError::InvalidPayload(format!("invalid base64: {}", e)))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Signs payloads with one set of credentials
#[derive(Debug, Clone, Copy)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer
    pub fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign a payload
    ///
    /// The payload must already contain its `request` and `nonce` entries;
    /// signing is a pure function of the secret and the payload.
    pub fn sign<T: Serialize + ?Sized>(&self, payload: &T) -> AuthResult<SignedEnvelope> {
        let encoded = encode_payload(payload)?;
        let signature = self.credentials.sign(&encoded);

        Ok(SignedEnvelope {
            api_key: self.credentials.api_key().to_string(),
            signature,
            payload: encoded,
        })
    }
}

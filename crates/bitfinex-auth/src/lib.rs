//! Authentication primitives for the Bitfinex v1 HTTP API
//!
//! This crate holds everything needed to authenticate a request, without
//! doing any I/O:
//!
//! - [`Credentials`]: API key plus secret bytes (zeroized on drop)
//! - [`NonceGenerator`]: strictly increasing microsecond nonces
//! - [`RequestSigner`]: JSON → base64 → HMAC-SHA384 → [`SignedEnvelope`]
//!
//! # Example
//!
//! ```
//! use bitfinex_auth::{Credentials, NonceGenerator, RequestSigner};
//! use serde_json::json;
//!
//! let creds = Credentials::new("my-key", "my-secret");
//! let nonces = NonceGenerator::new();
//!
//! let payload = json!({
//!     "request": "/v1/balances",
//!     "nonce": nonces.next_string().unwrap(),
//! });
//!
//! let envelope = RequestSigner::new(&creds).sign(&payload).unwrap();
//! for (name, value) in envelope.headers() {
//!     println!("{}: {}", name, value);
//! }
//! ```

mod credentials;
mod error;
mod nonce;
mod signer;

pub use credentials::{Credentials, API_KEY_ENV, API_SECRET_ENV};
pub use error::{AuthError, AuthResult};
pub use nonce::NonceGenerator;
pub use signer::{
    decode_payload, encode_payload, RequestSigner, SignedEnvelope, HEADER_API_KEY,
    HEADER_PAYLOAD, HEADER_SIGNATURE,
};

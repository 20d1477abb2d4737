//! Common test utilities and fixtures for integration tests
//!
//! Response bodies are samples of what the Bitfinex v1 API returns.

#![allow(dead_code)]

use bitfinex_auth::decode_payload;
use bitfinex_rest::{BitfinexRestClient, ClientConfig, Credentials};
use serde_json::Value;
use wiremock::{MockServer, Request};

pub const API_KEY: &str = "K";
pub const API_SECRET: &str = "S";

/// Sample ticker response
pub const TICKER_RESPONSE: &str = r#"{
    "mid": "244.755",
    "bid": "244.75",
    "ask": "244.76",
    "last_price": "244.82",
    "low": "244.2",
    "high": "248.19",
    "volume": "7842.11542563",
    "timestamp": "1444253422.348340958"
}"#;

/// Sample new order response
pub const NEW_ORDER_RESPONSE: &str = r#"{
    "id": 448364249,
    "symbol": "btcusd",
    "exchange": "bitfinex",
    "price": "0.01",
    "avg_execution_price": "0.0",
    "side": "buy",
    "type": "exchange limit",
    "timestamp": "1444272165.252370982",
    "is_live": true,
    "is_cancelled": false,
    "is_hidden": false,
    "was_forced": false,
    "original_amount": "0.01",
    "remaining_amount": "0.01",
    "executed_amount": "0.0",
    "order_id": 448364249
}"#;

/// Sample balances response
pub const BALANCES_RESPONSE: &str = r#"[
    {"type": "deposit", "currency": "btc", "amount": "0.0", "available": "0.0"},
    {"type": "exchange", "currency": "usd", "amount": "1.0", "available": "1.0"}
]"#;

/// Sample application-level error
pub const INVALID_ORDER_RESPONSE: &str = r#"{"message": "Invalid order: not enough exchange balance for 0.01 BTCUSD at 0.01"}"#;

pub fn json(raw: &str) -> Value {
    serde_json::from_str(raw).expect("fixture is valid JSON")
}

/// Client pointed at the mock server, without credentials
pub fn public_client(server: &MockServer) -> BitfinexRestClient {
    BitfinexRestClient::with_config(
        ClientConfig::new()
            .with_base_url(format!("{}/v1", server.uri()))
            .with_timeout(5),
    )
}

/// Client pointed at the mock server, with the test credentials
pub fn authed_client(server: &MockServer) -> BitfinexRestClient {
    let client = public_client(server);
    client.set_credentials_from(Credentials::new(API_KEY, API_SECRET));
    client
}

pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

/// Decode and verify the signed headers of a captured request
///
/// Panics if the signature does not match the payload.
pub fn signed_payload(request: &Request) -> Value {
    let payload = header(request, "X-BFX-PAYLOAD").expect("payload header");
    let signature = header(request, "X-BFX-SIGNATURE").expect("signature header");

    let expected = Credentials::new(API_KEY, API_SECRET).sign(payload);
    assert_eq!(signature, expected, "signature does not match payload");
    assert_eq!(header(request, "X-BFX-APIKEY"), Some(API_KEY));

    decode_payload(payload).expect("payload decodes")
}

/// Nonce of a signed request as an integer
pub fn nonce_of(request: &Request) -> u64 {
    signed_payload(request)["nonce"]
        .as_str()
        .expect("nonce is a string")
        .parse()
        .expect("nonce is numeric")
}

pub async fn received(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}

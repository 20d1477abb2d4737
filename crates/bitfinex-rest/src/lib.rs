//! REST API client for the Bitfinex cryptocurrency exchange (v1)
//!
//! This crate provides public market data queries and authenticated
//! account and trading operations.
//!
//! # Features
//!
//! - **Market Data**: Ticker, stats, order book, lend book, trades, symbols
//! - **Trading**: Place, cancel and inspect orders; claim and close positions
//! - **Account**: Balances, fees, past trades
//! - **Funding**: Lend/loan offers, withdrawals
//!
//! # Authentication
//!
//! Private endpoints carry a JSON payload (with a strictly increasing nonce)
//! base64-encoded in `X-BFX-PAYLOAD`, signed with HMAC-SHA384 in
//! `X-BFX-SIGNATURE`. The POST body is empty. See [`bitfinex_auth`].
//!
//! # Responses
//!
//! Every call returns the exchange's JSON body as a [`serde_json::Value`],
//! unchanged. Exchange-side errors (`{"message": "..."}`) are returned the
//! same way; only transport failures, missing credentials and invalid
//! parameters surface as [`RestError`].
//!
//! # Example
//!
//! ```no_run
//! use bitfinex_rest::{BitfinexRestClient, Credentials, NewOrder, OrderSide};
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = BitfinexRestClient::new();
//!     let ticker = client.ticker("btcusd").await?;
//!     println!("BTC/USD: {}", ticker["last_price"]);
//!
//!     // Private endpoints (auth required)
//!     let auth_client = BitfinexRestClient::with_credentials(Credentials::from_env()?);
//!     let order = NewOrder::exchange_limit("btcusd", OrderSide::Buy, dec!(0.01), dec!(20000));
//!     let response = auth_client.place_order(&order).await?;
//!     println!("Order: {}", response);
//!
//!     // Or by logical operation name
//!     let balances = auth_client.invoke("balances", Default::default()).await?;
//!     println!("Balances: {}", balances);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod types;

// Re-export main types
pub use client::{BitfinexRestClient, ClientConfig, DEFAULT_BASE_URL};
pub use endpoints::{descriptor, EndpointDescriptor, Field, FieldDefault, HttpMethod, ENDPOINTS};
pub use error::{RestError, RestResult};

pub use bitfinex_auth::{AuthError, Credentials, NonceGenerator, SignedEnvelope};

pub use types::{
    NewOffer, NewOrder, OfferDirection, OrderSide, OrderType, Params, PastTradesQuery,
    WalletType, Withdrawal, DEFAULT_CURRENCY, DEFAULT_EXCHANGE, DEFAULT_SYMBOL,
};

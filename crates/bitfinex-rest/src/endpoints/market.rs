//! Public market data endpoints
//!
//! These endpoints don't require authentication and never touch the signer.

use crate::client::BitfinexRestClient;
use crate::error::RestResult;
use crate::types::Params;
use serde_json::{json, Value};
use tracing::{debug, instrument};

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a BitfinexRestClient,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a BitfinexRestClient) -> Self {
        Self { client }
    }

    async fn by_symbol(&self, endpoint: &str, symbol: &str) -> RestResult<Value> {
        debug!("Fetching {} for {}", endpoint, symbol);
        self.client.invoke(endpoint, segment("symbol", symbol)).await
    }

    async fn by_currency(&self, endpoint: &str, currency: &str) -> RestResult<Value> {
        debug!("Fetching {} for {}", endpoint, currency);
        self.client.invoke(endpoint, segment("currency", currency)).await
    }

    /// Innermost bid and ask plus the most recent trade
    ///
    /// # Arguments
    /// * `symbol` - Trading pair (e.g., "btcusd")
    #[instrument(skip(self))]
    pub async fn ticker(&self, symbol: &str) -> RestResult<Value> {
        self.by_symbol("ticker", symbol).await
    }

    /// Volume statistics over several periods
    #[instrument(skip(self))]
    pub async fn stats(&self, symbol: &str) -> RestResult<Value> {
        self.by_symbol("stats", symbol).await
    }

    /// Today's low, high and volume
    #[instrument(skip(self))]
    pub async fn today(&self, symbol: &str) -> RestResult<Value> {
        self.by_symbol("today", symbol).await
    }

    /// Full order book
    #[instrument(skip(self))]
    pub async fn orderbook(&self, symbol: &str) -> RestResult<Value> {
        self.by_symbol("orderbook", symbol).await
    }

    /// Full margin funding book
    ///
    /// # Arguments
    /// * `currency` - Currency (e.g., "btc", "usd")
    #[instrument(skip(self))]
    pub async fn lendbook(&self, currency: &str) -> RestResult<Value> {
        self.by_currency("lendbook", currency).await
    }

    /// Most recent trades
    #[instrument(skip(self))]
    pub async fn trades(&self, symbol: &str) -> RestResult<Value> {
        self.by_symbol("trades", symbol).await
    }

    /// Most recent lending data: total amount lent and rate (% per 365 days)
    #[instrument(skip(self))]
    pub async fn lends(&self, currency: &str) -> RestResult<Value> {
        self.by_currency("lends", currency).await
    }

    /// Valid symbol ids
    #[instrument(skip(self))]
    pub async fn symbols(&self) -> RestResult<Value> {
        debug!("Fetching symbols");
        self.client.invoke("symbols", Params::new()).await
    }

    /// Precision, order size limits and margin settings per pair
    #[instrument(skip(self))]
    pub async fn symbols_details(&self) -> RestResult<Value> {
        debug!("Fetching symbol details");
        self.client.invoke("symbols_details", Params::new()).await
    }
}

fn segment(key: &str, value: &str) -> Params {
    let mut params = Params::new();
    params.insert(key.to_string(), json!(value));
    params
}

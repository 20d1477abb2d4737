//! Account endpoints: balances, fees and trade history
//!
//! These endpoints require authentication.

use crate::client::BitfinexRestClient;
use crate::error::RestResult;
use crate::types::{Params, PastTradesQuery};
use serde_json::Value;
use tracing::{debug, instrument};

/// Account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a BitfinexRestClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a BitfinexRestClient) -> Self {
        Self { client }
    }

    /// Wallet balances
    #[instrument(skip(self))]
    pub async fn balances(&self) -> RestResult<Value> {
        debug!("Fetching balances");
        self.client.invoke("balances", Params::new()).await
    }

    /// Withdrawal fees per currency
    #[instrument(skip(self))]
    pub async fn account_fees(&self) -> RestResult<Value> {
        self.client.invoke("account_fees", Params::new()).await
    }

    /// Past trades of the account
    ///
    /// # Arguments
    /// * `query` - Symbol and start timestamp
    #[instrument(skip(self, query), fields(symbol = %query.symbol, since = query.timestamp))]
    pub async fn past_trades(&self, query: &PastTradesQuery) -> RestResult<Value> {
        debug!("Fetching past trades for {}", query.symbol);
        self.client.invoke("past_trades", query.to_params()).await
    }
}

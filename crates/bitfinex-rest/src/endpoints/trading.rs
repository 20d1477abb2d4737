//! Order and position endpoints
//!
//! These endpoints require authentication.

use crate::client::BitfinexRestClient;
use crate::error::RestResult;
use crate::types::{NewOrder, Params};
use serde_json::{json, Value};
use tracing::{debug, instrument};

/// Order and position endpoints
pub struct TradingEndpoints<'a> {
    client: &'a BitfinexRestClient,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(client: &'a BitfinexRestClient) -> Self {
        Self { client }
    }

    /// Submit a new order
    ///
    /// # Returns
    /// The exchange's response, typically including `order_id`
    #[instrument(skip(self, order), fields(symbol = %order.symbol, side = %order.side, order_type = %order.order_type))]
    pub async fn place_order(&self, order: &NewOrder) -> RestResult<Value> {
        debug!(
            "Placing {} {} order for {} {} @ {}",
            order.side, order.order_type, order.amount, order.symbol, order.price
        );
        self.client.invoke("place_order", order.to_params()).await
    }

    /// Cancel an order
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<Value> {
        debug!("Cancelling order {}", order_id);
        self.client.invoke("cancel_order", id("order_id", order_id)).await
    }

    /// Cancel all active orders
    #[instrument(skip(self))]
    pub async fn cancel_all_orders(&self) -> RestResult<Value> {
        debug!("Cancelling all active orders");
        self.client.invoke("cancel_all_orders", Params::new()).await
    }

    /// Status of an order: is it active, was it cancelled, how much executed
    #[instrument(skip(self))]
    pub async fn order_status(&self, order_id: u64) -> RestResult<Value> {
        self.client.invoke("order_status", id("order_id", order_id)).await
    }

    /// Active orders
    #[instrument(skip(self))]
    pub async fn active_orders(&self) -> RestResult<Value> {
        self.client.invoke("active_orders", Params::new()).await
    }

    /// Active positions
    #[instrument(skip(self))]
    pub async fn active_positions(&self) -> RestResult<Value> {
        self.client.invoke("active_positions", Params::new()).await
    }

    /// Claim a position
    #[instrument(skip(self))]
    pub async fn claim_position(&self, position_id: u64) -> RestResult<Value> {
        debug!("Claiming position {}", position_id);
        self.client.invoke("claim_position", id("position_id", position_id)).await
    }

    /// Close a position at market
    #[instrument(skip(self))]
    pub async fn close_position(&self, position_id: u64) -> RestResult<Value> {
        debug!("Closing position {}", position_id);
        self.client.invoke("close_position", id("position_id", position_id)).await
    }
}

pub(crate) fn id(key: &str, value: u64) -> Params {
    let mut params = Params::new();
    params.insert(key.to_string(), json!(value));
    params
}

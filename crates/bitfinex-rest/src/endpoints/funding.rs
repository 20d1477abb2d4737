//! Funding endpoints: margin funding offers and withdrawals
//!
//! These endpoints require authentication.

use crate::client::BitfinexRestClient;
use crate::endpoints::trading::id;
use crate::error::RestResult;
use crate::types::{NewOffer, Params, Withdrawal};
use serde_json::Value;
use tracing::{debug, instrument};

/// Funding endpoints
pub struct FundingEndpoints<'a> {
    client: &'a BitfinexRestClient,
}

impl<'a> FundingEndpoints<'a> {
    pub fn new(client: &'a BitfinexRestClient) -> Self {
        Self { client }
    }

    /// Submit a new lend or loan offer
    #[instrument(skip(self, offer), fields(currency = %offer.currency, direction = %offer.direction))]
    pub async fn place_offer(&self, offer: &NewOffer) -> RestResult<Value> {
        debug!(
            "Placing {} offer of {} {} at {}% for {} days",
            offer.direction, offer.amount, offer.currency, offer.rate, offer.period
        );
        self.client.invoke("place_offer", offer.to_params()).await
    }

    /// Cancel an offer
    #[instrument(skip(self))]
    pub async fn cancel_offer(&self, offer_id: u64) -> RestResult<Value> {
        debug!("Cancelling offer {}", offer_id);
        self.client.invoke("cancel_offer", id("offer_id", offer_id)).await
    }

    /// Status of an offer
    #[instrument(skip(self))]
    pub async fn offer_status(&self, offer_id: u64) -> RestResult<Value> {
        self.client.invoke("offer_status", id("offer_id", offer_id)).await
    }

    /// Active offers
    #[instrument(skip(self))]
    pub async fn active_offers(&self) -> RestResult<Value> {
        self.client.invoke("active_offers", Params::new()).await
    }

    /// Withdraw funds to an external address
    ///
    /// The exchange may answer with a per-request status array; it is
    /// returned unchanged.
    #[instrument(skip(self, withdrawal), fields(method = %withdrawal.withdraw_type, wallet = %withdrawal.wallet))]
    pub async fn withdraw(&self, withdrawal: &Withdrawal) -> RestResult<Value> {
        debug!(
            "Withdrawing {} via {} from {} wallet",
            withdrawal.amount, withdrawal.withdraw_type, withdrawal.wallet
        );
        self.client.invoke("withdraw", withdrawal.to_params()).await
    }
}

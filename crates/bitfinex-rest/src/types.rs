//! Typed request objects for authenticated Bitfinex operations
//!
//! Each object turns into the parameter map consumed by
//! [`BitfinexRestClient::invoke`](crate::BitfinexRestClient::invoke). Prices,
//! amounts and rates go over the wire as decimal strings; ids and periods
//! as JSON integers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Parameters for one operation, keyed by caller-facing parameter name
pub type Params = Map<String, Value>;

/// Default trading pair
pub const DEFAULT_SYMBOL: &str = "btcusd";

/// Default currency for lending endpoints
pub const DEFAULT_CURRENCY: &str = "btc";

/// Default exchange for new orders
pub const DEFAULT_EXCHANGE: &str = "bitfinex";

// ============================================================================
// Orders
// ============================================================================

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl OrderSide {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type
///
/// Types without the `exchange` prefix trade on the margin wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    #[serde(rename = "market")]
    Market,
    #[serde(rename = "limit")]
    Limit,
    #[serde(rename = "stop")]
    Stop,
    #[serde(rename = "trailing-stop")]
    TrailingStop,
    #[serde(rename = "fill-or-kill")]
    FillOrKill,
    #[serde(rename = "exchange market")]
    ExchangeMarket,
    #[serde(rename = "exchange limit")]
    ExchangeLimit,
    #[serde(rename = "exchange stop")]
    ExchangeStop,
    #[serde(rename = "exchange trailing-stop")]
    ExchangeTrailingStop,
    #[serde(rename = "exchange fill-or-kill")]
    ExchangeFillOrKill,
}

impl OrderType {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Limit => "limit",
            Self::Stop => "stop",
            Self::TrailingStop => "trailing-stop",
            Self::FillOrKill => "fill-or-kill",
            Self::ExchangeMarket => "exchange market",
            Self::ExchangeLimit => "exchange limit",
            Self::ExchangeStop => "exchange stop",
            Self::ExchangeTrailingStop => "exchange trailing-stop",
            Self::ExchangeFillOrKill => "exchange fill-or-kill",
        }
    }

    /// Whether the order trades on the exchange wallet
    pub fn is_exchange(&self) -> bool {
        self.as_str().starts_with("exchange ")
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A new order (`/order/new`)
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    /// Trading pair, defaults to `btcusd`
    pub symbol: String,
    /// Order amount
    pub amount: Decimal,
    /// Order price (required by the exchange even for market orders)
    pub price: Decimal,
    /// Routing exchange, defaults to `bitfinex`
    pub exchange: String,
    /// Order side
    pub side: OrderSide,
    /// Order type
    pub order_type: OrderType,
}

impl NewOrder {
    /// Create an order on the default symbol and exchange
    pub fn new(amount: Decimal, price: Decimal, side: OrderSide, order_type: OrderType) -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            amount,
            price,
            exchange: DEFAULT_EXCHANGE.to_string(),
            side,
            order_type,
        }
    }

    /// Create an exchange limit order
    pub fn exchange_limit(
        symbol: impl Into<String>,
        side: OrderSide,
        amount: Decimal,
        price: Decimal,
    ) -> Self {
        Self::new(amount, price, side, OrderType::ExchangeLimit).with_symbol(symbol)
    }

    /// Set the trading pair
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Set the routing exchange
    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = exchange.into();
        self
    }

    /// Parameters for `place_order`
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("symbol".into(), json!(self.symbol));
        params.insert("amount".into(), json!(self.amount.to_string()));
        params.insert("price".into(), json!(self.price.to_string()));
        params.insert("exchange".into(), json!(self.exchange));
        params.insert("side".into(), json!(self.side.as_str()));
        params.insert("ord_type".into(), json!(self.order_type.as_str()));
        params
    }
}

/// Query for the account's past trades (`/mytrades`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastTradesQuery {
    /// Trading pair, defaults to `btcusd`
    pub symbol: String,
    /// Only trades at or after this UNIX timestamp, defaults to 0
    pub timestamp: u64,
}

impl Default for PastTradesQuery {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            timestamp: 0,
        }
    }
}

impl PastTradesQuery {
    /// Trades for a symbol since the beginning
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    /// Only return trades at or after `timestamp`
    pub fn since(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Parameters for `past_trades`
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("symbol".into(), json!(self.symbol));
        params.insert("timestamp".into(), json!(self.timestamp));
        params
    }
}

// ============================================================================
// Offers
// ============================================================================

/// Margin funding offer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferDirection {
    /// Offer funds to other traders
    Lend,
    /// Request funds
    Loan,
}

impl OfferDirection {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lend => "lend",
            Self::Loan => "loan",
        }
    }
}

impl std::fmt::Display for OfferDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A new margin funding offer (`/offer/new`)
#[derive(Debug, Clone, PartialEq)]
pub struct NewOffer {
    /// Currency to lend or borrow (e.g. `usd`)
    pub currency: String,
    /// Amount offered
    pub amount: Decimal,
    /// Rate in percent per 365 days
    pub rate: Decimal,
    /// Offer period in days
    pub period: u32,
    /// Lend or loan
    pub direction: OfferDirection,
}

impl NewOffer {
    /// Create a funding offer
    pub fn new(
        currency: impl Into<String>,
        amount: Decimal,
        rate: Decimal,
        period: u32,
        direction: OfferDirection,
    ) -> Self {
        Self {
            currency: currency.into(),
            amount,
            rate,
            period,
            direction,
        }
    }

    /// Parameters for `place_offer`
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("currency".into(), json!(self.currency));
        params.insert("amount".into(), json!(self.amount.to_string()));
        params.insert("rate".into(), json!(self.rate.to_string()));
        params.insert("period".into(), json!(self.period));
        params.insert("direction".into(), json!(self.direction.as_str()));
        params
    }
}

// ============================================================================
// Withdrawals
// ============================================================================

/// Wallet to withdraw from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletType {
    Trading,
    Exchange,
    Deposit,
}

impl WalletType {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trading => "trading",
            Self::Exchange => "exchange",
            Self::Deposit => "deposit",
        }
    }
}

impl std::fmt::Display for WalletType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A withdrawal request (`/withdraw`)
#[derive(Debug, Clone, PartialEq)]
pub struct Withdrawal {
    /// Withdrawal method (e.g. `bitcoin`, `litecoin`, `ethereum`)
    pub withdraw_type: String,
    /// Source wallet
    pub wallet: WalletType,
    /// Amount to withdraw
    pub amount: Decimal,
    /// Destination address
    pub address: String,
}

impl Withdrawal {
    /// Create a withdrawal request
    pub fn new(
        withdraw_type: impl Into<String>,
        wallet: WalletType,
        amount: Decimal,
        address: impl Into<String>,
    ) -> Self {
        Self {
            withdraw_type: withdraw_type.into(),
            wallet,
            amount,
            address: address.into(),
        }
    }

    /// Parameters for `withdraw`
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("withdraw_type".into(), json!(self.withdraw_type));
        params.insert("walletselected".into(), json!(self.wallet.as_str()));
        params.insert("amount".into(), json!(self.amount.to_string()));
        params.insert("address".into(), json!(self.address));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_order_defaults() {
        let order = NewOrder::new(dec!(0.5), dec!(30000), OrderSide::Buy, OrderType::ExchangeLimit);
        assert_eq!(order.symbol, "btcusd");
        assert_eq!(order.exchange, "bitfinex");

        let params = order.to_params();
        assert_eq!(params["amount"], "0.5");
        assert_eq!(params["price"], "30000");
        assert_eq!(params["side"], "buy");
        assert_eq!(params["ord_type"], "exchange limit");
    }

    #[test]
    fn test_exchange_limit_constructor() {
        let order = NewOrder::exchange_limit("ethusd", OrderSide::Sell, dec!(2), dec!(1800.25))
            .with_exchange("bitstamp");
        assert_eq!(order.symbol, "ethusd");
        assert_eq!(order.exchange, "bitstamp");
        assert_eq!(order.order_type, OrderType::ExchangeLimit);
        assert!(order.order_type.is_exchange());
        assert!(!OrderType::TrailingStop.is_exchange());
    }

    #[test]
    fn test_order_type_serde_matches_display() {
        for order_type in [
            OrderType::Market,
            OrderType::FillOrKill,
            OrderType::ExchangeTrailingStop,
        ] {
            let serialized = serde_json::to_value(order_type).unwrap();
            assert_eq!(serialized, order_type.to_string());
        }
    }

    #[test]
    fn test_past_trades_query() {
        let params = PastTradesQuery::default().to_params();
        assert_eq!(params["symbol"], "btcusd");
        assert_eq!(params["timestamp"], 0);

        let params = PastTradesQuery::new("ltcbtc").since(1_700_000_000).to_params();
        assert_eq!(params["symbol"], "ltcbtc");
        assert_eq!(params["timestamp"], 1_700_000_000u64);
    }

    #[test]
    fn test_offer_params() {
        let offer = NewOffer::new("usd", dec!(1000), dec!(12.5), 30, OfferDirection::Lend);
        let params = offer.to_params();
        assert_eq!(params["rate"], "12.5");
        assert_eq!(params["period"], 30);
        assert_eq!(params["direction"], "lend");
    }

    #[test]
    fn test_withdrawal_params() {
        let withdrawal = Withdrawal::new("bitcoin", WalletType::Exchange, dec!(0.01), "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2");
        let params = withdrawal.to_params();
        assert_eq!(params["withdraw_type"], "bitcoin");
        assert_eq!(params["walletselected"], "exchange");
        assert_eq!(params["amount"], "0.01");
    }
}

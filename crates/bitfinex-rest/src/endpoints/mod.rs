//! Endpoint descriptor table and typed endpoint groups
//!
//! Every operation the client supports is one [`EndpointDescriptor`] in
//! [`ENDPOINTS`]. The dispatcher ([`BitfinexRestClient::invoke`]) only reads
//! this table; the typed groups below are thin wrappers that build a
//! parameter map and call `invoke`.
//!
//! [`BitfinexRestClient::invoke`]: crate::BitfinexRestClient::invoke

pub mod account;
pub mod funding;
pub mod market;
pub mod trading;

pub use account::AccountEndpoints;
pub use funding::FundingEndpoints;
pub use market::MarketEndpoints;
pub use trading::TradingEndpoints;

use serde_json::Value;

use crate::error::{RestError, RestResult};
use crate::types::{Params, DEFAULT_CURRENCY, DEFAULT_EXCHANGE, DEFAULT_SYMBOL};

/// HTTP method of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Public, unsigned; fields are path segments
    Get,
    /// Authenticated; fields are signed payload entries
    Post,
}

/// Default for an optional field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Str(&'static str),
    Int(i64),
}

impl FieldDefault {
    fn to_value(self) -> Value {
        match self {
            Self::Str(s) => Value::from(s),
            Self::Int(i) => Value::from(i),
        }
    }
}

/// One parameter of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Name the caller supplies
    pub param: &'static str,
    /// Name in the signed payload
    pub key: &'static str,
    /// `None` means the field is required
    pub default: Option<FieldDefault>,
}

impl Field {
    const fn required(param: &'static str) -> Self {
        Self {
            param,
            key: param,
            default: None,
        }
    }

    const fn renamed(param: &'static str, key: &'static str) -> Self {
        Self {
            param,
            key,
            default: None,
        }
    }

    const fn optional(param: &'static str, default: FieldDefault) -> Self {
        Self {
            param,
            key: param,
            default: Some(default),
        }
    }

    /// Whether the caller must supply this field
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Static metadata binding an operation to its HTTP method, path and fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// Logical operation name, e.g. `place_order`
    pub name: &'static str,
    pub method: HttpMethod,
    /// Path relative to the base URL, e.g. `/order/new`
    pub path: &'static str,
    /// Fields in wire order
    pub fields: &'static [Field],
}

const SYMBOL: Field = Field::optional("symbol", FieldDefault::Str(DEFAULT_SYMBOL));
const CURRENCY: Field = Field::optional("currency", FieldDefault::Str(DEFAULT_CURRENCY));

const NONE: &[Field] = &[];
const BY_SYMBOL: &[Field] = &[SYMBOL];
const BY_CURRENCY: &[Field] = &[CURRENCY];
const ORDER_ID: &[Field] = &[Field::required("order_id")];
const POSITION_ID: &[Field] = &[Field::required("position_id")];
const OFFER_ID: &[Field] = &[Field::required("offer_id")];

const NEW_ORDER: &[Field] = &[
    SYMBOL,
    Field::required("amount"),
    Field::required("price"),
    Field::optional("exchange", FieldDefault::Str(DEFAULT_EXCHANGE)),
    Field::required("side"),
    Field::renamed("ord_type", "type"),
];

const PAST_TRADES: &[Field] = &[SYMBOL, Field::optional("timestamp", FieldDefault::Int(0))];

const NEW_OFFER: &[Field] = &[
    Field::required("currency"),
    Field::required("amount"),
    Field::required("rate"),
    Field::required("period"),
    Field::required("direction"),
];

const WITHDRAWAL: &[Field] = &[
    Field::required("withdraw_type"),
    Field::required("walletselected"),
    Field::required("amount"),
    Field::required("address"),
];

const fn get(name: &'static str, path: &'static str, fields: &'static [Field]) -> EndpointDescriptor {
    EndpointDescriptor {
        name,
        method: HttpMethod::Get,
        path,
        fields,
    }
}

const fn post(name: &'static str, path: &'static str, fields: &'static [Field]) -> EndpointDescriptor {
    EndpointDescriptor {
        name,
        method: HttpMethod::Post,
        path,
        fields,
    }
}

/// Every supported operation
pub const ENDPOINTS: &[EndpointDescriptor] = &[
    // Public market data
    get("ticker", "/pubticker", BY_SYMBOL),
    get("stats", "/stats", BY_SYMBOL),
    get("today", "/today", BY_SYMBOL),
    get("orderbook", "/book", BY_SYMBOL),
    get("lendbook", "/lendbook", BY_CURRENCY),
    get("trades", "/trades", BY_SYMBOL),
    get("lends", "/lends", BY_CURRENCY),
    get("symbols", "/symbols", NONE),
    get("symbols_details", "/symbols_details", NONE),
    // Orders
    post("place_order", "/order/new", NEW_ORDER),
    post("cancel_order", "/order/cancel", ORDER_ID),
    post("cancel_all_orders", "/order/cancel/all", NONE),
    post("order_status", "/order/status", ORDER_ID),
    post("active_orders", "/orders", NONE),
    // Positions
    post("active_positions", "/positions", NONE),
    post("claim_position", "/position/claim", POSITION_ID),
    post("close_position", "/position/close", POSITION_ID),
    // Account
    post("past_trades", "/mytrades", PAST_TRADES),
    post("balances", "/balances", NONE),
    post("account_fees", "/account_fees", NONE),
    // Funding
    post("place_offer", "/offer/new", NEW_OFFER),
    post("cancel_offer", "/offer/cancel", OFFER_ID),
    post("offer_status", "/offer/status", OFFER_ID),
    post("active_offers", "/offers", NONE),
    post("withdraw", "/withdraw", WITHDRAWAL),
];

/// Look up an operation by logical name
pub fn descriptor(name: &str) -> Option<&'static EndpointDescriptor> {
    ENDPOINTS.iter().find(|d| d.name == name)
}

impl EndpointDescriptor {
    /// Whether calls must be signed
    pub fn is_authenticated(&self) -> bool {
        self.method == HttpMethod::Post
    }

    /// Validate caller parameters and resolve them to wire order
    ///
    /// Unknown parameters are rejected. A missing or `null` parameter takes
    /// its default, or fails with [`RestError::MissingParameter`] when the
    /// field is required.
    pub fn resolve(&self, params: &Params) -> RestResult<Vec<(&'static str, Value)>> {
        if let Some(unknown) = params
            .keys()
            .find(|k| !self.fields.iter().any(|f| f.param == k.as_str()))
        {
            return Err(RestError::InvalidParameter(format!(
                "{} does not accept parameter '{}'",
                self.name, unknown
            )));
        }

        self.fields
            .iter()
            .map(|field| match params.get(field.param) {
                Some(value) if !value.is_null() => Ok((field.key, value.clone())),
                _ => field
                    .default
                    .map(|default| (field.key, default.to_value()))
                    .ok_or(RestError::MissingParameter {
                        endpoint: self.name,
                        parameter: field.param,
                    }),
            })
            .collect()
    }

    /// Build the request path for a public endpoint, e.g. `/pubticker/btcusd`
    pub fn path_with(&self, params: &Params) -> RestResult<String> {
        let mut path = self.path.to_string();

        for (key, value) in self.resolve(params)? {
            let segment = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            // Dot segments would be normalised away and hit another resource
            if matches!(segment.as_str(), "" | "." | "..")
                || segment.contains(|c| matches!(c, '/' | '?' | '#'))
            {
                return Err(RestError::InvalidParameter(format!(
                    "{} is not a valid path segment for {}: {:?}",
                    key, self.name, segment
                )));
            }
            path.push('/');
            path.push_str(&segment);
        }

        Ok(path)
    }
}

/// Assemble a signed payload: `request`, `nonce`, then resolved fields
pub fn signed_payload(request: &str, nonce: String, fields: Vec<(&'static str, Value)>) -> Params {
    let mut payload = Params::new();
    payload.insert("request".to_string(), Value::from(request));
    payload.insert("nonce".to_string(), Value::from(nonce));
    for (key, value) in fields {
        payload.insert(key.to_string(), value);
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn params(value: Value) -> Params {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_table_integrity() {
        let names: HashSet<_> = ENDPOINTS.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), ENDPOINTS.len(), "duplicate endpoint name");

        let public = ENDPOINTS.iter().filter(|d| !d.is_authenticated()).count();
        assert_eq!(public, 9);
        assert_eq!(ENDPOINTS.len() - public, 16);

        for d in ENDPOINTS {
            assert!(d.path.starts_with('/'));
            if !d.is_authenticated() {
                assert!(d.fields.len() <= 1);
                assert!(d.fields.iter().all(|f| !f.is_required()));
            }
        }
    }

    #[test]
    fn test_descriptor_lookup() {
        let d = descriptor("place_order").unwrap();
        assert_eq!(d.path, "/order/new");
        assert_eq!(d.method, HttpMethod::Post);
        assert!(descriptor("delete_everything").is_none());
    }

    #[test]
    fn test_resolve_applies_defaults_in_wire_order() {
        let d = descriptor("place_order").unwrap();
        let resolved = d
            .resolve(&params(json!({
                "ord_type": "exchange limit",
                "side": "buy",
                "price": "100.0",
                "amount": "1.0",
            })))
            .unwrap();

        let keys: Vec<_> = resolved.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["symbol", "amount", "price", "exchange", "side", "type"]);
        assert_eq!(resolved[0].1, "btcusd");
        assert_eq!(resolved[3].1, "bitfinex");
        assert_eq!(resolved[5].1, "exchange limit");
    }

    #[test]
    fn test_resolve_missing_required() {
        let d = descriptor("place_order").unwrap();
        let err = d
            .resolve(&params(json!({
                "price": "100.0",
                "side": "buy",
                "ord_type": "exchange limit",
            })))
            .unwrap_err();

        assert!(matches!(
            err,
            RestError::MissingParameter {
                endpoint: "place_order",
                parameter: "amount"
            }
        ));
    }

    #[test]
    fn test_resolve_null_counts_as_missing() {
        let d = descriptor("past_trades").unwrap();
        let resolved = d.resolve(&params(json!({ "timestamp": null }))).unwrap();
        assert_eq!(resolved[1], ("timestamp", json!(0)));

        let d = descriptor("cancel_order").unwrap();
        assert!(d.resolve(&params(json!({ "order_id": null }))).is_err());
    }

    #[test]
    fn test_resolve_rejects_unknown_parameter() {
        let d = descriptor("balances").unwrap();
        let err = d.resolve(&params(json!({ "symbol": "btcusd" }))).unwrap_err();
        assert!(matches!(err, RestError::InvalidParameter(_)));
    }

    #[test]
    fn test_public_paths() {
        let ticker = descriptor("ticker").unwrap();
        assert_eq!(ticker.path_with(&Params::new()).unwrap(), "/pubticker/btcusd");
        assert_eq!(
            ticker.path_with(&params(json!({ "symbol": "ethusd" }))).unwrap(),
            "/pubticker/ethusd"
        );

        let lends = descriptor("lends").unwrap();
        assert_eq!(lends.path_with(&Params::new()).unwrap(), "/lends/btc");

        let symbols = descriptor("symbols_details").unwrap();
        assert_eq!(symbols.path_with(&Params::new()).unwrap(), "/symbols_details");
    }

    #[test]
    fn test_public_path_rejects_traversal() {
        let ticker = descriptor("ticker").unwrap();
        for bad in ["", ".", "..", "../orders", "btcusd?x=1", "a#b"] {
            let err = ticker.path_with(&params(json!({ "symbol": bad }))).unwrap_err();
            assert!(matches!(err, RestError::InvalidParameter(_)), "{:?}", bad);
        }
    }

    #[test]
    fn test_signed_payload_order() {
        let payload = signed_payload(
            "/v1/order/cancel",
            "1500000000000001".to_string(),
            vec![("order_id", json!(446915287))],
        );
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"request":"/v1/order/cancel","nonce":"1500000000000001","order_id":446915287}"#
        );
    }
}

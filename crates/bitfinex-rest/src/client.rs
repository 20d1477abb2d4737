//! Main REST client implementation

use crate::endpoints::{
    self, signed_payload, AccountEndpoints, EndpointDescriptor, FundingEndpoints, HttpMethod,
    MarketEndpoints, TradingEndpoints,
};
use crate::error::{RestError, RestResult};
use crate::types::{NewOrder, Params, PastTradesQuery, DEFAULT_SYMBOL};
use bitfinex_auth::{Credentials, NonceGenerator, RequestSigner, SignedEnvelope};
use parking_lot::RwLock;
use reqwest::{Client, Response, Url};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.bitfinex.com/v1";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Longest body excerpt quoted in parse errors
const BODY_EXCERPT_LEN: usize = 200;

/// Bitfinex REST API client
///
/// Provides access to both public and authenticated endpoints. Clones share
/// the credential store and the nonce generator, so nonces stay strictly
/// increasing across every clone of one client.
///
/// # Example
///
/// ```no_run
/// use bitfinex_rest::{BitfinexRestClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = BitfinexRestClient::new();
///     let ticker = client.ticker("btcusd").await?;
///
///     // Credentials can be set later, re-set, or cleared
///     client.set_credentials("api-key", "api-secret");
///     let balances = client.balances().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BitfinexRestClient {
    http_client: Client,
    base_url: String,
    /// Path of `base_url` (e.g. `/v1`), prefixed to every signed `request`
    request_prefix: String,
    credentials: Arc<RwLock<Option<Credentials>>>,
    nonces: Arc<NonceGenerator>,
}

impl BitfinexRestClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will succeed until credentials are set.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    ///
    /// # Panics
    /// If the HTTP client cannot be built (TLS backend unavailable).
    pub fn with_config(config: ClientConfig) -> Self {
        let user_agent = config
            .user_agent
            .unwrap_or_else(|| format!("bitfinex-rest/{}", env!("CARGO_PKG_VERSION")));

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(user_agent)
            .build()
            .expect("Failed to create HTTP client");

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let request_prefix = request_prefix(&base_url);

        let nonces = match config.nonce_floor {
            Some(floor) => NonceGenerator::starting_after(floor),
            None => NonceGenerator::new(),
        };

        info!(base_url = %base_url, "Created Bitfinex REST client");

        Self {
            http_client,
            base_url,
            request_prefix,
            credentials: Arc::new(RwLock::new(config.credentials)),
            nonces: Arc::new(nonces),
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Credential store
    // ========================================================================

    /// Store (or replace) the API key and secret
    pub fn set_credentials(&self, api_key: impl Into<String>, api_secret: impl AsRef<str>) {
        self.set_credentials_from(Credentials::new(api_key, api_secret));
    }

    /// Store (or replace) prepared credentials
    pub fn set_credentials_from(&self, credentials: Credentials) {
        *self.credentials.write() = Some(credentials);
        info!("API credentials set");
    }

    /// Forget the stored credentials; the secret is zeroized
    pub fn clear_credentials(&self) {
        if self.credentials.write().take().is_some() {
            info!("API credentials cleared");
        }
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.read().is_some()
    }

    /// The nonce generator used for signed requests
    pub fn nonces(&self) -> &NonceGenerator {
        &self.nonces
    }

    // ========================================================================
    // Market data (public)
    // ========================================================================

    /// Public market data endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Get ticker information for a trading pair
    pub async fn ticker(&self, symbol: &str) -> RestResult<Value> {
        self.market().ticker(symbol).await
    }

    /// Get ticker information for the default pair (`btcusd`)
    pub async fn default_ticker(&self) -> RestResult<Value> {
        self.market().ticker(DEFAULT_SYMBOL).await
    }

    /// Get the order book for a trading pair
    pub async fn orderbook(&self, symbol: &str) -> RestResult<Value> {
        self.market().orderbook(symbol).await
    }

    // ========================================================================
    // Account (authenticated)
    // ========================================================================

    /// Balance, fee and trade history endpoints
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(self)
    }

    /// Get wallet balances
    pub async fn balances(&self) -> RestResult<Value> {
        self.account().balances().await
    }

    /// Get past trades of the account
    pub async fn past_trades(&self, query: &PastTradesQuery) -> RestResult<Value> {
        self.account().past_trades(query).await
    }

    // ========================================================================
    // Trading (authenticated)
    // ========================================================================

    /// Order and position endpoints
    pub fn trading(&self) -> TradingEndpoints<'_> {
        TradingEndpoints::new(self)
    }

    /// Place a new order
    pub async fn place_order(&self, order: &NewOrder) -> RestResult<Value> {
        self.trading().place_order(order).await
    }

    /// Cancel an order by id
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<Value> {
        self.trading().cancel_order(order_id).await
    }

    /// Cancel all active orders
    pub async fn cancel_all_orders(&self) -> RestResult<Value> {
        self.trading().cancel_all_orders().await
    }

    /// Get active orders
    pub async fn active_orders(&self) -> RestResult<Value> {
        self.trading().active_orders().await
    }

    // ========================================================================
    // Funding (authenticated)
    // ========================================================================

    /// Margin funding offer and withdrawal endpoints
    pub fn funding(&self) -> FundingEndpoints<'_> {
        FundingEndpoints::new(self)
    }

    /// Get active funding offers
    pub async fn active_offers(&self) -> RestResult<Value> {
        self.funding().active_offers().await
    }

    // ========================================================================
    // Dispatcher
    // ========================================================================

    /// Invoke an operation by logical name
    ///
    /// Public operations issue an unsigned GET; authenticated ones a signed
    /// POST. The parsed response body is returned unchanged, whether it
    /// describes a success or an exchange-side error.
    ///
    /// # Errors
    /// - [`RestError::UnknownEndpoint`], [`RestError::MissingParameter`],
    ///   [`RestError::InvalidParameter`] before anything is sent
    /// - [`RestError::AuthRequired`] when an authenticated operation is
    ///   invoked without credentials
    /// - [`RestError::Http`] / [`RestError::Parse`] for transport failures
    #[instrument(skip(self, params))]
    pub async fn invoke(&self, name: &str, params: Params) -> RestResult<Value> {
        let descriptor =
            endpoints::descriptor(name).ok_or_else(|| RestError::UnknownEndpoint(name.to_string()))?;

        match descriptor.method {
            HttpMethod::Get => self.public_get(descriptor, &params).await,
            HttpMethod::Post => self.private_post(descriptor, &params).await,
        }
    }

    /// Validate, nonce and sign a request without sending it
    pub fn sign_request(
        &self,
        descriptor: &EndpointDescriptor,
        params: &Params,
    ) -> RestResult<SignedEnvelope> {
        let fields = descriptor.resolve(params)?;

        let guard = self.credentials.read();
        let credentials = guard.as_ref().ok_or(RestError::AuthRequired)?;

        let request = format!("{}{}", self.request_prefix, descriptor.path);
        let payload = signed_payload(&request, self.nonces.next_string()?, fields);

        Ok(RequestSigner::new(credentials).sign(&payload)?)
    }

    async fn public_get(&self, descriptor: &EndpointDescriptor, params: &Params) -> RestResult<Value> {
        let path = descriptor.path_with(params)?;
        let url = format!("{}{}", self.base_url, path);

        debug!("GET {}", path);

        let response = self.http_client.get(&url).send().await?;
        read_json(response).await
    }

    async fn private_post(&self, descriptor: &EndpointDescriptor, params: &Params) -> RestResult<Value> {
        let envelope = self.sign_request(descriptor, params)?;
        let url = format!("{}{}", self.base_url, descriptor.path);

        debug!("Making authenticated request to {}", descriptor.path);

        // The payload travels only in the signed headers; the body stays empty
        let mut request = self.http_client.post(&url);
        for (name, value) in envelope.headers() {
            request = request.header(name, value);
        }

        let response = request.send().await?;
        read_json(response).await
    }
}

impl Default for BitfinexRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BitfinexRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitfinexRestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Parse a response body as JSON regardless of its HTTP status
async fn read_json(response: Response) -> RestResult<Value> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        debug!(status = %status, "Exchange returned non-success status");
    }

    serde_json::from_str(&body).map_err(|e| {
        let excerpt: String = body.chars().take(BODY_EXCERPT_LEN).collect();
        RestError::Parse {
            status: status.as_u16(),
            message: format!("{} (body: {:?})", e, excerpt),
        }
    })
}

/// The path component of a base URL, without a trailing slash
fn request_prefix(base_url: &str) -> String {
    Url::parse(base_url)
        .map(|url| url.path().trim_end_matches('/').to_string())
        .unwrap_or_default()
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, including the version path
    pub base_url: String,
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Issue nonces strictly above this value
    pub nonce_floor: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            nonce_floor: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API root (e.g. a test server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Continue above a nonce the exchange has already accepted
    pub fn with_nonce_floor(mut self, nonce: u64) -> Self {
        self.nonce_floor = Some(nonce);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitfinex_auth::AuthError;
    use serde_json::json;

    fn params(value: Value) -> Params {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_client_without_credentials() {
        let client = BitfinexRestClient::new();
        assert!(!client.has_credentials());
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(60)
            .with_user_agent("test-agent")
            .with_base_url("http://localhost:8080/v1/")
            .with_nonce_floor(42);

        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
        assert_eq!(config.nonce_floor, Some(42));

        let client = BitfinexRestClient::with_config(config);
        assert_eq!(client.base_url(), "http://localhost:8080/v1");
    }

    #[test]
    fn test_request_prefix() {
        assert_eq!(request_prefix(DEFAULT_BASE_URL), "/v1");
        assert_eq!(request_prefix("http://127.0.0.1:4000"), "");
        assert_eq!(request_prefix("not a url"), "");
    }

    #[test]
    fn test_credentials_lifecycle_shared_by_clones() {
        let client = BitfinexRestClient::new();
        let clone = client.clone();

        client.set_credentials("key", "secret");
        assert!(clone.has_credentials());

        clone.clear_credentials();
        assert!(!client.has_credentials());
    }

    #[test]
    fn test_sign_request_without_credentials() {
        let client = BitfinexRestClient::new();
        let descriptor = endpoints::descriptor("balances").unwrap();

        let err = client.sign_request(descriptor, &Params::new()).unwrap_err();
        assert!(matches!(err, RestError::AuthRequired));
    }

    #[test]
    fn test_validation_precedes_auth_check() {
        let client = BitfinexRestClient::new();
        let descriptor = endpoints::descriptor("place_order").unwrap();

        let err = client
            .sign_request(
                descriptor,
                &params(json!({ "price": "100.0", "side": "buy", "ord_type": "exchange limit" })),
            )
            .unwrap_err();
        assert!(matches!(err, RestError::MissingParameter { parameter: "amount", .. }));
    }

    #[test]
    fn test_sign_request_payload() {
        let config = ClientConfig::new()
            .with_credentials(Credentials::new("K", "S"))
            .with_nonce_floor(4_000_000_000_000_000);
        let client = BitfinexRestClient::with_config(config);
        let descriptor = endpoints::descriptor("cancel_order").unwrap();

        let envelope = client
            .sign_request(descriptor, &params(json!({ "order_id": 446915287 })))
            .unwrap();

        assert_eq!(envelope.api_key, "K");
        assert_eq!(
            envelope.decode_payload().unwrap(),
            json!({
                "request": "/v1/order/cancel",
                "nonce": "4000000000000001",
                "order_id": 446915287,
            })
        );
    }

    #[test]
    fn test_nonces_increase_across_clones() {
        let client = BitfinexRestClient::with_credentials(Credentials::new("K", "S"));
        let clone = client.clone();
        let descriptor = endpoints::descriptor("balances").unwrap();

        let first = client.sign_request(descriptor, &Params::new()).unwrap();
        let second = clone.sign_request(descriptor, &Params::new()).unwrap();

        let nonce = |e: &SignedEnvelope| -> u64 {
            e.decode_payload().unwrap()["nonce"].as_str().unwrap().parse().unwrap()
        };
        assert!(nonce(&second) > nonce(&first));
        assert_eq!(client.nonces().last_issued(), nonce(&second));
    }

    #[test]
    fn test_exhausted_nonce_surfaces_as_auth_error() {
        let config = ClientConfig::new()
            .with_credentials(Credentials::new("K", "S"))
            .with_nonce_floor(u64::MAX);
        let client = BitfinexRestClient::with_config(config);
        let descriptor = endpoints::descriptor("balances").unwrap();

        let err = client.sign_request(descriptor, &Params::new()).unwrap_err();
        assert!(matches!(err, RestError::Auth(AuthError::NonceExhausted)));
        assert!(err.is_auth());
        assert_eq!(client.nonces().last_issued(), u64::MAX);
    }

    #[tokio::test]
    async fn test_unknown_endpoint() {
        let client = BitfinexRestClient::new();
        let err = client.invoke("transfer_everything", Params::new()).await.unwrap_err();
        assert!(matches!(err, RestError::UnknownEndpoint(name) if name == "transfer_everything"));
    }

    #[tokio::test]
    async fn test_auth_required_error() {
        let client = BitfinexRestClient::new();
        let result = client.invoke("balances", Params::new()).await;
        assert!(matches!(result, Err(RestError::AuthRequired)));
    }
}

//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{CatalogApi, OrdersApi};
use crate::error::{ApiError, ApiResult, ErrorContext};
use crate::token::{Clock, Token, TokenManager, TokenResponse};
use crate::trace::{dump_request, dump_response, NoopTracer, Tracer};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method, Request, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// Per-request correlation header expected by the catalog endpoints
pub const CORRELATION_ID_HEADER: &str = "IM-CorrelationID";

/// Ingram Micro reseller API client
///
/// Every business call validates its input, makes sure a live OAuth token is
/// cached, and then issues exactly one HTTP request. Clones share the token
/// cache, so a client can be handed to many tasks.
#[derive(Clone)]
pub struct IngramClient {
    inner: Client,
    config: Arc<ClientConfig>,
    tokens: Arc<TokenManager>,
    tracer: Arc<dyn Tracer>,
}

impl IngramClient {
    /// Create a new client with configuration from the environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|_| ApiError::config("user_agent is not a valid header value"))?,
        );

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
            tokens: Arc::new(TokenManager::default()),
            tracer: Arc::new(NoopTracer),
        })
    }

    /// Send raw request/response dumps to `tracer`
    #[must_use]
    pub fn with_tracer(mut self, tracer: impl Tracer + 'static) -> Self {
        self.tracer = Arc::new(tracer);
        self
    }

    /// Use `clock` for token expiry decisions; resets the token cache
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.tokens = Arc::new(TokenManager::new(clock));
        self
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Base endpoint for business calls
    #[must_use]
    pub fn base_url(&self) -> String {
        self.config.base_url()
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access order endpoints
    #[must_use]
    pub fn orders(&self) -> OrdersApi {
        OrdersApi::new(self.clone())
    }

    /// Access catalog endpoints
    #[must_use]
    pub fn catalog(&self) -> CatalogApi {
        CatalogApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Token lifecycle
    // -------------------------------------------------------------------------

    /// Return a live access token, exchanging credentials when none is cached
    /// or the cached one has expired
    pub async fn access_token(&self) -> ApiResult<Token> {
        self.tokens.get_or_refresh(|| self.request_token()).await
    }

    /// Token currently cached, without refreshing
    pub async fn cached_token(&self) -> Option<Token> {
        self.tokens.cached().await
    }

    /// Forget the cached token so the next call authenticates again
    pub async fn invalidate_token(&self) {
        self.tokens.invalidate().await;
    }

    /// Perform the client-credentials exchange
    #[instrument(skip(self), fields(environment = ?self.config.environment))]
    async fn request_token(&self) -> ApiResult<TokenResponse> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        let request = self
            .inner
            .post(self.config.token_url())
            .form(&form)
            .build()?;

        let (status, body) = self.execute(request).await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Token request rejected");
            return Err(ApiError::auth(status.as_u16(), body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP plumbing
    // -------------------------------------------------------------------------

    /// Resolve `path` against the base endpoint
    pub(crate) fn url(&self, path: &str) -> ApiResult<Url> {
        let raw = format!("{}/{}", self.base_url(), path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// Start a request against an absolute URL
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.inner.request(method, url)
    }

    /// Authorize, send, and decode a JSON response
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let body = self.send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Authorize and send; returns the body of a successful response
    pub(crate) async fn send(&self, request: RequestBuilder) -> ApiResult<String> {
        let token = self.access_token().await?;
        let request = request.header(AUTHORIZATION, token.bearer()).build()?;

        let context = ErrorContext {
            request_id: request
                .headers()
                .get(CORRELATION_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string),
            endpoint: request.url().path().to_string(),
            method: request.method().to_string(),
        };

        let (status, body) = self.execute(request).await?;

        if !status.is_success() {
            warn!(context = %context, status = status.as_u16(), "Upstream rejected request");
            return Err(ApiError::upstream(status.as_u16(), body));
        }

        Ok(body)
    }

    /// Issue exactly one HTTP call and read the full body
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.url().path()))]
    async fn execute(&self, request: Request) -> ApiResult<(StatusCode, String)> {
        self.tracer.record(&dump_request(&request));

        let start = Instant::now();
        let response = self
            .inner
            .execute(request)
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        debug!(
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis(),
            "Response received"
        );

        self.tracer
            .record(&dump_response(status, version, &headers, &body));

        Ok((status, body))
    }

    fn transport_error(&self, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout(self.config.timeout)
        } else {
            ApiError::Transport(error)
        }
    }
}

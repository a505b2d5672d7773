//! OAuth access token lifecycle
//!
//! Tokens come from a client-credentials exchange and are cached in memory
//! until shortly before the server-side expiry. [`TokenManager`] serializes the
//! check-and-refresh sequence so concurrent callers share one exchange.

use crate::error::{ApiError, ApiResult};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Seconds subtracted from `expires_in` so refresh happens before the server expires the token
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// Source of the current time for expiry decisions
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for deterministic expiry handling
#[derive(Debug)]
pub struct ManualClock {
    now: StdMutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Start the clock at `start`
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: StdMutex::new(start),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }

    /// Jump to an absolute instant
    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// `expires_in` as sent by the OAuth endpoint: a numeric string, or a number
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExpiresIn {
    /// JSON number
    Seconds(i64),
    /// Numeric string, e.g. `"86399"`
    Text(String),
}

impl ExpiresIn {
    /// Lifetime in seconds
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Format`] when the text form is not an integer.
    pub fn seconds(&self) -> ApiResult<i64> {
        match self {
            Self::Seconds(secs) => Ok(*secs),
            Self::Text(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ApiError::Format(format!("expires_in is not an integer: {raw:?}"))),
        }
    }
}

/// Body of a successful token exchange
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Bearer credential
    pub access_token: String,
    /// Token type, normally `Bearer`
    #[serde(default)]
    pub token_type: String,
    /// Lifetime as provided by the server
    pub expires_in: ExpiresIn,
}

/// A cached access token with its computed expiry
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    access_token: String,
    token_type: String,
    expires_in: i64,
    issued_at: DateTime<Utc>,
    valid_until: DateTime<Utc>,
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("issued_at", &self.issued_at)
            .field("valid_until", &self.valid_until)
            .finish()
    }
}

impl Token {
    /// Build a token issued at `issued_at`; it stays valid until
    /// `issued_at + expires_in - 60s`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Format`] when `expires_in` cannot be parsed or puts
    /// the expiry outside the representable date range.
    pub fn from_response(response: TokenResponse, issued_at: DateTime<Utc>) -> ApiResult<Self> {
        let expires_in = response.expires_in.seconds()?;
        let valid_until = expires_in
            .checked_sub(EXPIRY_MARGIN_SECS)
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| ApiError::Format(format!("expires_in out of range: {expires_in}")))?;

        Ok(Self {
            access_token: response.access_token,
            token_type: response.token_type,
            expires_in,
            issued_at,
            valid_until,
        })
    }

    /// The raw bearer credential
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Token type reported by the server
    #[must_use]
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Lifetime in seconds as reported by the server
    #[must_use]
    pub fn expires_in(&self) -> i64 {
        self.expires_in
    }

    /// When the exchange completed
    #[must_use]
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// First instant at which the token must no longer be used
    #[must_use]
    pub fn valid_until(&self) -> DateTime<Utc> {
        self.valid_until
    }

    /// Usable strictly before [`Token::valid_until`]
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.valid_until
    }

    /// `Authorization` header value
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Caches one token and refreshes it on demand
pub struct TokenManager {
    cached: Mutex<Option<Token>>,
    clock: Arc<dyn Clock>,
}

impl Default for TokenManager {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl TokenManager {
    /// Create an empty manager using `clock` for expiry checks
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            cached: Mutex::new(None),
            clock,
        }
    }

    /// Clock used for expiry checks
    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Return the cached token, running `fetch` first when it is missing or expired
    ///
    /// The lock is held across `fetch`, so concurrent callers wait for the
    /// in-flight exchange and then reuse its token. When `fetch` fails or the
    /// future is dropped the cache is left as it was.
    pub async fn get_or_refresh<F, Fut>(&self, fetch: F) -> ApiResult<Token>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<TokenResponse>>,
    {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_valid_at(self.clock.now()) {
                return Ok(token.clone());
            }
            debug!(valid_until = %token.valid_until, "Cached token expired");
        }

        let response = fetch().await?;
        let token = Token::from_response(response, self.clock.now())?;

        info!(
            token_type = %token.token_type,
            expires_in = token.expires_in,
            valid_until = %token.valid_until,
            "Obtained new access token"
        );

        *cached = Some(token.clone());
        Ok(token)
    }

    /// Current token without refreshing
    pub async fn cached(&self) -> Option<Token> {
        self.cached.lock().await.clone()
    }

    /// Drop the cached token so the next call re-authenticates
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }
}

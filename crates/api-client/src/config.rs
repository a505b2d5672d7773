//! Configuration for the Ingram Micro API client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;

/// Default production API host
pub const DEFAULT_API_HOST: &str = "https://api.ingrammicro.com";

/// Path suffix appended to the host for sandbox business endpoints
const SANDBOX_SUFFIX: &str = "/sandbox";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Target environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Vendor sandbox (`/sandbox` endpoints, OAuth 2.0 token path)
    Sandbox,
    /// Live production API
    #[default]
    Production,
}

impl Environment {
    /// Parse an environment name; anything unrecognised means production
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "sandbox" | "test" | "dev" => Self::Sandbox,
            _ => Self::Production,
        }
    }

    /// OAuth token endpoint version segment
    #[must_use]
    pub fn oauth_version(self) -> &'static str {
        match self {
            Self::Sandbox => "20",
            Self::Production => "30",
        }
    }
}

/// Client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    #[serde(skip_serializing, default)]
    pub client_secret: String,
    /// Target environment
    #[serde(default)]
    pub environment: Environment,
    /// API host, without the sandbox suffix
    #[serde(default = "default_api_host")]
    pub api_host: String,
    /// Request timeout
    #[serde(with = "duration_secs", default = "default_timeout")]
    pub timeout: Duration,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_user_agent() -> String {
    format!("ingram-api-client/{}", env!("CARGO_PKG_VERSION"))
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("environment", &self.environment)
            .field("api_host", &self.api_host)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Create a production configuration for the given credentials
    #[must_use]
    pub fn production(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            environment: Environment::Production,
            api_host: default_api_host(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }

    /// Create a sandbox configuration for the given credentials
    #[must_use]
    pub fn sandbox(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self::production(client_id, client_secret).with_environment(Environment::Sandbox)
    }

    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `INGRAM_CLIENT_ID`: OAuth client ID (required)
    /// - `INGRAM_CLIENT_SECRET`: OAuth client secret (required)
    /// - `INGRAM_ENV`: `sandbox` or `production` (default production)
    /// - `INGRAM_API_URL`: API host override
    /// - `INGRAM_TIMEOUT_SECS`: Request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id =
            lookup("INGRAM_CLIENT_ID").ok_or_else(|| ApiError::missing_env("INGRAM_CLIENT_ID"))?;
        let client_secret = lookup("INGRAM_CLIENT_SECRET")
            .ok_or_else(|| ApiError::missing_env("INGRAM_CLIENT_SECRET"))?;

        let environment = lookup("INGRAM_ENV")
            .map(|v| Environment::parse(&v))
            .unwrap_or_default();

        let api_host = lookup("INGRAM_API_URL").unwrap_or_else(default_api_host);

        let timeout = match lookup("INGRAM_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ApiError::config(format!("INGRAM_TIMEOUT_SECS is not a number: {raw}")))?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            client_id,
            client_secret,
            environment,
            api_host,
            timeout,
            user_agent: default_user_agent(),
        })
    }

    /// Whether the sandbox environment is selected
    #[must_use]
    pub fn is_sandbox(&self) -> bool {
        self.environment == Environment::Sandbox
    }

    /// Base endpoint for business calls (`/sandbox`-suffixed in the sandbox)
    #[must_use]
    pub fn base_url(&self) -> String {
        let host = self.api_host.trim_end_matches('/');
        if self.is_sandbox() {
            format!("{host}{SANDBOX_SUFFIX}")
        } else {
            host.to_string()
        }
    }

    /// OAuth token endpoint; rooted at the host in both environments
    #[must_use]
    pub fn token_url(&self) -> String {
        format!(
            "{}/oauth/oauth{}/token",
            self.api_host.trim_end_matches('/'),
            self.environment.oauth_version()
        )
    }

    /// Builder-style method to set the environment
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Builder-style method to set the API host
    #[must_use]
    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the user agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.client_id.trim().is_empty() {
            return Err(ApiError::config("client_id cannot be empty"));
        }

        if self.client_secret.trim().is_empty() {
            return Err(ApiError::config("client_secret cannot be empty"));
        }

        if !self.api_host.starts_with("http://") && !self.api_host.starts_with("https://") {
            return Err(ApiError::config("api_host must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_production_endpoints() {
        let config = ClientConfig::production("id", "secret");
        assert_eq!(config.base_url(), "https://api.ingrammicro.com");
        assert_eq!(
            config.token_url(),
            "https://api.ingrammicro.com/oauth/oauth30/token"
        );
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_sandbox_endpoints() {
        let config = ClientConfig::sandbox("id", "secret");
        assert!(config.is_sandbox());
        assert_eq!(config.base_url(), "https://api.ingrammicro.com/sandbox");
        assert_eq!(
            config.token_url(),
            "https://api.ingrammicro.com/oauth/oauth20/token"
        );
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::production("id", "secret")
            .with_api_host("http://127.0.0.1:8080/")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_from_vars() {
        let config = ClientConfig::from_vars(vars(&[
            ("INGRAM_CLIENT_ID", "abc"),
            ("INGRAM_CLIENT_SECRET", "xyz"),
            ("INGRAM_ENV", "Sandbox"),
            ("INGRAM_TIMEOUT_SECS", "12"),
        ]))
        .unwrap();

        assert_eq!(config.client_id, "abc");
        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.api_host, DEFAULT_API_HOST);
    }

    #[test]
    fn test_from_vars_missing_secret() {
        let err = ClientConfig::from_vars(vars(&[("INGRAM_CLIENT_ID", "abc")])).unwrap_err();
        assert!(matches!(err, ApiError::MissingEnvVar(ref v) if v == "INGRAM_CLIENT_SECRET"));
    }

    #[test]
    fn test_from_vars_bad_timeout() {
        let err = ClientConfig::from_vars(vars(&[
            ("INGRAM_CLIENT_ID", "abc"),
            ("INGRAM_CLIENT_SECRET", "xyz"),
            ("INGRAM_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::production("id", "secret").validate().is_ok());
        assert!(ClientConfig::production("", "secret").validate().is_err());
        assert!(ClientConfig::production("id", " ").validate().is_err());
        assert!(
            ClientConfig::production("id", "secret")
                .with_api_host("ftp://example.com")
                .validate()
                .is_err()
        );
        assert!(
            ClientConfig::production("id", "secret")
                .with_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_secret_never_serialized_or_debugged() {
        let config = ClientConfig::production("id", "top-secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("top-secret"));
        assert!(json.contains("\"timeout\":30"));
        assert!(!format!("{config:?}").contains("top-secret"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"client_id": "id", "client_secret": "s", "environment": "sandbox"}"#,
        )
        .unwrap();
        assert!(config.is_sandbox());
        assert_eq!(config.api_host, DEFAULT_API_HOST);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}

//! Error types for the API client

use ingram_core::ValidationError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request payload violated its field rules; nothing was sent
    #[error("Validation failed: {}", join_violations(.0))]
    Validation(Vec<ValidationError>),

    /// OAuth token exchange was rejected
    #[error("Token request failed ({status}): {message}")]
    Auth {
        /// HTTP status code from the OAuth endpoint
        status: u16,
        /// Response body text
        message: String,
    },

    /// A numeric field in a trusted response could not be parsed
    #[error("Malformed response field: {0}")]
    Format(String),

    /// Business endpoint returned a non-success status
    #[error("Upstream error ({status}): {body}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Response body was not the expected JSON shape
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Network-level failure reaching the host
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request timeout
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

fn join_violations(violations: &[ValidationError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing env var error
    pub fn missing_env(var: impl Into<String>) -> Self {
        Self::MissingEnvVar(var.into())
    }

    /// Create an upstream rejection error
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    /// Create a token exchange error
    pub fn auth(status: u16, message: impl Into<String>) -> Self {
        Self::Auth {
            status,
            message: message.into(),
        }
    }

    /// HTTP status carried by the error, if the server answered
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. } | Self::Upstream { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a pre-flight validation failure
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Violated fields of a validation failure
    #[must_use]
    pub fn violations(&self) -> &[ValidationError] {
        match self {
            Self::Validation(violations) => violations,
            _ => &[],
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Upstream { status, .. } | Self::Auth { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Upstream { status, .. } | Self::Auth { status, .. } if *status >= 500)
    }
}

impl From<Vec<ValidationError>> for ApiError {
    fn from(violations: Vec<ValidationError>) -> Self {
        Self::Validation(violations)
    }
}

/// Error context for better debugging
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Correlation ID sent with the request, when one was attached
    pub request_id: Option<String>,
    /// Endpoint that was called
    pub endpoint: String,
    /// HTTP method used
    pub method: String,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.endpoint)?;
        if let Some(ref id) = self.request_id {
            write!(f, " (request_id: {id})")?;
        }
        Ok(())
    }
}

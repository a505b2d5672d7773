//! Client for the Ingram Micro reseller REST API
//!
//! This crate wraps order management and catalog lookups behind typed,
//! validated calls, and handles OAuth client-credentials authentication.
//!
//! # Features
//!
//! - **Environment-based configuration**: Load credentials and target environment from variables
//! - **Token caching**: One OAuth exchange shared by every clone of a client, refreshed a minute before expiry
//! - **Local validation**: Malformed requests are rejected before any network call
//! - **Traffic dumps**: Optional raw request/response tracing with credentials masked
//! - **Webhooks**: Decode order status push notifications
//!
//! # Example
//!
//! ```rust,no_run
//! use ingram_api_client::{ClientConfig, IngramClient};
//! use ingram_api_client::endpoints::orders::OrderDetailRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = IngramClient::with_config(ClientConfig::sandbox("client-id", "client-secret"))?;
//!
//!     let order = client
//!         .orders()
//!         .detail(&OrderDetailRequest::new("20-RD128", "20-222222", "US"))
//!         .await?;
//!     println!("Order status: {}", order.detail().order_status);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod token;
pub mod trace;
pub mod webhook;

pub use client::IngramClient;
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, ApiResult};
pub use token::{Clock, ManualClock, SystemClock, Token};
pub use trace::{LogTracer, NoopTracer, Tracer};
pub use webhook::Webhook;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::IngramClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::catalog::{PriceAndAvailabilityRequest, ProductLookup};
    pub use crate::endpoints::orders::{
        OrderCreateDetails, OrderCreateRequest, OrderDetailRequest, OrderLine, ShipToAddress,
    };
    pub use crate::endpoints::{CatalogApi, OrdersApi};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::webhook::Webhook;
}

//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for a specific set of reseller endpoints.
//!
//! ## Mapping to the Ingram Micro reseller API
//!
//! | Module | Endpoint | Description |
//! |--------|----------|-------------|
//! | `orders` | `GET /resellers/v5/orders/{orderNumber}` | Order detail lookup |
//! | `orders` | `POST /resellers/v5/orders` | Order creation |
//! | `catalog` | `POST /resellers/v6/catalog/priceandavailability` | Price and availability |

pub mod catalog;
pub mod orders;

pub use catalog::CatalogApi;
pub use orders::OrdersApi;

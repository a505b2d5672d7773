//! Core building blocks for the Ingram Micro API client
//!
//! This crate holds functionality that is independent of the HTTP layer:
//!
//! - **Validation**: declarative per-field rules (required, min/max length,
//!   numeric ranges, nested structures) evaluated before a request is sent
//!
//! # Example
//!
//! ```rust
//! use ingram_core::validation::{Validate, ValidationResult, Validator};
//!
//! struct OrderLookup {
//!     order_number: String,
//! }
//!
//! impl Validate for OrderLookup {
//!     fn validate(&self) -> ValidationResult {
//!         Validator::new()
//!             .required("ordernumber", &self.order_number)
//!             .validate()
//!     }
//! }
//!
//! let lookup = OrderLookup { order_number: String::new() };
//! assert!(!lookup.validate().is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod validation;

pub use validation::{Validate, ValidationError, ValidationResult, Validator};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::validation::{Validate, ValidationError, ValidationResult, Validator};
}

//! Product catalog API endpoints (v6)
//!
//! Price and availability lookups for one or more parts.

use crate::client::{IngramClient, CORRELATION_ID_HEADER};
use crate::error::ApiResult;
use ingram_core::{Validate, ValidationResult, Validator};
use reqwest::header::HeaderValue;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

const PRICE_AND_AVAILABILITY_PATH: &str = "resellers/v6/catalog/priceandavailability";

/// Most products accepted by a single lookup
pub const MAX_PRODUCTS_PER_LOOKUP: usize = 50;

/// Catalog API interface
#[derive(Clone)]
pub struct CatalogApi {
    client: IngramClient,
}

impl CatalogApi {
    /// Create a new catalog API interface
    pub(crate) fn new(client: IngramClient) -> Self {
        Self { client }
    }

    /// Look up price and availability
    ///
    /// POST /resellers/v6/catalog/priceandavailability
    ///
    /// Each call carries a fresh `IM-CorrelationID`.
    #[instrument(skip(self, request), fields(products = request.products.len()))]
    pub async fn price_and_availability(
        &self,
        request: &PriceAndAvailabilityRequest,
    ) -> ApiResult<Vec<ProductPriceAndAvailability>> {
        request.validate().into_result()?;

        let mut url = self.client.url(PRICE_AND_AVAILABILITY_PATH)?;
        url.query_pairs_mut()
            .append_pair("includeAvailability", bool_str(request.include_availability))
            .append_pair("includePricing", bool_str(request.include_pricing));

        let builder = self
            .client
            .request(Method::POST, url)
            .header("IM-CustomerNumber", request.customer_number.as_str())
            .header("IM-CountryCode", request.iso_country_code.as_str())
            .header(CORRELATION_ID_HEADER, Uuid::new_v4().to_string())
            .json(&LookupBody {
                products: &request.products,
            });

        self.client.send_json(builder).await
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Serialize)]
struct LookupBody<'a> {
    products: &'a [ProductLookup],
}

/// Price and availability lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceAndAvailabilityRequest {
    /// Include warehouse stock in the response
    pub include_availability: bool,
    /// Include reseller pricing in the response
    pub include_pricing: bool,
    /// Reseller customer number
    pub customer_number: String,
    /// Two-letter ISO country code
    pub iso_country_code: String,
    /// Parts to look up
    pub products: Vec<ProductLookup>,
}

impl PriceAndAvailabilityRequest {
    /// Create an empty lookup that asks for both pricing and availability
    pub fn new(customer_number: impl Into<String>, iso_country_code: impl Into<String>) -> Self {
        Self {
            include_availability: true,
            include_pricing: true,
            customer_number: customer_number.into(),
            iso_country_code: iso_country_code.into(),
            products: Vec::new(),
        }
    }

    /// Lookup for a single Ingram part number
    pub fn single(
        customer_number: impl Into<String>,
        iso_country_code: impl Into<String>,
        ingram_part_number: impl Into<String>,
    ) -> Self {
        Self::new(customer_number, iso_country_code).with_product(ProductLookup::new(ingram_part_number))
    }

    /// Add a part to the lookup
    #[must_use]
    pub fn with_product(mut self, product: ProductLookup) -> Self {
        self.products.push(product);
        self
    }

    /// Builder-style method to toggle availability
    #[must_use]
    pub fn with_availability(mut self, include: bool) -> Self {
        self.include_availability = include;
        self
    }

    /// Builder-style method to toggle pricing
    #[must_use]
    pub fn with_pricing(mut self, include: bool) -> Self {
        self.include_pricing = include;
        self
    }
}

impl Validate for PriceAndAvailabilityRequest {
    fn validate(&self) -> ValidationResult {
        let count = self.products.len();

        Validator::new()
            .required("customernumber", &self.customer_number)
            .custom("customernumber", || header_safe(&self.customer_number))
            .required("isocountrycode", &self.iso_country_code)
            .custom("isocountrycode", || header_safe(&self.iso_country_code))
            .custom("products", || {
                (count == 0 || count > MAX_PRODUCTS_PER_LOOKUP).then(|| {
                    format!("Must contain between 1 and {MAX_PRODUCTS_PER_LOOKUP} products, got {count}")
                })
            })
            .each("products", &self.products)
            .validate()
    }
}

/// Both account fields travel as request headers
fn header_safe(value: &str) -> Option<String> {
    HeaderValue::from_str(value)
        .is_err()
        .then(|| "Must not contain control characters".to_string())
}

/// One part in a lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLookup {
    pub ingram_part_number: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vendor_part_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub customer_part_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub upc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub quantity_requested: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub additional_attributes: Vec<AdditionalAttribute>,
}

impl ProductLookup {
    /// Look up by Ingram part number
    pub fn new(ingram_part_number: impl Into<String>) -> Self {
        Self {
            ingram_part_number: ingram_part_number.into(),
            ..Self::default()
        }
    }
}

impl Validate for ProductLookup {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .required("ingramPartNumber", &self.ingram_part_number)
            .validate()
    }
}

/// Name/value attribute on a lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalAttribute {
    pub attribute_name: String,
    pub attribute_value: String,
}

// ============================================================================
// Response Types
// ============================================================================

/// Price and availability of one part
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPriceAndAvailability {
    pub product_status_code: String,
    pub product_status_message: String,
    pub ingram_part_number: String,
    pub vendor_part_number: String,
    pub customer_part_number: String,
    pub upc: String,
    pub part_number_type: String,
    pub vendor_name: String,
    pub vendor_number: String,
    pub description: String,
    pub product_class: String,
    #[serde(rename = "UOM")]
    pub uom: String,
    pub product_status: String,
    pub accept_back_order: bool,
    pub product_authorized: bool,
    pub returnable_product: bool,
    pub end_user_info_required: bool,
    pub govt_special_price_available: bool,
    pub govt_program_type: String,
    pub govt_end_user_type: String,
    pub availability: Option<Availability>,
    pub pricing: Option<Pricing>,
}

/// Stock summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Availability {
    pub available: bool,
    pub total_availability: i64,
    pub availability_by_warehouse: Vec<AvailabilityByWarehouse>,
}

/// Stock at one warehouse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvailabilityByWarehouse {
    pub location: String,
    pub warehouse_id: String,
    pub quantity_available: i64,
    pub quantity_backordered: i64,
    pub quantity_backordered_eta: String,
}

/// Reseller pricing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pricing {
    pub currency_code: String,
    pub retail_price: f64,
    pub map_price: f64,
    pub customer_price: f64,
    pub special_bid_pricing_available: bool,
    pub web_discounts_available: bool,
}

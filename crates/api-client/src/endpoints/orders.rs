//! Orders API endpoints (v5)
//!
//! - Get the detail of an existing order
//! - Create a new order, either decoding the order summary or only checking
//!   that the vendor accepted it

use crate::client::IngramClient;
use crate::error::{ApiError, ApiResult};
use ingram_core::{Validate, ValidationResult, Validator};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;

const ORDERS_PATH: &str = "resellers/v5/orders";

/// Orders API interface
#[derive(Clone)]
pub struct OrdersApi {
    client: IngramClient,
}

impl OrdersApi {
    /// Create a new orders API interface
    pub(crate) fn new(client: IngramClient) -> Self {
        Self { client }
    }

    /// Fetch an order's detail
    ///
    /// GET /resellers/v5/orders/{orderNumber}?customernumber=..&isocountrycode=..
    #[instrument(skip(self, request), fields(order_number = %request.order_number))]
    pub async fn detail(&self, request: &OrderDetailRequest) -> ApiResult<OrderDetailEnvelope> {
        request.validate().into_result()?;

        let mut url = self.client.url(ORDERS_PATH)?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(ORDERS_PATH.to_string()))?
            .push(&request.order_number);
        url.query_pairs_mut()
            .append_pair("customernumber", &request.customer_number)
            .append_pair("isocountrycode", &request.iso_country_code);

        self.client
            .send_json(self.client.request(Method::GET, url))
            .await
    }

    /// Create an order and decode the order summary
    ///
    /// POST /resellers/v5/orders
    #[instrument(skip(self, order), fields(po = %order.order_create_details.customer_po_number))]
    pub async fn create(&self, order: &OrderCreateRequest) -> ApiResult<OrderCreateEnvelope> {
        order.validate().into_result()?;
        self.client.send_json(self.create_request(order)?).await
    }

    /// Create an order, only checking that the vendor accepted it
    ///
    /// The response body is not parsed.
    #[instrument(skip(self, order), fields(po = %order.order_create_details.customer_po_number))]
    pub async fn submit(&self, order: &OrderCreateRequest) -> ApiResult<()> {
        order.validate().into_result()?;
        self.client.send(self.create_request(order)?).await?;
        Ok(())
    }

    fn create_request(&self, order: &OrderCreateRequest) -> ApiResult<reqwest::RequestBuilder> {
        let url = self.client.url(ORDERS_PATH)?;
        let body = CreateOrderBody {
            order_create_request: order,
        };
        Ok(self.client.request(Method::POST, url).json(&body))
    }
}

// ============================================================================
// Order detail
// ============================================================================

/// Parameters for an order detail lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDetailRequest {
    /// Ingram order number
    pub order_number: String,
    /// Reseller customer number
    pub customer_number: String,
    /// Two-letter ISO country code
    pub iso_country_code: String,
}

impl OrderDetailRequest {
    /// Create a new lookup
    pub fn new(
        order_number: impl Into<String>,
        customer_number: impl Into<String>,
        iso_country_code: impl Into<String>,
    ) -> Self {
        Self {
            order_number: order_number.into(),
            customer_number: customer_number.into(),
            iso_country_code: iso_country_code.into(),
        }
    }
}

impl Validate for OrderDetailRequest {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .required("ordernumber", &self.order_number)
            .required("customernumber", &self.customer_number)
            .required("isocountrycode", &self.iso_country_code)
            .validate()
    }
}

/// Order detail response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetailEnvelope {
    #[serde(rename = "serviceresponse")]
    pub service_response: OrderDetailServiceResponse,
}

impl OrderDetailEnvelope {
    /// The order itself
    #[must_use]
    pub fn detail(&self) -> &OrderDetail {
        &self.service_response.order_detail_response
    }
}

/// Service response wrapping an order detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetailServiceResponse {
    #[serde(rename = "responsepreamble", default)]
    pub response_preamble: ResponsePreamble,
    #[serde(rename = "orderdetailresponse")]
    pub order_detail_response: OrderDetail,
}

/// Status block present on every v5 response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsePreamble {
    #[serde(rename = "responsestatus")]
    pub response_status: String,
    #[serde(rename = "statuscode")]
    pub status_code: String,
    #[serde(rename = "responsemessage")]
    pub response_message: String,
}

/// Order detail
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderDetail {
    #[serde(rename = "ordernumber")]
    pub order_number: String,
    #[serde(rename = "ordertype")]
    pub order_type: String,
    #[serde(rename = "customerordernumber")]
    pub customer_order_number: String,
    #[serde(rename = "enduserponumber")]
    pub end_user_po_number: String,
    #[serde(rename = "orderstatus")]
    pub order_status: String,
    #[serde(rename = "entrytimestamp")]
    pub entry_timestamp: Option<String>,
    #[serde(rename = "entrymethoddescription")]
    pub entry_method_description: String,
    #[serde(rename = "ordertotalvalue")]
    pub order_total_value: f64,
    #[serde(rename = "ordersubtotal")]
    pub order_sub_total: f64,
    #[serde(rename = "freightamount")]
    pub freight_amount: String,
    #[serde(rename = "currencycode")]
    pub currency_code: String,
    #[serde(rename = "totalweight")]
    pub total_weight: String,
    #[serde(rename = "totaltax")]
    pub total_tax: String,
    #[serde(rename = "billtoaddress")]
    pub bill_to_address: Option<OrderAddress>,
    #[serde(rename = "shiptoaddress")]
    pub ship_to_address: Option<OrderAddress>,
    pub lines: Vec<OrderDetailLine>,
    #[serde(rename = "commentlines")]
    pub comment_lines: Vec<CommentLine>,
    #[serde(rename = "miscfeeline")]
    pub misc_fee_lines: Vec<MiscFeeLine>,
    #[serde(rename = "extendedspecs")]
    pub extended_specs: Vec<ExtendedSpec>,
}

/// Address on an existing order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderAddress {
    pub suffix: String,
    pub name: String,
    pub attention: String,
    #[serde(rename = "addressline1")]
    pub address_line1: String,
    #[serde(rename = "addressline2")]
    pub address_line2: String,
    #[serde(rename = "addressline3")]
    pub address_line3: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "postalcode")]
    pub postal_code: String,
    #[serde(rename = "countrycode")]
    pub country_code: String,
}

/// Product line on an existing order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderDetailLine {
    #[serde(rename = "linenumber")]
    pub line_number: String,
    #[serde(rename = "globallinenumber")]
    pub global_line_number: String,
    #[serde(rename = "ordersuffix")]
    pub order_suffix: String,
    #[serde(rename = "erpordernumber")]
    pub erp_order_number: String,
    #[serde(rename = "linestatus")]
    pub line_status: String,
    #[serde(rename = "partnumber")]
    pub part_number: String,
    #[serde(rename = "manufacturerpartnumber")]
    pub manufacturer_part_number: String,
    #[serde(rename = "vendorname")]
    pub vendor_name: String,
    #[serde(rename = "vendorcode")]
    pub vendor_code: String,
    #[serde(rename = "partdescription1")]
    pub part_description1: String,
    #[serde(rename = "partdescription2")]
    pub part_description2: String,
    #[serde(rename = "unitweight")]
    pub unit_weight: String,
    #[serde(rename = "unitprice")]
    pub unit_price: f64,
    #[serde(rename = "extendedprice")]
    pub extended_price: f64,
    #[serde(rename = "taxamount")]
    pub tax_amount: f64,
    #[serde(rename = "requestedquantity")]
    pub requested_quantity: String,
    #[serde(rename = "confirmedquantity")]
    pub confirmed_quantity: String,
    #[serde(rename = "backorderquantity")]
    pub backorder_quantity: String,
}

/// Free-text comment on an order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentLine {
    #[serde(rename = "commenttext1")]
    pub comment_text1: String,
    #[serde(rename = "commenttext2")]
    pub comment_text2: String,
}

/// Miscellaneous fee charged on an order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiscFeeLine {
    pub description: String,
    #[serde(rename = "chargeamount")]
    pub charge_amount: String,
}

/// Name/value attribute attached to orders and lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedSpec {
    #[serde(rename = "attributename")]
    pub attribute_name: String,
    #[serde(rename = "attributevalue")]
    pub attribute_value: String,
}

// ============================================================================
// Order create
// ============================================================================

#[derive(Serialize)]
struct CreateOrderBody<'a> {
    #[serde(rename = "ordercreaterequest")]
    order_create_request: &'a OrderCreateRequest,
}

/// Order creation request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderCreateRequest {
    #[serde(rename = "requestpreamble")]
    pub request_preamble: RequestPreamble,
    #[serde(rename = "ordercreatedetails")]
    pub order_create_details: OrderCreateDetails,
}

impl OrderCreateRequest {
    /// Create a request for the given reseller account
    pub fn new(
        customer_number: impl Into<String>,
        iso_country_code: impl Into<String>,
        details: OrderCreateDetails,
    ) -> Self {
        Self {
            request_preamble: RequestPreamble {
                customer_number: customer_number.into(),
                iso_country_code: iso_country_code.into(),
            },
            order_create_details: details,
        }
    }
}

impl Validate for OrderCreateRequest {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .nested("requestpreamble", &self.request_preamble)
            .nested("ordercreatedetails", &self.order_create_details)
            .validate()
    }
}

/// Reseller account the order is placed for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPreamble {
    #[serde(rename = "isocountrycode")]
    pub iso_country_code: String,
    #[serde(rename = "customernumber")]
    pub customer_number: String,
}

impl Validate for RequestPreamble {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .required("isocountrycode", &self.iso_country_code)
            .max_length("isocountrycode", &self.iso_country_code, 2)
            .required("customernumber", &self.customer_number)
            .validate()
    }
}

/// Order header, ship-to and lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderCreateDetails {
    #[serde(rename = "customerponumber")]
    pub customer_po_number: String,
    #[serde(rename = "ordertype", skip_serializing_if = "Option::is_none", default)]
    pub order_type: Option<String>,
    #[serde(rename = "enduserordernumber", skip_serializing_if = "Option::is_none", default)]
    pub end_user_order_number: Option<String>,
    #[serde(rename = "billtosuffix", skip_serializing_if = "Option::is_none", default)]
    pub bill_to_suffix: Option<String>,
    #[serde(rename = "shiptosuffix", skip_serializing_if = "Option::is_none", default)]
    pub ship_to_suffix: Option<String>,
    #[serde(rename = "shiptoaddress", skip_serializing_if = "Option::is_none", default)]
    pub ship_to_address: Option<ShipToAddress>,
    #[serde(rename = "carriercode", skip_serializing_if = "Option::is_none", default)]
    pub carrier_code: Option<String>,
    // Vendor spelling
    #[serde(
        rename = "thirdpartyfrieghtaccountnumber",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub third_party_freight_account_number: Option<String>,
    #[serde(rename = "specialbidnumber", skip_serializing_if = "Option::is_none", default)]
    pub special_bid_number: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub lines: Vec<OrderLine>,
    #[serde(rename = "extendedspecs", skip_serializing_if = "Vec::is_empty", default)]
    pub extended_specs: Vec<ExtendedSpec>,
}

impl OrderCreateDetails {
    /// Start an order with the customer's purchase order number
    pub fn new(customer_po_number: impl Into<String>) -> Self {
        Self {
            customer_po_number: customer_po_number.into(),
            ..Self::default()
        }
    }

    /// Ship to an explicit address
    #[must_use]
    pub fn with_ship_to(mut self, address: ShipToAddress) -> Self {
        self.ship_to_address = Some(address);
        self
    }

    /// Append a line
    #[must_use]
    pub fn with_line(mut self, line: OrderLine) -> Self {
        self.lines.push(line);
        self
    }
}

impl Validate for OrderCreateDetails {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .min_length("customerponumber", &self.customer_po_number, 1)
            .max_length("customerponumber", &self.customer_po_number, 18)
            .max_length(
                "enduserordernumber",
                self.end_user_order_number.as_deref().unwrap_or_default(),
                18,
            )
            .max_length("billtosuffix", self.bill_to_suffix.as_deref().unwrap_or_default(), 3)
            .max_length("shiptosuffix", self.ship_to_suffix.as_deref().unwrap_or_default(), 3)
            .max_length("carriercode", self.carrier_code.as_deref().unwrap_or_default(), 2)
            .nested("shiptoaddress", &self.ship_to_address)
            .each("lines", &self.lines)
            .validate()
    }
}

/// Ship-to address for a new order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipToAddress {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub attention: Option<String>,
    #[serde(rename = "addressline1")]
    pub address_line1: String,
    #[serde(rename = "addressline2", skip_serializing_if = "Option::is_none", default)]
    pub address_line2: Option<String>,
    #[serde(rename = "addressline3", skip_serializing_if = "Option::is_none", default)]
    pub address_line3: Option<String>,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub state: Option<String>,
    #[serde(rename = "postalcode")]
    pub postal_code: String,
    #[serde(rename = "countrycode")]
    pub country_code: String,
}

impl ShipToAddress {
    /// Address with the mandatory fields set
    pub fn new(
        address_line1: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            address_line1: address_line1.into(),
            city: city.into(),
            postal_code: postal_code.into(),
            country_code: country_code.into(),
            ..Self::default()
        }
    }
}

impl Validate for ShipToAddress {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .max_length("attention", self.attention.as_deref().unwrap_or_default(), 35)
            .required("addressline1", &self.address_line1)
            .max_length("addressline1", &self.address_line1, 35)
            .max_length("addressline2", self.address_line2.as_deref().unwrap_or_default(), 35)
            .max_length("addressline3", self.address_line3.as_deref().unwrap_or_default(), 35)
            .required("city", &self.city)
            .max_length("city", &self.city, 21)
            .max_length("state", self.state.as_deref().unwrap_or_default(), 2)
            .required("postalcode", &self.postal_code)
            .max_length("postalcode", &self.postal_code, 9)
            .required("countrycode", &self.country_code)
            .max_length("countrycode", &self.country_code, 2)
            .validate()
    }
}

/// Kind of order line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineType {
    /// Product position
    #[serde(rename = "P")]
    Product,
    /// Comment line
    #[serde(rename = "C")]
    Comment,
}

/// Line on a new order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "linetype", skip_serializing_if = "Option::is_none", default)]
    pub line_type: Option<LineType>,
    #[serde(rename = "linenumber", skip_serializing_if = "Option::is_none", default)]
    pub line_number: Option<String>,
    #[serde(rename = "ingrampartnumber", skip_serializing_if = "Option::is_none", default)]
    pub ingram_part_number: Option<String>,
    pub quantity: u32,
    #[serde(rename = "vendorpartnumber", skip_serializing_if = "Option::is_none", default)]
    pub vendor_part_number: Option<String>,
    #[serde(rename = "customerpartnumber", skip_serializing_if = "Option::is_none", default)]
    pub customer_part_number: Option<String>,
    #[serde(rename = "UPCCode", skip_serializing_if = "Option::is_none", default)]
    pub upc_code: Option<String>,
    #[serde(rename = "warehouseid", skip_serializing_if = "Option::is_none", default)]
    pub warehouse_id: Option<String>,
    #[serde(rename = "enduserprice", skip_serializing_if = "Option::is_none", default)]
    pub end_user_price: Option<f64>,
    #[serde(rename = "unitprice", skip_serializing_if = "Option::is_none", default)]
    pub unit_price: Option<f64>,
    #[serde(rename = "enduser", skip_serializing_if = "Option::is_none", default)]
    pub end_user: Option<EndUser>,
    #[serde(rename = "productextendedspecs", skip_serializing_if = "Vec::is_empty", default)]
    pub product_extended_specs: Vec<ExtendedSpec>,
}

impl OrderLine {
    /// Product line for an Ingram part number
    pub fn product(ingram_part_number: impl Into<String>, quantity: u32) -> Self {
        Self {
            line_type: Some(LineType::Product),
            ingram_part_number: Some(ingram_part_number.into()),
            quantity,
            ..Self::default()
        }
    }

    /// Builder-style method to set the line number
    #[must_use]
    pub fn with_line_number(mut self, line_number: impl Into<String>) -> Self {
        self.line_number = Some(line_number.into());
        self
    }
}

impl Validate for OrderLine {
    fn validate(&self) -> ValidationResult {
        let is_product = self.line_type != Some(LineType::Comment);
        let has_part = [&self.ingram_part_number, &self.vendor_part_number]
            .iter()
            .any(|part| part.as_deref().is_some_and(|p| !p.trim().is_empty()));

        Validator::new()
            .custom("quantity", || {
                (is_product && self.quantity == 0).then(|| "Must be at least 1".to_string())
            })
            .custom("ingrampartnumber", || {
                (is_product && !has_part)
                    .then(|| "Ingram or vendor part number is required".to_string())
            })
            .validate()
    }
}

/// End customer receiving the goods
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndUser {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    #[serde(rename = "addressline1", skip_serializing_if = "Option::is_none", default)]
    pub address_line1: Option<String>,
    #[serde(rename = "addressline2", skip_serializing_if = "Option::is_none", default)]
    pub address_line2: Option<String>,
    #[serde(rename = "addressline3", skip_serializing_if = "Option::is_none", default)]
    pub address_line3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub state: Option<String>,
    #[serde(rename = "postalcode", skip_serializing_if = "Option::is_none", default)]
    pub postal_code: Option<String>,
    #[serde(rename = "countrycode", skip_serializing_if = "Option::is_none", default)]
    pub country_code: Option<String>,
    #[serde(rename = "phonenumber", skip_serializing_if = "Option::is_none", default)]
    pub phone_number: Option<String>,
    #[serde(rename = "extensionnumber", skip_serializing_if = "Option::is_none", default)]
    pub extension_number: Option<String>,
    #[serde(rename = "faxnumber", skip_serializing_if = "Option::is_none", default)]
    pub fax_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
}

/// Order creation response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreateEnvelope {
    #[serde(rename = "serviceresponse")]
    pub service_response: OrderCreateServiceResponse,
}

impl OrderCreateEnvelope {
    /// Orders created by the request; the vendor may split one request into several
    #[must_use]
    pub fn orders(&self) -> &[OrderCreateResponse] {
        &self.service_response.order_summary.order_create_responses
    }
}

/// Service response wrapping an order summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreateServiceResponse {
    #[serde(rename = "responsepreamble", default)]
    pub response_preamble: ResponsePreamble,
    #[serde(rename = "ordersummary", default)]
    pub order_summary: OrderSummary,
}

/// Summary of the orders created
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderSummary {
    #[serde(rename = "ordercreateresponse", default)]
    pub order_create_responses: Vec<OrderCreateResponse>,
}

/// One created order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderCreateResponse {
    #[serde(rename = "numberoflineswithsuccess")]
    pub number_of_lines_with_success: String,
    #[serde(rename = "numberoflineswitherror")]
    pub number_of_lines_with_error: String,
    #[serde(rename = "numberoflineswithwarning")]
    pub number_of_lines_with_warning: String,
    #[serde(rename = "globalorderid")]
    pub global_order_id: String,
    #[serde(rename = "ordertype")]
    pub order_type: String,
    #[serde(rename = "ordertimestamp")]
    pub order_timestamp: String,
    #[serde(rename = "invoicingsystemorderid")]
    pub invoicing_system_order_id: String,
    #[serde(rename = "taxamount")]
    pub tax_amount: f64,
    #[serde(rename = "freightamount")]
    pub freight_amount: f64,
    #[serde(rename = "orderamount")]
    pub order_amount: f64,
    pub lines: Vec<OrderCreateResponseLine>,
}

/// Line of a created order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderCreateResponseLine {
    #[serde(rename = "linetype")]
    pub line_type: String,
    #[serde(rename = "globallinenumber")]
    pub global_line_number: String,
    #[serde(rename = "partnumber")]
    pub part_number: String,
    #[serde(rename = "globalskuid")]
    pub global_sku_id: String,
    #[serde(rename = "linenumber")]
    pub line_number: String,
}

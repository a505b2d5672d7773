//! Inbound webhook payloads
//!
//! Ingram Micro pushes order status changes to a reseller-hosted endpoint.
//! These types decode that payload; receiving the HTTP request is left to the
//! caller's own server.
//!
//! ```rust
//! use ingram_api_client::webhook::{Webhook, WebhookEventType};
//!
//! let payload = r#"{
//!     "topic": "resellers/orders",
//!     "event": "im::updated",
//!     "eventTimeStamp": "2024-03-01T12:00:00Z",
//!     "eventId": "b7d6",
//!     "resource": {
//!         "eventType": "im::order_shipped",
//!         "orderNumber": "20-RD128",
//!         "orderEntryTimeStamp": "2024-02-28T09:30:00Z"
//!     }
//! }"#;
//!
//! let webhook = Webhook::from_str(payload).unwrap();
//! assert_eq!(webhook.resource.event_type, WebhookEventType::OrderShipped);
//! ```

use crate::error::ApiResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Vendor payloads send `null` where a field has no value yet
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Top-level event name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookEvent {
    /// Order state changed
    #[serde(rename = "im::updated")]
    Updated,
}

/// What happened to the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookEventType {
    /// One or more lines shipped
    #[serde(rename = "im::order_shipped")]
    OrderShipped,
    /// Order was invoiced
    #[serde(rename = "im::order_invoiced")]
    OrderInvoiced,
    /// Order was put on hold
    #[serde(rename = "im::order_hold")]
    OrderHold,
    /// Order was cancelled
    #[serde(rename = "im::order_voided")]
    OrderVoided,
}

/// Status of a single order line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookLineStatus {
    /// Line left the warehouse
    #[serde(rename = "im::shipped")]
    Shipped,
    /// Held by Ingram sales
    #[serde(rename = "im::sales_hold")]
    SalesHold,
    /// Held by the online ordering system
    #[serde(rename = "im::online_hold")]
    OnlineHold,
}

/// Webhook envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    #[serde(default, deserialize_with = "null_as_default")]
    pub topic: String,
    pub event: WebhookEvent,
    // Some payloads still carry the vendor's misspelled key
    #[serde(rename = "eventTimeStamp", alias = "evenTtimeStamp")]
    pub event_timestamp: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_id: String,
    pub resource: WebhookResource,
}

impl Webhook {
    /// Decode a raw request body
    pub fn from_slice(body: &[u8]) -> ApiResult<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Decode a payload held as text
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(body: &str) -> ApiResult<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Lines with the given status
    pub fn lines_with_status(
        &self,
        status: WebhookLineStatus,
    ) -> impl Iterator<Item = &WebhookResourceLine> {
        self.resource
            .lines
            .iter()
            .filter(move |line| line.line_status == Some(status))
    }
}

/// Order the event refers to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResource {
    pub event_type: WebhookEventType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_po_number: String,
    #[serde(rename = "orderEntryTimeStamp")]
    pub order_entry_timestamp: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lines: Vec<WebhookResourceLine>,
}

/// Line of the order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookResourceLine {
    #[serde(deserialize_with = "null_as_default")]
    pub line_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sub_order_number: String,
    pub line_status: Option<WebhookLineStatus>,
    #[serde(deserialize_with = "null_as_default")]
    pub ingram_part_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vendor_part_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub requested_quantity: String,
    #[serde(deserialize_with = "null_as_default")]
    pub shipped_quantity: String,
    #[serde(deserialize_with = "null_as_default")]
    pub back_ordered_quantity: String,
    #[serde(deserialize_with = "null_as_default")]
    pub shipment_details: WebhookShipmentDetail,
    #[serde(deserialize_with = "null_as_default")]
    pub serial_number_details: Vec<WebhookSerialNumberDetail>,
}

/// Where and how a line shipped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookShipmentDetail {
    pub shipment_date: Option<String>,
    #[serde(rename = "shipFromWarehouseId", deserialize_with = "null_as_default")]
    pub ship_from_warehouse_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub warehouse_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub carrier_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub carrier_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub package_details: Vec<WebhookShipmentPackageDetail>,
}

/// One carton of a shipment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookShipmentPackageDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub carton_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity_inbox: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tracking_number: String,
}

/// Serial number of a shipped unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookSerialNumberDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub serial_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use chrono::TimeZone;

    const SHIPPED: &str = r#"{
        "topic": "resellers/orders",
        "event": "im::updated",
        "eventTimeStamp": "2024-03-01T12:00:00Z",
        "eventId": "5a1c2e",
        "resource": {
            "eventType": "im::order_shipped",
            "orderNumber": "20-RD128",
            "customerPoNumber": "PO-1001",
            "orderEntryTimeStamp": "2024-02-28T09:30:00-06:00",
            "lines": [
                {
                    "lineNumber": "001",
                    "subOrderNumber": "20-RD128-11",
                    "lineStatus": "im::shipped",
                    "ingramPartNumber": "123512",
                    "requestedQuantity": "2",
                    "shippedQuantity": "2",
                    "backOrderedQuantity": "0",
                    "shipmentDetails": {
                        "shipmentDate": "2024-03-01",
                        "shipFromWarehouseId": "10",
                        "carrierCode": "UP",
                        "packageDetails": [
                            {"cartonNumber": "1", "quantityInbox": "2", "trackingNumber": "1Z999"}
                        ]
                    },
                    "serialNumberDetails": [{"serialNumber": "SN1"}, {"serialNumber": "SN2"}]
                },
                {
                    "lineNumber": "002",
                    "lineStatus": "im::sales_hold"
                }
            ]
        }
    }"#;

    #[test]
    fn test_decode_shipped_event() {
        let webhook = Webhook::from_str(SHIPPED).unwrap();

        assert_eq!(webhook.event, WebhookEvent::Updated);
        assert_eq!(
            webhook.event_timestamp,
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(
            webhook.resource.order_entry_timestamp,
            Utc.with_ymd_and_hms(2024, 2, 28, 15, 30, 0).unwrap()
        );
        assert_eq!(webhook.resource.event_type, WebhookEventType::OrderShipped);

        let line = &webhook.resource.lines[0];
        assert_eq!(line.shipment_details.ship_from_warehouse_id, "10");
        assert_eq!(line.shipment_details.package_details[0].tracking_number, "1Z999");
        assert_eq!(line.serial_number_details.len(), 2);
        assert_eq!(webhook.lines_with_status(WebhookLineStatus::Shipped).count(), 1);
        assert_eq!(webhook.lines_with_status(WebhookLineStatus::SalesHold).count(), 1);
    }

    #[test]
    fn test_null_fields_decode_as_empty() {
        let payload = r#"{
            "topic": null,
            "event": "im::updated",
            "eventTimeStamp": "2024-03-01T12:00:00Z",
            "eventId": null,
            "resource": {
                "eventType": "im::order_hold",
                "orderNumber": "20-RD128",
                "customerPoNumber": null,
                "orderEntryTimeStamp": "2024-02-28T09:30:00Z",
                "lines": [{
                    "lineNumber": "001",
                    "lineStatus": null,
                    "vendorPartNumber": null,
                    "shipmentDetails": null,
                    "serialNumberDetails": null
                }]
            }
        }"#;

        let webhook = Webhook::from_str(payload).unwrap();
        let line = &webhook.resource.lines[0];

        assert!(webhook.topic.is_empty());
        assert!(webhook.resource.customer_po_number.is_empty());
        assert_eq!(line.line_status, None);
        assert!(line.vendor_part_number.is_empty());
        assert_eq!(line.shipment_details, WebhookShipmentDetail::default());
        assert!(line.serial_number_details.is_empty());
    }

    #[test]
    fn test_from_slice_matches_from_str() {
        let webhook = Webhook::from_slice(SHIPPED.as_bytes()).unwrap();
        assert_eq!(webhook.resource.order_number, "20-RD128");
    }

    #[test]
    fn test_misspelled_timestamp_key_accepted() {
        let payload = SHIPPED.replace("eventTimeStamp", "evenTtimeStamp");
        let webhook = Webhook::from_str(&payload).unwrap();
        assert_eq!(webhook.event_id, "5a1c2e");
    }

    #[test]
    fn test_other_event_types() {
        for (raw, expected) in [
            ("im::order_invoiced", WebhookEventType::OrderInvoiced),
            ("im::order_hold", WebhookEventType::OrderHold),
            ("im::order_voided", WebhookEventType::OrderVoided),
        ] {
            let payload = SHIPPED.replace("im::order_shipped", raw);
            assert_eq!(Webhook::from_str(&payload).unwrap().resource.event_type, expected);
        }
    }

    #[test]
    fn test_unknown_values_rejected() {
        let payload = SHIPPED.replace("im::order_shipped", "im::order_teleported");
        assert!(matches!(Webhook::from_str(&payload), Err(ApiError::Decode(_))));

        let payload = SHIPPED.replace("im::sales_hold", "im::lost");
        assert!(matches!(Webhook::from_str(&payload), Err(ApiError::Decode(_))));

        let payload = SHIPPED.replace("im::updated", "im::created");
        assert!(matches!(Webhook::from_str(&payload), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(Webhook::from_slice(b"not json"), Err(ApiError::Decode(_))));
    }
}

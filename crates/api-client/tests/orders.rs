//! Order endpoints against a mocked Ingram Micro API.

mod support;

use ingram_api_client::endpoints::orders::OrderDetailRequest;
use ingram_api_client::ApiError;
use serde_json::json;
use support::*;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DETAIL_PATH: &str = "/resellers/v5/orders/20-RD128";
const ORDERS_PATH: &str = "/resellers/v5/orders";

#[tokio::test]
async fn fetches_order_detail() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .and(query_param("customernumber", CUSTOMER_NUMBER))
        .and(query_param("isocountrycode", COUNTRY_CODE))
        .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_body()))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client_for(&server)
        .orders()
        .detail(&detail_request())
        .await
        .expect("order detail");

    assert_eq!(envelope.service_response.response_preamble.status_code, "200");
    assert_eq!(envelope.detail().order_number, ORDER_NUMBER);
    assert_eq!(envelope.detail().order_status, "SHIPPED");
    assert_eq!(envelope.detail().lines.len(), 1);
}

#[tokio::test]
async fn invalid_detail_request_sends_nothing() {
    let server = MockServer::start().await;
    mount_token(&server, 0).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_body()))
        .expect(0)
        .mount(&server)
        .await;

    let request = OrderDetailRequest::new("", CUSTOMER_NUMBER, COUNTRY_CODE);
    let err = client_for(&server)
        .orders()
        .detail(&request)
        .await
        .expect_err("validation should fail");

    assert!(err.is_validation());
    assert_eq!(err.violations()[0].field, "ordernumber");
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn upstream_rejection_keeps_body() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"message":"invalid order"}"#))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .orders()
        .detail(&detail_request())
        .await
        .expect_err("upstream 400");

    match err {
        ApiError::Upstream { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, r#"{"message":"invalid order"}"#);
        }
        other => panic!("expected Upstream, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_detail_body_is_a_decode_error() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server).orders().detail(&detail_request()).await;
    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn order_number_is_escaped_into_one_segment() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/resellers/v5/orders/20%2FRD128"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_body()))
        .expect(1)
        .mount(&server)
        .await;

    let request = OrderDetailRequest::new("20/RD128", CUSTOMER_NUMBER, COUNTRY_CODE);
    assert_ok!(client_for(&server).orders().detail(&request).await);
}

#[tokio::test]
async fn creates_order() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("POST"))
        .and(path(ORDERS_PATH))
        .and(body_partial_json(json!({
            "ordercreaterequest": {
                "requestpreamble": {"customernumber": CUSTOMER_NUMBER, "isocountrycode": COUNTRY_CODE},
                "ordercreatedetails": {
                    "customerponumber": "PO-1001",
                    "shiptoaddress": {"city": "Springfield", "postalcode": "62704"}
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_body()))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client_for(&server)
        .orders()
        .create(&create_request())
        .await
        .expect("order create");

    assert_eq!(envelope.orders().len(), 1);
    assert_eq!(envelope.orders()[0].global_order_id, "20-VG0UG");
}

#[tokio::test]
async fn submit_ignores_response_body() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("POST"))
        .and(path(ORDERS_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let orders = client_for(&server).orders();

    assert_ok!(orders.submit(&create_request()).await);
    // The decoding variant needs a body.
    assert!(matches!(orders.create(&create_request()).await, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn invalid_order_is_rejected_locally() {
    let server = MockServer::start().await;
    mount_token(&server, 0).await;

    let mut order = create_request();
    order.order_create_details.customer_po_number = "P".repeat(19);
    if let Some(address) = order.order_create_details.ship_to_address.as_mut() {
        address.postal_code.clear();
    }

    let err = assert_err!(client_for(&server).orders().submit(&order).await);
    let fields: Vec<_> = err.violations().iter().map(|v| v.field.as_str()).collect();

    assert_eq!(
        fields,
        vec![
            "ordercreatedetails.customerponumber",
            "ordercreatedetails.shiptoaddress.postalcode",
        ]
    );
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

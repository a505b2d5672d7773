//! Shared helpers for mock-server integration tests.

#![allow(dead_code)]

use ingram_api_client::endpoints::orders::{
    OrderCreateDetails, OrderCreateRequest, OrderDetailRequest, OrderLine, ShipToAddress,
};
use ingram_api_client::{ClientConfig, Environment, IngramClient};
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Credentials used by every test client.
pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";

/// Access token handed out by the mocked OAuth endpoint.
pub const ACCESS_TOKEN: &str = "test-access-token";

/// OAuth path served in production.
pub const PRODUCTION_TOKEN_PATH: &str = "/oauth/oauth30/token";
/// OAuth path served in the sandbox.
pub const SANDBOX_TOKEN_PATH: &str = "/oauth/oauth20/token";

pub const ORDER_NUMBER: &str = "20-RD128";
pub const CUSTOMER_NUMBER: &str = "20-222222";
pub const COUNTRY_CODE: &str = "US";

/// Production client pointed at the mock server.
pub fn client_for(server: &MockServer) -> IngramClient {
    IngramClient::with_config(config_for(server)).expect("valid test config")
}

/// Sandbox client pointed at the mock server.
pub fn sandbox_client_for(server: &MockServer) -> IngramClient {
    IngramClient::with_config(config_for(server).with_environment(Environment::Sandbox))
        .expect("valid test config")
}

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::production(CLIENT_ID, CLIENT_SECRET).with_api_host(server.uri())
}

pub fn token_body(expires_in: &str) -> Value {
    json!({
        "access_token": ACCESS_TOKEN,
        "token_type": "Bearer",
        "expires_in": expires_in
    })
}

/// Token endpoint answering with an hour-long token; must be hit exactly `calls` times.
pub fn token_mock(token_path: &str, calls: u64) -> Mock {
    Mock::given(method("POST"))
        .and(path(token_path))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains(format!("client_secret={CLIENT_SECRET}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("3600")))
        .expect(calls)
}

pub async fn mount_token(server: &MockServer, calls: u64) {
    token_mock(PRODUCTION_TOKEN_PATH, calls).mount(server).await;
}

pub fn detail_request() -> OrderDetailRequest {
    OrderDetailRequest::new(ORDER_NUMBER, CUSTOMER_NUMBER, COUNTRY_CODE)
}

pub fn detail_body() -> Value {
    json!({
        "serviceresponse": {
            "responsepreamble": {
                "responsestatus": "SUCCESS",
                "statuscode": "200",
                "responsemessage": "Data Found"
            },
            "orderdetailresponse": {
                "ordernumber": ORDER_NUMBER,
                "orderstatus": "SHIPPED",
                "ordertotalvalue": 1042.5,
                "currencycode": "USD",
                "lines": [{"linenumber": "001", "partnumber": "123512"}]
            }
        }
    })
}

pub fn create_request() -> OrderCreateRequest {
    OrderCreateRequest::new(
        CUSTOMER_NUMBER,
        COUNTRY_CODE,
        OrderCreateDetails::new("PO-1001")
            .with_ship_to(ShipToAddress::new("123 Main", "Springfield", "62704", "US"))
            .with_line(OrderLine::product("123512", 2).with_line_number("001")),
    )
}

pub fn create_body() -> Value {
    json!({
        "serviceresponse": {
            "responsepreamble": {"responsestatus": "SUCCESS", "statuscode": "200"},
            "ordersummary": {
                "ordercreateresponse": [{
                    "numberoflineswithsuccess": "1",
                    "globalorderid": "20-VG0UG",
                    "orderamount": 1042.5,
                    "lines": [{"linetype": "P", "partnumber": "123512", "linenumber": "001"}]
                }]
            }
        }
    })
}

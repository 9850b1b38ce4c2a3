#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end calls through the hyper transport against a local mock gateway.

use std::sync::Arc;

use httpmock::prelude::*;
use iamport_client::apis::Iamport;
use iamport_client::models::{CancelPaymentRequest, PaymentStatus, TokenRequest};
use iamport_client::{ClientOptions, ClientOptionsConfig, IamportClient, IamportError};
use serde_json::json;

const TOKEN_BODY: &str =
    r#"{"code":0,"message":null,"response":{"access_token":"tok-e2e","now":1700000000,"expired_at":1700001800}}"#;

fn iamport(server: &MockServer) -> Iamport {
    let mut config = ClientOptionsConfig::new("imp_acc", "key", "secret");
    config.base_url = server.base_url();
    let options = ClientOptions::from_config(config).unwrap();
    Iamport::new(Arc::new(IamportClient::new(options).unwrap()))
}

fn mock_token(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path("/users/getToken")
            .header("content-type", "application/json")
            .json_body(json!({"imp_id": "imp_acc", "imp_key": "key", "imp_secret": "secret"}));
        then.status(200)
            .header("content-type", "application/json")
            .body(TOKEN_BODY);
    })
}

#[tokio::test]
async fn payment_lookup_authorizes_then_fetches() {
    let server = MockServer::start();
    let token = mock_token(&server);
    let payment = server.mock(|when, then| {
        when.method(GET)
            .path("/payments/imp_1")
            .header("authorization", "tok-e2e");
        then.status(200)
            .header("content-type", "application/json")
            .body(
                r#"{"code":0,"message":null,"response":{"imp_uid":"imp_1","merchant_uid":"order-1","amount":1000,"status":"paid","paid_at":1700000100}}"#,
            );
    });

    let iamport = iamport(&server);
    let found = iamport.payments.get("imp_1").await.unwrap();

    assert_eq!(found.merchant_uid, "order-1");
    assert_eq!(found.status, PaymentStatus::Paid);
    assert!(iamport.client().current_token().is_some());
    token.assert();
    payment.assert();
}

#[tokio::test]
async fn rejected_credentials_stop_before_primary_call() {
    let server = MockServer::start();
    let token = server.mock(|when, then| {
        when.method(POST).path("/users/getToken");
        then.status(401)
            .header("content-type", "application/json")
            .body(r#"{"code":-1,"message":"invalid imp_key","response":null}"#);
    });
    let payment = server.mock(|when, then| {
        when.method(GET).path("/payments/imp_1");
        then.status(200).body("{}");
    });

    let err = iamport(&server).payments.get("imp_1").await.unwrap_err();

    assert_eq!(err.gateway_code(), Some(-1));
    token.assert();
    assert_eq!(payment.hits(), 0);
}

#[tokio::test]
async fn cancel_posts_json_body() {
    let server = MockServer::start();
    mock_token(&server);
    let cancel = server.mock(|when, then| {
        when.method(POST)
            .path("/payments/cancel")
            .header("authorization", "tok-e2e")
            .json_body(json!({"imp_uid": "imp_1", "reason": "duplicate"}));
        then.status(200)
            .header("content-type", "application/json")
            .body(
                r#"{"code":0,"message":null,"response":{"imp_uid":"imp_1","merchant_uid":"order-1","amount":1000,"cancel_amount":1000,"status":"cancelled"}}"#,
            );
    });

    let request = CancelPaymentRequest::by_imp_uid("imp_1").with_reason("duplicate");
    let cancelled = iamport(&server).payments.cancel(&request).await.unwrap();

    assert_eq!(cancelled.status, PaymentStatus::Cancelled);
    cancel.assert();
}

#[tokio::test]
async fn users_get_token_leaves_client_token_untouched() {
    let server = MockServer::start();
    let token = server.mock(|when, then| {
        when.method(POST)
            .path("/users/getToken")
            .json_body(json!({"imp_id": "imp_other", "imp_key": "k", "imp_secret": "s"}));
        then.status(200)
            .header("content-type", "application/json")
            .body(TOKEN_BODY);
    });

    let iamport = iamport(&server);
    let issued = iamport
        .users
        .get_token(&TokenRequest::new("imp_other", "k", "s"))
        .await
        .unwrap();

    assert_eq!(issued.access_token().expose(), "tok-e2e");
    assert!(iamport.client().current_token().is_none());
    token.assert();
}

#[tokio::test]
async fn html_error_page_maps_to_http_status() {
    let server = MockServer::start();
    mock_token(&server);
    server.mock(|when, then| {
        when.method(GET).path("/subscribe/customers/cust-1");
        then.status(503).body("<html>maintenance</html>");
    });

    let err = iamport(&server)
        .subscriptions
        .get_customer("cust-1")
        .await
        .unwrap_err();

    match err {
        IamportError::HttpStatus { status, body_preview } => {
            assert_eq!(status.as_u16(), 503);
            assert!(body_preview.contains("maintenance"));
        }
        other => panic!("expected HttpStatus, got: {other}"),
    }
}

#[tokio::test]
async fn disposed_client_sends_nothing() {
    let server = MockServer::start();
    let token = mock_token(&server);

    let iamport = iamport(&server);
    iamport.client().dispose();

    let err = iamport.payments.get("imp_1").await.unwrap_err();
    assert!(matches!(err, IamportError::Disposed));
    assert_eq!(token.hits(), 0);
}

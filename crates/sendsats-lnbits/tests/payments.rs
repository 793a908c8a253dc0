//! LNbits client against a mock payments API

use mockito::Matcher;
use sendsats_lnbits::{Error, LNbitsClient};

const INVOICE_KEY: &str = "inv-key";
const ADMIN_KEY: &str = "adm-key";

fn client(server: &mockito::Server) -> LNbitsClient {
    LNbitsClient::new(
        &format!("{}/api/v1/payments", server.url()),
        INVOICE_KEY,
        ADMIN_KEY,
    )
    .unwrap()
}

#[tokio::test]
async fn test_decode_to_payment_hash() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/v1/payments/decode")
        .match_header("x-api-key", INVOICE_KEY)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({"data": "lnbc1abc"})))
        .with_status(200)
        .with_body(r#"{"payment_hash":"ab12","amount_msat":1000}"#)
        .create_async()
        .await;

    let hash = client(&server)
        .decode_to_payment_hash("lnbc1abc")
        .await
        .unwrap();

    assert_eq!(hash, "ab12");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_decode_without_payment_hash() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/api/v1/payments/decode")
        .with_status(200)
        .with_body(r#"{"message":"Failed to decode"}"#)
        .create_async()
        .await;

    let result = client(&server).decode_to_payment_hash("garbage").await;

    assert!(matches!(
        result,
        Err(Error::MissingField {
            field: "payment_hash",
            ..
        })
    ));
}

#[tokio::test]
async fn test_check_status() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/v1/payments/ab12")
        .match_header("x-api-key", INVOICE_KEY)
        .with_status(200)
        .with_body(r#"{"paid":true,"preimage":"00ff","details":{"amount":1000}}"#)
        .create_async()
        .await;

    let status = client(&server).check_status("ab12").await.unwrap();

    assert!(status.paid);
    assert_eq!(status.preimage.as_deref(), Some("00ff"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_pay_invoice() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/v1/payments")
        .match_header("x-api-key", ADMIN_KEY)
        .match_header("content-type", "application/json")
        .match_body(r#"{"out":true,"bolt11":"lnbc1abc"}"#)
        .with_status(201)
        .with_body(r#"{"payment_hash":"ab12","checking_id":"internal_ab12"}"#)
        .create_async()
        .await;

    let receipt = client(&server).pay_invoice("lnbc1abc").await.unwrap();

    assert_eq!(receipt.payment_hash, "ab12");
    assert_eq!(receipt.checking_id.as_deref(), Some("internal_ab12"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_pay_invoice_error_status_keeps_body() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/api/v1/payments")
        .with_status(520)
        .with_body(r#"{"detail":"Insufficient balance."}"#)
        .create_async()
        .await;

    match client(&server).pay_invoice("lnbc1abc").await {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 520);
            assert!(message.contains("Insufficient balance"));
        }
        other => panic!("Expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_pay_invoice_without_payment_hash_is_rejected() {
    let mut server = mockito::Server::new_async().await;

    let body = r#"{"message":"{\"error\":\"self-payments not allowed\",\"code\":2}"}"#;
    server
        .mock("POST", "/api/v1/payments")
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    match client(&server).pay_invoice("lnbc1abc").await {
        Err(Error::Rejected(raw)) => assert_eq!(raw, body),
        other => panic!("Expected rejection, got {other:?}"),
    }
}

//! LNURL-pay flow against a mock HTTP server

use mockito::Matcher;
use sendsats::lnurl::{fetch_descriptor, negotiate};
use sendsats::{Amount, Error, HttpClient, InvoiceResult};

const LNURL_CONTENT_TYPE: &str = "text/html; charset=UTF-8";

fn descriptor_body(server_url: &str) -> String {
    format!(
        r#"{{"callback":"{server_url}/cb","minSendable":100000,"maxSendable":500000,"metadata":"[[\"text/plain\",\"Tips\"]]","tag":"payRequest"}}"#
    )
}

#[tokio::test]
async fn test_descriptor_then_invoice() {
    let mut server = mockito::Server::new_async().await;

    let metadata = server
        .mock("GET", "/.well-known/lnurlp/user")
        .match_header("content-type", LNURL_CONTENT_TYPE)
        .with_status(200)
        .with_body(descriptor_body(&server.url()))
        .create_async()
        .await;

    let callback = server
        .mock("GET", "/cb")
        .match_query(Matcher::UrlEncoded("amount".into(), "100000".into()))
        .match_header("content-type", LNURL_CONTENT_TYPE)
        .with_status(200)
        .with_body(r#"{"pr":"lnbc1abc","routes":[]}"#)
        .create_async()
        .await;

    let client = HttpClient::new();
    let url = format!("{}/.well-known/lnurlp/user", server.url());

    let descriptor = fetch_descriptor(&client, &url).await.unwrap();
    assert_eq!(descriptor.min_sendable, Amount::from_msat(100_000));
    assert_eq!(descriptor.max_sendable, Amount::from_msat(500_000));

    let result = negotiate(&client, &descriptor, Some(100)).await;
    assert_eq!(result, InvoiceResult::Invoice("lnbc1abc".to_string()));

    metadata.assert_async().await;
    callback.assert_async().await;
}

#[tokio::test]
async fn test_rejection_on_error_status_code() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/.well-known/lnurlp/user")
        .with_status(200)
        .with_body(descriptor_body(&server.url()))
        .create_async()
        .await;

    server
        .mock("GET", "/cb")
        .match_query(Matcher::UrlEncoded("amount".into(), "300000".into()))
        .with_status(400)
        .with_body(r#"{"status":"ERROR","reason":"Amount too small"}"#)
        .create_async()
        .await;

    let client = HttpClient::new();
    let url = format!("{}/.well-known/lnurlp/user", server.url());

    let descriptor = fetch_descriptor(&client, &url).await.unwrap();
    let result = negotiate(&client, &descriptor, Some(300)).await;

    assert_eq!(
        result,
        InvoiceResult::Rejected("Amount too small".to_string())
    );
}

#[tokio::test]
async fn test_descriptor_not_json() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/.well-known/lnurlp/ghost")
        .with_status(404)
        .with_body("<html>Not Found</html>")
        .create_async()
        .await;

    let client = HttpClient::new();
    let url = format!("{}/.well-known/lnurlp/ghost", server.url());

    let result = fetch_descriptor(&client, &url).await;
    assert!(matches!(result, Err(Error::InvalidDescriptor(_))));
}

#[tokio::test]
async fn test_empty_callback_response() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/.well-known/lnurlp/user")
        .with_status(200)
        .with_body(descriptor_body(&server.url()))
        .create_async()
        .await;

    server
        .mock("GET", "/cb")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = HttpClient::new();
    let url = format!("{}/.well-known/lnurlp/user", server.url());

    let descriptor = fetch_descriptor(&client, &url).await.unwrap();
    let result = negotiate(&client, &descriptor, None).await;

    assert!(matches!(result, InvoiceResult::TransportError(_)));
    assert_eq!(result.user_message(), sendsats::INVOICE_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_unreachable_host() {
    let client = HttpClient::new();

    let result = fetch_descriptor(&client, "http://127.0.0.1:1/.well-known/lnurlp/user").await;

    assert!(matches!(result, Err(Error::TransportFailure(_))));
}

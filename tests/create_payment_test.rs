//! POST /create-payment against a stubbed processor

mod common;

use common::*;
use mockito::{Matcher, Server};
use std::io::Write;
use std::time::Duration;

const QR: &str = "00020126580014br.gov.bcb.pix0136a1b2c3";

#[tokio::test]
async fn test_custom_checkout_end_to_end() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/transactions")
        .match_header("authorization", EXPECTED_AUTH)
        .match_header("company-id", COMPANY_ID)
        .match_body(Matcher::PartialJson(json!({
            "paymentMethod": "PIX",
            "amount": 500,
            "customer": {"name": "Ana", "email": "a@b.com"}
        })))
        .with_status(200)
        .with_body(json!({"id": "tx1", "status": "pending", "pix": {"qrcode": QR}}).to_string())
        .create_async()
        .await;

    let (status, json) = send(
        test_app(&server.url()),
        post_json(
            "/create-payment",
            json!({"customer": {"name": "Ana", "email": "a@b.com"}, "amount": 500}),
        ),
    )
    .await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["transaction"]["id"], "tx1");
    assert_eq!(json["transaction"]["status"], "pending");
    // The same code is exposed under three names on purpose.
    assert_eq!(json["pix"]["qr_code"], QR);
    assert_eq!(json["pix"]["code"], QR);
    assert_eq!(json["pix"]["copy_paste"], QR);
}

#[tokio::test]
async fn test_forwarded_ip_and_clean_document_reach_processor() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/transactions")
        .match_body(Matcher::PartialJson(json!({
            "customer": {"document": {"number": "12345678909", "type": "CPF"}},
            "ip": "203.0.113.9"
        })))
        .with_status(201)
        .with_body(json!({"id": "tx2", "status": "pending", "pix": {"qrCode": QR}}).to_string())
        .create_async()
        .await;

    let request = Request::post("/create-payment")
        .header("content-type", "application/json")
        .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
        .body(Body::from(
            json!({
                "customer": {"name": "Ana", "email": "a@b.com", "document": "123.456.789-09"},
                "amount": 500
            })
            .to_string(),
        ))
        .unwrap();

    let (status, json) = send(test_app(&server.url()), request).await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pix"]["qr_code"], QR);
}

#[tokio::test]
async fn test_empty_body_uses_default_product() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/transactions")
        .match_body(Matcher::PartialJson(json!({
            "amount": 890,
            "customer": {"document": {"number": "00000000191"}},
            "metadata": {"campaign": "oferta_promocional"}
        })))
        .with_status(201)
        .with_body(
            json!({"id": "tx3", "status": "pending", "amount": 890, "pix": {"qrcode": QR}})
                .to_string(),
        )
        .create_async()
        .await;

    let request = Request::post("/create-payment").body(Body::empty()).unwrap();
    let (status, json) = send(test_app(&server.url()), request).await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["transaction"]["amount"], 890);
}

#[tokio::test]
async fn test_body_without_customer_uses_default_product() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/transactions")
        .match_body(Matcher::PartialJson(json!({"amount": 890})))
        .with_status(201)
        .with_body(json!({"id": "tx4", "pix": {"qrcode": QR}}).to_string())
        .create_async()
        .await;

    let (status, _) = send(
        test_app(&server.url()),
        post_json("/create-payment", json!({"amount": 5000, "description": "ignored"})),
    )
    .await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_amount_below_minimum_is_rejected_without_calling_processor() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/transactions")
        .expect(0)
        .create_async()
        .await;

    let (status, json) = send(
        test_app(&server.url()),
        post_json(
            "/create-payment",
            json!({"customer": {"name": "Ana", "email": "a@b.com"}, "amount": 99}),
        ),
    )
    .await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], true);
    assert!(json["message"].as_str().unwrap().contains("minimum amount"));
}

#[tokio::test]
async fn test_minimum_amount_is_accepted() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/transactions")
        .match_body(Matcher::PartialJson(json!({"amount": 100})))
        .with_status(201)
        .with_body(json!({"id": "tx5", "pix": {"qrcode": QR}}).to_string())
        .create_async()
        .await;

    let (status, json) = send(
        test_app(&server.url()),
        post_json(
            "/create-payment",
            json!({"customer": {"name": "Ana", "email": "a@b.com"}, "amount": 100}),
        ),
    )
    .await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
}

#[tokio::test]
async fn test_missing_name_is_rejected() {
    let server = Server::new_async().await;

    let (status, json) = send(
        test_app(&server.url()),
        post_json("/create-payment", json!({"customer": {"email": "a@b.com"}, "amount": 500})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "customer name and email are required");
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let server = Server::new_async().await;
    let request = Request::post("/create-payment")
        .header("content-type", "application/json")
        .body(Body::from("{\"customer\":"))
        .unwrap();

    let (status, json) = send(test_app(&server.url()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], true);
}

#[tokio::test]
async fn test_missing_pix_returns_server_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/transactions")
        .with_status(201)
        .with_body(json!({"id": "tx6", "status": "pending"}).to_string())
        .create_async()
        .await;

    let (status, json) = send(
        test_app(&server.url()),
        post_json(
            "/create-payment",
            json!({"customer": {"name": "Ana", "email": "a@b.com"}, "amount": 500}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], true);
    assert!(json.get("success").is_none());
}

#[tokio::test]
async fn test_processor_error_is_propagated() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/transactions")
        .with_status(422)
        .with_body(r#"{"message":"invalid document"}"#)
        .create_async()
        .await;

    let (status, json) = send(
        test_app(&server.url()),
        post_json(
            "/create-payment",
            json!({"customer": {"name": "Ana", "email": "a@b.com"}, "amount": 500}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], true);
    assert_eq!(json["status_code"], 422);
    assert_eq!(json["details"], r#"{"message":"invalid document"}"#);
}

#[tokio::test]
async fn test_unreachable_processor_returns_server_error() {
    let (status, json) = send(
        test_app("http://127.0.0.1:1"),
        post_json(
            "/create-payment",
            json!({"customer": {"name": "Ana", "email": "a@b.com"}, "amount": 500}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], true);
    let message = json["message"].as_str().unwrap();
    assert!(message.starts_with("internal error"));
    assert!(!message.contains(SECRET_KEY));
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let server = Server::new_async().await;
    let request = Request::options("/create-payment")
        .header("origin", "https://landing.example.com")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = test_app(&server.url()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_loosely_typed_processor_fields_are_passed_through() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/transactions")
        .with_status(201)
        .with_body(
            json!({
                "id": "tx7",
                "status": "pending",
                "amount": 8.9,
                "createdAt": 1760000000,
                "pix": {"qrcode": QR}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let (status, json) = send(
        test_app(&server.url()),
        post_json(
            "/create-payment",
            json!({"customer": {"name": "Ana", "email": "a@b.com"}, "amount": 890}),
        ),
    )
    .await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["transaction"]["amount"], 8.9);
    assert_eq!(json["transaction"]["created_at"], 1760000000);
    assert_eq!(json["pix"]["qr_code"], QR);
}

#[tokio::test]
async fn test_slow_processor_times_out_with_server_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/transactions")
        .with_status(201)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_secs(3));
            w.write_all(br#"{"id":"late","pix":{"qrcode":"000201"}}"#)
        })
        .create_async()
        .await;

    let mut config = test_config(&server.url());
    config.processor.timeout_secs = 1;

    let (status, json) = send(
        test_app_with(config),
        post_json(
            "/create-payment",
            json!({"customer": {"name": "Ana", "email": "a@b.com"}, "amount": 500}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], true);
    assert!(json["message"].as_str().unwrap().starts_with("internal error"));
    assert!(json.get("success").is_none());
}

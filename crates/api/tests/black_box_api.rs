use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{json, Value};

use pizzeria_api::app::{router, services::build_in_memory_services};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod over in-memory stores, bound to an ephemeral port.
        let services = build_in_memory_services(Duration::from_secs(180)).unwrap();
        let app = router(Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn hop(&self, client: &reqwest::Client, session_id: &str, selection: &str) -> (StatusCode, Value) {
        let res = client
            .post(format!("{}/v1/order", self.base_url))
            .json(&json!({ "session_id": session_id, "selection": selection }))
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn ussd_flow_places_an_order() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = srv.hop(&client, "bb-1", "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["menu"].as_str().unwrap().contains("1. Order pizza"));

    let (_, body) = srv.hop(&client, "bb-1", "1").await;
    assert!(body["menu"].as_str().unwrap().contains("2. Medium - 10.00"));

    srv.hop(&client, "bb-1", "2").await;
    srv.hop(&client, "bb-1", "2").await;
    let (_, body) = srv.hop(&client, "bb-1", "1,2").await;
    assert!(body["menu"].as_str().unwrap().contains("Total: 34.80"));

    let (status, body) = srv.hop(&client, "bb-1", "1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["menu"].as_str().unwrap().contains("Order ID: OR"));

    // The session is gone; the next hop starts over.
    let (_, body) = srv.hop(&client, "bb-1", "1").await;
    assert!(body["menu"].as_str().unwrap().contains("1. Order pizza"));
}

#[tokio::test]
async fn ussd_validation_errors_are_400_with_code() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    srv.hop(&client, "bb-2", "").await;
    srv.hop(&client, "bb-2", "1").await;
    let (status, body) = srv.hop(&client, "bb-2", "99").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid pizza selection");
    assert_eq!(body["code"], "validation_error");
}

#[tokio::test]
async fn ussd_requires_session_id() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/v1/order", srv.base_url))
        .json(&json!({ "selection": "1" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], "missing_input");
}

#[tokio::test]
async fn direct_order_returns_receipt() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/v1/orders", srv.base_url))
        .json(&json!({ "pizza_id": 2, "quantity": 2, "toppings": [6, 7] }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert!(body["order_id"].as_str().unwrap().starts_with("OR"));
    assert_eq!(body["pizza"], "Medium");
    assert_eq!(body["toppings"], json!(["Cheese", "Olives"]));
    assert_eq!(body["subtotal"], "30.00");
    assert_eq!(body["vat"], "4.80");
    assert_eq!(body["grand_total"], "34.80");
}

#[tokio::test]
async fn direct_order_validation_messages() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let cases = [
        (json!({ "quantity": 1 }), "Pizza ID and quantity are required"),
        (json!({ "pizza_id": 42, "quantity": 1 }), "Invalid pizza ID"),
        (json!({ "pizza_id": 1, "quantity": -1 }), "Invalid quantity"),
        (json!({ "pizza_id": 1, "quantity": 1, "toppings": [999] }), "Invalid topping ID"),
    ];

    for (payload, message) in cases {
        let res = client
            .post(format!("{}/v1/orders", srv.base_url))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "payload {payload}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], message);
    }
}

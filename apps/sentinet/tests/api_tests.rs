//! Integration tests for the Sentinet HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real server.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use sentinet::api::{AppState, ConfigResponse, ErrorResponse, HealthResponse, create_router};
use sentinet_core::{NetworkEngine, RenderPayload, TextRecord};
use serde_json::json;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn corpus() -> Vec<TextRecord> {
    vec![
        TextRecord::new("Solar growth in the outback", "Australia").with_sentiment(0.6),
        TextRecord::new("solar panels and clean power", "Australia").with_sentiment(0.4),
        TextRecord::new("wind farm pollution risk", "UK").with_sentiment(-0.5),
        TextRecord::new("hydropower progress", "Norway").with_sentiment(0.3),
        TextRecord::missing_text("Brazil"),
    ]
}

/// Create a test server over the sample corpus.
fn create_test_server() -> TestServer {
    let state = AppState::new(NetworkEngine::default(), corpus());
    TestServer::new(create_router(state)).unwrap()
}

fn create_empty_test_server() -> TestServer {
    let state = AppState::new(NetworkEngine::default(), Vec::new());
    TestServer::new(create_router(state)).unwrap()
}

// =============================================================================
// HEALTH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(health.records, 5);
}

// =============================================================================
// CONFIG ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_config_lists_keywords() {
    let server = create_test_server();

    let response = server.get("/config").await;

    response.assert_status_ok();
    let config: ConfigResponse = response.json();
    assert_eq!(config.energy, vec!["solar", "wind", "hydropower"]);
    assert_eq!(config.positive.len(), 6);
    assert_eq!(config.negative.len(), 6);
    assert_eq!(config.layout.seed, 42);
}

// =============================================================================
// NETWORK ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_network_all() {
    let server = create_test_server();

    let response = server
        .post("/network")
        .json(&json!({"energy": "all", "sentiment": "all"}))
        .await;

    response.assert_status_ok();
    let payload: RenderPayload = response.json();
    assert!(!payload.empty);
    assert_eq!(payload.filtered_records, 4);
    assert_eq!(payload.total_records, 5);
    assert_eq!(
        payload.title,
        "Energy Types, Sentiment Words, and Countries Network for solar, wind, hydropower"
    );

    let solar = payload
        .nodes
        .iter()
        .find(|n| n.id == "energy:solar")
        .unwrap();
    assert_eq!(solar.hover, "solar (2 occurrences)");
    assert_eq!(solar.size, 300.0);
    assert_eq!(solar.color, "skyblue");

    for node in &payload.nodes {
        assert!(node.x.abs() <= 1.0 + 1e-9 && node.y.abs() <= 1.0 + 1e-9);
    }
}

#[tokio::test]
async fn test_network_defaults_to_all() {
    let server = create_test_server();

    let explicit: RenderPayload = server
        .post("/network")
        .json(&json!({"energy": "all", "sentiment": "all"}))
        .await
        .json();
    let implicit: RenderPayload = server.post("/network").json(&json!({})).await.json();

    assert_eq!(explicit, implicit);
}

#[tokio::test]
async fn test_network_keyword_list_and_polarity() {
    let server = create_test_server();

    let response = server
        .post("/network")
        .json(&json!({"energy": ["wind"], "sentiment": "negative"}))
        .await;

    response.assert_status_ok();
    let payload: RenderPayload = response.json();
    let ids: Vec<&str> = payload.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "energy:wind",
            "category:UK",
            "negative:pollution",
            "negative:risk"
        ]
    );
    assert_eq!(payload.edges.len(), 3);
    assert!(payload.title.ends_with("for wind"));
}

#[tokio::test]
async fn test_network_empty_universe_is_not_an_error() {
    let server = create_empty_test_server();

    let response = server.post("/network").json(&json!({})).await;

    response.assert_status_ok();
    let payload: RenderPayload = response.json();
    assert!(payload.empty);
    assert!(payload.nodes.is_empty());
    assert!(payload.edges.is_empty());
    assert_eq!(payload.legend.len(), 4);
    assert_eq!(payload.mean_sentiment, None);
}

#[tokio::test]
async fn test_network_unknown_keyword_is_bad_request() {
    let server = create_test_server();

    let response = server
        .post("/network")
        .json(&json!({"energy": ["nuclear"]}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = response.json();
    assert!(error.error.contains("nuclear"));
}

#[tokio::test]
async fn test_network_unknown_sentiment_is_rejected() {
    let server = create_test_server();

    let response = server
        .post("/network")
        .json(&json!({"sentiment": "neutral"}))
        .await;

    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn test_network_is_deterministic() {
    let server = create_test_server();
    let request = json!({"energy": ["solar", "hydropower"], "sentiment": "positive"});

    let first: RenderPayload = server.post("/network").json(&request).await.json();
    let second: RenderPayload = server.post("/network").json(&request).await.json();

    assert_eq!(first, second);
}

// =============================================================================
// MIDDLEWARE AND ERROR HANDLING TESTS
// =============================================================================

#[tokio::test]
async fn test_cors_allows_localhost() {
    let server = create_test_server();

    let response = server
        .get("/health")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:3000"))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn test_404_on_unknown_endpoint() {
    let server = create_test_server();

    let response = server.get("/unknown").await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_method_not_allowed() {
    let server = create_test_server();

    // /network is POST only
    let response = server.get("/network").await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_invalid_json_body() {
    let server = create_test_server();

    let response = server
        .post("/network")
        .text("not valid json")
        .content_type("application/json")
        .await;

    assert!(response.status_code().is_client_error());
}

//! HTTP API tests driven through the router without binding a socket.

#![cfg(feature = "server")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use gbp_score::analysis::{Analyzer, SimulatedProvider};
use gbp_score::config::ServerConfig;
use gbp_score::places::{MockPlaces, PlaceDetails, PlacePrediction, PlacesSource};
use gbp_score::server::{build_app, AppState};
use serde_json::Value;
use tower::ServiceExt;

/// Remote-style source whose details lookups answer without a result
struct EmptyRemote;

impl PlacesSource for EmptyRemote {
    fn name(&self) -> &'static str {
        "empty-remote"
    }

    fn autocomplete(&self, _query: &str) -> gbp_score::Result<Vec<PlacePrediction>> {
        Ok(Vec::new())
    }

    fn details(&self, _place_id: &str) -> gbp_score::Result<Option<PlaceDetails>> {
        Ok(None)
    }
}

fn app_with(places: Arc<dyn PlacesSource>) -> axum::Router {
    let analyzer = Analyzer::new(Arc::new(
        SimulatedProvider::new(places.clone()).with_seed(Some(21)),
    ));
    let state = AppState::new(places, analyzer, "https://tribly.ai");
    build_app(&ServerConfig::default(), state)
}

fn app() -> axum::Router {
    app_with(Arc::new(MockPlaces::new()))
}

async fn get(uri: &str) -> (StatusCode, Value) {
    get_from(app(), uri).await
}

async fn get_from(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = serde_json::from_slice(&bytes).expect("json body");
    (status, json)
}

#[tokio::test]
async fn test_autocomplete_returns_predictions() {
    let (status, body) = get("/autocomplete?query=tanishq").await;
    assert_eq!(status, StatusCode::OK);
    let predictions = body["predictions"].as_array().expect("predictions");
    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[0]["place_id"], "mock_place_1");
    assert!(predictions[0]["structured_formatting"]["main_text"].is_string());
}

#[tokio::test]
async fn test_autocomplete_without_query_is_bad_request() {
    let (status, body) = get("/autocomplete").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Query parameter is required");

    let (status, _) = get("/autocomplete?query=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_autocomplete_blank_query_is_empty() {
    let (status, body) = get("/autocomplete?query=%20%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["predictions"], serde_json::json!([]));
}

#[tokio::test]
async fn test_details_found() {
    let (status, body) = get("/details?placeId=mock_place_1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["name"], "Mia by Tanishq - Asilmetta, Visakhapatnam");
    assert!(body["result"]["address_components"].is_array());
}

#[tokio::test]
async fn test_details_errors() {
    let (status, body) = get("/details").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "placeId parameter is required");

    let (status, body) = get("/details?placeId=nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Place not found");
}

#[tokio::test]
async fn test_details_without_result_is_null() {
    let (status, body) = get_from(app_with(Arc::new(EmptyRemote)), "/details?placeId=abc").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["result"].is_null());
    assert!(body.get("result").is_some());
}

#[tokio::test]
async fn test_analyse_endpoint() {
    let (status, body) = get("/analyse?business=Green%20Leaf").await;
    assert_eq!(status, StatusCode::OK);
    let score = body["overallScore"].as_u64().expect("score");
    assert!(score <= 100);
    assert!(body["analysisData"]["actionItems"].as_array().expect("items").len() <= 8);

    let (status, _) = get("/analyse?business=%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_connect_endpoint() {
    let (status, body) = get("/connect?business=Cafe&phone=%2B91%2098765%2043210").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["whatsappUrl"].as_str().map(|u| u.starts_with("https://wa.me/919876543210")),
        Some(true)
    );

    let (status, _) = get("/connect?business=Cafe&phone=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["places"], "mock");
    assert_eq!(body["metrics"], "simulated");
}

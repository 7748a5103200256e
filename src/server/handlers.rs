//! HTTP handlers for the place lookup and analysis endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::{ApiError, ApiResult};
use crate::analysis::{AnalysisResult, Analyzer};
use crate::error::Result;
use crate::onboarding::{connect_links, ConnectLinks};
use crate::places::{PlaceDetails, PlacePrediction, PlacesSource};

/// State shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub places: Arc<dyn PlacesSource>,
    pub analyzer: Analyzer,
    /// Base URL for report and connect links
    pub app_url: Arc<str>,
}

impl AppState {
    pub fn new(places: Arc<dyn PlacesSource>, analyzer: Analyzer, app_url: impl Into<Arc<str>>) -> Self {
        Self {
            places,
            analyzer,
            app_url: app_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AutocompleteQuery {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsQuery {
    pub place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyseQuery {
    pub business: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub business: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    pub predictions: Vec<PlacePrediction>,
}

#[derive(Debug, Serialize)]
pub struct DetailsResponse {
    pub result: Option<PlaceDetails>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub places: &'static str,
    pub metrics: &'static str,
}

/// Present and non-empty query parameter
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Present and non-blank query parameter
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Run a blocking provider call off the async executor.
async fn blocking<T, F>(f: F, fallback: &str) -> ApiResult<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result.map_err(|e| ApiError::from_gbp(e, fallback)),
        Err(join_err) => {
            tracing::error!(error = %join_err, "Blocking task failed");
            Err(ApiError::internal(fallback))
        }
    }
}

/// GET /autocomplete?query= - Business name suggestions
pub async fn autocomplete(
    State(state): State<AppState>,
    Query(params): Query<AutocompleteQuery>,
) -> ApiResult<Json<AutocompleteResponse>> {
    let query = present(params.query)
        .ok_or_else(|| ApiError::bad_request("Query parameter is required"))?;

    info!(query = %query, source = state.places.name(), "Autocomplete request");
    let places = Arc::clone(&state.places);
    let predictions = blocking(move || places.autocomplete(&query), "Failed to search places").await?;

    Ok(Json(AutocompleteResponse { predictions }))
}

/// GET /details?placeId= - Place details
pub async fn details(
    State(state): State<AppState>,
    Query(params): Query<DetailsQuery>,
) -> ApiResult<Json<DetailsResponse>> {
    let place_id = present(params.place_id)
        .ok_or_else(|| ApiError::bad_request("placeId parameter is required"))?;

    info!(place_id = %place_id, source = state.places.name(), "Details request");
    let places = Arc::clone(&state.places);
    let details = blocking(move || places.details(&place_id), "Failed to get place details").await?;

    if details.is_none() && state.places.missing_means_not_found() {
        return Err(ApiError::not_found("Place not found"));
    }
    Ok(Json(DetailsResponse { result: details }))
}

/// GET /analyse?business= - Score a business and list action items
pub async fn analyse(
    State(state): State<AppState>,
    Query(params): Query<AnalyseQuery>,
) -> ApiResult<Json<AnalysisResult>> {
    let business = required(params.business)
        .ok_or_else(|| ApiError::bad_request("business parameter is required"))?;

    let analyzer = state.analyzer.clone();
    let result = blocking(move || analyzer.analyse(&business), "Failed to analyse business").await?;
    Ok(Json(result))
}

/// GET /connect?business=&phone= - Report link and WhatsApp share link
pub async fn connect(
    State(state): State<AppState>,
    Query(params): Query<ConnectQuery>,
) -> ApiResult<Json<ConnectLinks>> {
    let business = required(params.business)
        .ok_or_else(|| ApiError::bad_request("business parameter is required"))?;
    let phone = required(params.phone)
        .ok_or_else(|| ApiError::bad_request("phone parameter is required"))?;

    connect_links(&state.app_url, &business, &phone)
        .map(Json)
        .map_err(|e| ApiError::from_gbp(e, "Failed to build connect links"))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        places: state.places.name(),
        metrics: state.analyzer.provider_name(),
    })
}

/// Create the router with all API routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/autocomplete", get(autocomplete))
        .route("/details", get(details))
        .route("/analyse", get(analyse))
        .route("/connect", get(connect))
}

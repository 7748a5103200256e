//! Google Places API client.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use super::{PlaceDetails, PlacePrediction, PlacesSource};
use crate::error::{DataSourceErrorKind, GbpError, Result};

/// Fields requested from the details endpoint
const DETAILS_FIELDS: &str = "place_id,name,formatted_address,formatted_phone_number,\
international_phone_number,website,address_components,geometry,types,business_status,\
rating,user_ratings_total";

/// Google Places client configuration.
#[derive(Debug, Clone)]
pub struct GooglePlacesConfig {
    pub api_key: String,
    /// Base URL for the Places API
    pub api_base: String,
    /// Request timeout
    pub timeout: Duration,
}

impl GooglePlacesConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: crate::config::DEFAULT_PLACES_API_BASE.to_string(),
            timeout: Duration::from_secs(crate::config::DEFAULT_PLACES_TIMEOUT_SECS),
        }
    }
}

/// HTTP client for the Places autocomplete and details endpoints.
pub struct GooglePlacesClient {
    client: Client,
    config: GooglePlacesConfig,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<PlacePrediction>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    result: Option<PlaceDetails>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Helper to convert reqwest errors to data source errors
fn network_error(msg: &str, err: reqwest::Error) -> GbpError {
    GbpError::data_source(msg, DataSourceErrorKind::NetworkError(err.to_string()))
}

/// Map a non-success provider status to an upstream error
fn status_error(status: String, error_message: Option<String>, fallback: &str) -> GbpError {
    let message = error_message.unwrap_or_else(|| fallback.to_string());
    tracing::error!(status = %status, message = %message, "Google Places API error");
    GbpError::upstream(status, message)
}

impl GooglePlacesClient {
    /// Create a new Places client.
    pub fn new(config: GooglePlacesConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| network_error("Failed to create HTTP client", e))?;

        Ok(Self { client, config })
    }

    fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{endpoint}/json", self.config.api_base);
        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .map_err(|e| network_error("Places request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GbpError::data_source(
                format!("Places {endpoint} request"),
                DataSourceErrorKind::ProviderUnavailable(format!(
                    "HTTP status {}",
                    status.as_u16()
                )),
            ));
        }

        response
            .json::<T>()
            .map_err(|e| network_error("Failed to parse Places response", e))
    }
}

impl PlacesSource for GooglePlacesClient {
    fn name(&self) -> &'static str {
        "google-places"
    }

    fn autocomplete(&self, query: &str) -> Result<Vec<PlacePrediction>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let body: AutocompleteResponse = self.get_json(
            "autocomplete",
            &[("input", query), ("types", "establishment")],
        )?;

        match body.status.as_str() {
            "OK" | "ZERO_RESULTS" => {
                tracing::debug!(count = body.predictions.len(), "Places autocomplete");
                Ok(body.predictions)
            }
            _ => Err(status_error(
                body.status,
                body.error_message,
                "Failed to fetch places",
            )),
        }
    }

    fn details(&self, place_id: &str) -> Result<Option<PlaceDetails>> {
        let body: DetailsResponse = self.get_json(
            "details",
            &[("place_id", place_id), ("fields", DETAILS_FIELDS)],
        )?;

        if body.status == "OK" {
            Ok(body.result)
        } else {
            Err(status_error(
                body.status,
                body.error_message,
                "Failed to fetch place details",
            ))
        }
    }
}

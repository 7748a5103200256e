//! Place lookup.
//!
//! Business name autocomplete and place details, either from the Google
//! Places API or from a built-in mock data set. Types mirror the provider's
//! JSON so they can be passed through the HTTP service unchanged.

#[cfg(feature = "google-places")]
mod google;
mod mock;

#[cfg(feature = "google-places")]
pub use google::{GooglePlacesClient, GooglePlacesConfig};
pub use mock::MockPlaces;

use serde::{Deserialize, Serialize};

use crate::config::PlacesConfig;
use crate::error::Result;

/// An autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacePrediction {
    pub place_id: String,
    pub description: String,
    pub structured_formatting: StructuredFormatting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredFormatting {
    pub main_text: String,
    #[serde(default)]
    pub secondary_text: String,
}

/// Place details as returned by the details endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub international_phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u32>,
}

impl PlaceDetails {
    /// First address component carrying `kind`
    #[must_use]
    pub fn component(&self, kind: &str) -> Option<&AddressComponent> {
        self.address_components
            .iter()
            .find(|c| c.types.iter().any(|t| t == kind))
    }

    /// Preferred phone number, local format first
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.formatted_phone_number
            .as_deref()
            .or(self.international_phone_number.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Source of place predictions and details.
///
/// Implementations are blocking; async callers should run them on a
/// blocking pool.
pub trait PlacesSource: Send + Sync {
    /// Name of this source, for logging
    fn name(&self) -> &'static str;

    /// Suggestions for a partial business name. Empty input yields no
    /// suggestions.
    fn autocomplete(&self, query: &str) -> Result<Vec<PlacePrediction>>;

    /// Details for a place, or `None` if the id is unknown.
    fn details(&self, place_id: &str) -> Result<Option<PlaceDetails>>;

    /// Whether `None` from [`details`](Self::details) means the id is
    /// unknown. Remote providers can answer without a result, which is
    /// passed on as-is rather than reported as not found.
    fn missing_means_not_found(&self) -> bool {
        false
    }
}

/// Build the configured place source.
///
/// Uses the Google Places API when an API key is configured, otherwise the
/// built-in mock data set.
pub fn source_from_config(config: &PlacesConfig) -> Result<Box<dyn PlacesSource>> {
    #[cfg(feature = "google-places")]
    {
        if let Some(key) = config.resolved_api_key() {
            let client_config = GooglePlacesConfig {
                api_key: key,
                api_base: config.api_base.clone(),
                timeout: std::time::Duration::from_secs(config.timeout_secs),
            };
            return Ok(Box::new(GooglePlacesClient::new(client_config)?));
        }
    }
    #[cfg(not(feature = "google-places"))]
    {
        if config.resolved_api_key().is_some() {
            tracing::warn!("Places API key configured but google-places support is not compiled in");
        }
    }

    tracing::warn!("No Places API key configured, using mock place data");
    Ok(Box::new(MockPlaces::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_deserialize_minimal() {
        let json = r#"{"place_id":"abc","name":"Cafe"}"#;
        let details: PlaceDetails = serde_json::from_str(json).expect("parse");
        assert_eq!(details.place_id, "abc");
        assert!(details.address_components.is_empty());
        assert!(details.rating.is_none());
    }

    #[test]
    fn test_component_lookup() {
        let details = PlaceDetails {
            address_components: vec![
                AddressComponent {
                    long_name: "Asilmetta".to_string(),
                    short_name: "Asilmetta".to_string(),
                    types: vec!["sublocality_level_2".to_string(), "sublocality".to_string()],
                },
                AddressComponent {
                    long_name: "Visakhapatnam".to_string(),
                    short_name: "Visakhapatnam".to_string(),
                    types: vec!["locality".to_string(), "political".to_string()],
                },
            ],
            ..Default::default()
        };
        assert_eq!(
            details.component("locality").map(|c| c.long_name.as_str()),
            Some("Visakhapatnam")
        );
        assert!(details.component("route").is_none());
    }

    #[test]
    fn test_phone_prefers_formatted() {
        let details = PlaceDetails {
            formatted_phone_number: Some("0891 256".to_string()),
            international_phone_number: Some("+91 891 256".to_string()),
            ..Default::default()
        };
        assert_eq!(details.phone(), Some("0891 256"));

        let details = PlaceDetails {
            international_phone_number: Some("+91 891 256".to_string()),
            ..Default::default()
        };
        assert_eq!(details.phone(), Some("+91 891 256"));
    }

    #[test]
    fn test_optional_fields_skipped() {
        let json = serde_json::to_value(PlaceDetails::default()).expect("serialize");
        assert!(json.get("rating").is_none());
        assert!(json.get("website").is_none());
    }
}

//! Configuration validation for gbp-score.
//!
//! Provides validation traits and implementations for all configuration types.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{
    AnalysisConfig, AppConfig, OnboardingConfig, OutputConfig, PlacesConfig, ScoringConfig,
    ServerConfig,
};
use crate::scoring::{Metric, MAX_RECOMMENDATIONS};

/// Absolute http(s) URL with a host
static HTTP_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/?#]+(/\S*)?$").expect("static regex"));

/// Allowed distance of the weight sum from 1.0
const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

fn check_url(field: &str, url: &str, errors: &mut Vec<ConfigError>) {
    if !HTTP_URL.is_match(url) {
        errors.push(ConfigError::new(
            field,
            format!("Expected an http(s) URL, got '{url}'"),
        ));
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.places.validate());
        errors.extend(self.analysis.validate());
        errors.extend(self.scoring.validate());
        errors.extend(self.server.validate());
        errors.extend(self.onboarding.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for PlacesConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_url("places.api_base", &self.api_base, &mut errors);
        if self.timeout_secs == 0 {
            errors.push(ConfigError::new(
                "places.timeout_secs",
                "Timeout must be at least 1 second",
            ));
        }
        errors
    }
}

impl Validatable for AnalysisConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.max_recommendations == 0 {
            errors.push(ConfigError::new(
                "analysis.max_recommendations",
                "At least one recommendation must be allowed",
            ));
        } else if self.max_recommendations > MAX_RECOMMENDATIONS {
            errors.push(ConfigError::new(
                "analysis.max_recommendations",
                format!(
                    "At most {MAX_RECOMMENDATIONS} recommendations are allowed, got {}",
                    self.max_recommendations
                ),
            ));
        }
        errors
    }
}

impl Validatable for ScoringConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(weights) = &self.weights {
            if weights.as_array().iter().any(|w| !w.is_finite() || *w < 0.0) {
                errors.push(ConfigError::new(
                    "scoring.weights",
                    "Weights must be finite and non-negative",
                ));
            }
            let sum = weights.sum();
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                errors.push(ConfigError::new(
                    "scoring.weights",
                    format!("Weights must sum to 1.0, got {sum:.3}"),
                ));
            }
        }

        if let Some(benchmarks) = &self.benchmarks {
            for metric in Metric::ALL {
                if !benchmarks.get(metric).is_ordered(metric.direction()) {
                    errors.push(ConfigError::new(
                        format!("scoring.benchmarks.{}", metric.name()),
                        "Thresholds must be ordered from excellent to poor",
                    ));
                }
            }
        }

        errors
    }
}

impl Validatable for ServerConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.host.trim().is_empty() {
            errors.push(ConfigError::new("server.host", "Host must not be empty"));
        }
        if self.port == 0 {
            errors.push(ConfigError::new("server.port", "Port must be between 1 and 65535"));
        }
        errors
    }
}

impl Validatable for OnboardingConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_url("onboarding.app_url", &self.app_url, &mut errors);
        if !(0.0..=1.0).contains(&self.payment_success_rate) {
            errors.push(ConfigError::new(
                "onboarding.payment_success_rate",
                format!(
                    "Success rate must be between 0.0 and 1.0, got {}",
                    self.payment_success_rate
                ),
            ));
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        // Validate output file path if specified
        if let Some(parent) = self.file.as_deref().and_then(std::path::Path::parent) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError::new(
                    "output.file",
                    format!("Parent directory does not exist: {}", parent.display()),
                ));
            }
        }

        if self.max_items == Some(0) {
            errors.push(ConfigError::new(
                "output.max_items",
                "Max items must be at least 1 when set",
            ));
        }

        errors
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{BenchmarkThresholds, Benchmarks, ScoringWeights};

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.is_valid(), "{:?}", config.validate());
    }

    #[test]
    fn test_places_url_validation() {
        let mut config = PlacesConfig::default();
        config.api_base = "maps.googleapis.com".to_string();
        assert!(!config.is_valid());

        config.api_base = "http://localhost:8080/places".to_string();
        assert!(config.is_valid());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut weights = ScoringWeights::default();
        weights.search_rank = 0.5;
        let config = ScoringConfig {
            weights: Some(weights),
            benchmarks: None,
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "scoring.weights");
        assert!(errors[0].message.contains("sum to 1.0"));
    }

    #[test]
    fn test_negative_weights_rejected() {
        let mut weights = ScoringWeights::default();
        weights.search_rank = -0.2;
        weights.profile_completion = 0.55;
        let config = ScoringConfig {
            weights: Some(weights),
            benchmarks: None,
        };
        assert!(!config.is_valid());
    }

    #[test]
    fn test_unordered_benchmarks_rejected() {
        let mut benchmarks = Benchmarks::default();
        benchmarks.photo_count = BenchmarkThresholds::new(5.0, 10.0, 15.0, 20.0);
        let config = ScoringConfig {
            weights: None,
            benchmarks: Some(benchmarks),
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "scoring.benchmarks.Photo Count");
    }

    #[test]
    fn test_recommendation_cap_range() {
        let mut config = AnalysisConfig::default();
        assert!(config.is_valid());
        config.max_recommendations = 0;
        assert!(!config.is_valid());
        config.max_recommendations = 20;
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "analysis.max_recommendations");
        assert!(errors[0].message.contains("At most 8"));
    }

    #[test]
    fn test_server_port_validation() {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        assert!(!config.is_valid());
    }

    #[test]
    fn test_success_rate_range() {
        let config = OnboardingConfig {
            payment_success_rate: 1.5,
            ..OnboardingConfig::default()
        };
        assert!(!config.is_valid());
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::new("test_field", "test error message");
        assert_eq!(error.to_string(), "test_field: test error message");
    }
}

//! Configuration module for gbp-score.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use gbp_score::config::{AppConfig, ConfigPreset};
//!
//! // Use defaults
//! let config = AppConfig::default();
//!
//! // Use a preset
//! let config = AppConfig::from_preset(ConfigPreset::Demo);
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .seed(42)
//!     .bind("0.0.0.0", 8080)
//!     .build();
//!
//! // Load from file
//! use gbp_score::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.gbp-score.yaml` file in the working directory or `~/.config/gbp-score/`:
//!
//! ```yaml
//! places:
//!   timeout_secs: 5
//! analysis:
//!   seed: 42
//! server:
//!   port: 8080
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

// Re-export main types
pub use defaults::{
    ConfigPreset, DEFAULT_APP_URL, DEFAULT_PAYMENT_SUCCESS_RATE, DEFAULT_PLACES_API_BASE,
    DEFAULT_PLACES_TIMEOUT_SECS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, PLACES_API_KEY_ENV,
};
pub use types::{
    AnalysisConfig, AppConfig, AppConfigBuilder, OnboardingConfig, OutputConfig, PlacesConfig,
    ScoringConfig, ServerConfig, SessionConfig,
};
pub use validation::{ConfigError, Validatable};

// Re-export file utilities
pub use file::{
    discover_config_file, generate_full_example_config, load_config_file, load_or_default,
    ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.gbp-score.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().expect("schema");
        for section in ["places", "analysis", "scoring", "server", "output"] {
            assert!(schema.contains(section), "missing {section}");
        }
    }
}

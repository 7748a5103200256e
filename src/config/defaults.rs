//! Default configurations and presets for gbp-score.
//!
//! Provides named presets for common use cases and default values.

use super::types::{AnalysisConfig, AppConfig, OutputConfig};
use crate::onboarding::SimulatedGateway;
use crate::reports::ReportFormat;

// ============================================================================
// Default Values
// ============================================================================

/// Base URL of the Google Places API
pub const DEFAULT_PLACES_API_BASE: &str = "https://maps.googleapis.com/maps/api/place";

/// Places request timeout in seconds
pub const DEFAULT_PLACES_TIMEOUT_SECS: u64 = 10;

/// Environment variable holding the Places API key
pub const PLACES_API_KEY_ENV: &str = "GOOGLE_PLACES_API_KEY";

pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
pub const DEFAULT_SERVER_PORT: u16 = 3000;

pub use crate::onboarding::DEFAULT_APP_URL;

pub const DEFAULT_PAYMENT_SUCCESS_RATE: f64 = SimulatedGateway::DEFAULT_SUCCESS_RATE;

/// Latency of the demo preset, matching the web app's loading delay
const DEMO_LATENCY_MS: u64 = 2000;

/// Seed of the demo preset
const DEMO_SEED: u64 = 42;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Default settings
    Default,
    /// Demo: reproducible simulated metrics with the web app's delay
    Demo,
    /// CI/CD: machine-readable output
    CiCd,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Demo => "demo",
            Self::CiCd => "ci-cd",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "demo" => Some(Self::Demo),
            "ci-cd" | "ci" | "cd" | "pipeline" => Some(Self::CiCd),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Random simulated metrics, summary output",
            Self::Demo => "Seeded simulated metrics with a two second analysis delay",
            Self::CiCd => "JSON output without colors",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Demo, Self::CiCd]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Demo => Self::demo_preset(),
            ConfigPreset::CiCd => Self::ci_cd_preset(),
        }
    }

    /// Demo preset.
    ///
    /// - Fixed seed so every run shows the same numbers
    /// - Two second delay per analysis
    #[must_use]
    pub fn demo_preset() -> Self {
        Self {
            analysis: AnalysisConfig {
                seed: Some(DEMO_SEED),
                latency_ms: DEMO_LATENCY_MS,
                ..AnalysisConfig::default()
            },
            ..Self::default()
        }
    }

    /// CI/CD pipeline preset.
    #[must_use]
    pub fn ci_cd_preset() -> Self {
        Self {
            output: OutputConfig {
                format: ReportFormat::Json,
                no_color: true,
                ..OutputConfig::default()
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
        }
        assert_eq!(ConfigPreset::from_name("CI"), Some(ConfigPreset::CiCd));
        assert_eq!(ConfigPreset::from_name("security"), None);
    }

    #[test]
    fn test_demo_preset() {
        let config = AppConfig::from_preset(ConfigPreset::Demo);
        assert_eq!(config.analysis.seed, Some(42));
        assert_eq!(config.analysis.latency_ms, 2000);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_ci_cd_preset() {
        let config = AppConfig::from_preset(ConfigPreset::CiCd);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.output.no_color);
    }
}

//! Configuration types for gbp-score.
//!
//! Provides structured configuration for the place source, the analysis
//! pipeline, the HTTP service and report output.

use crate::reports::ReportFormat;
use crate::scoring::{Benchmarks, ScoringWeights, MAX_RECOMMENDATIONS};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::defaults::{
    DEFAULT_APP_URL, DEFAULT_PAYMENT_SUCCESS_RATE, DEFAULT_PLACES_API_BASE,
    DEFAULT_PLACES_TIMEOUT_SECS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, PLACES_API_KEY_ENV,
};

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are layered over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Place data source (Google Places or built-in mock data)
    pub places: PlacesConfig,
    /// Analysis pipeline settings
    pub analysis: AnalysisConfig,
    /// Custom scoring weights and benchmarks
    pub scoring: ScoringConfig,
    /// Session handoff storage
    pub session: SessionConfig,
    /// HTTP service
    pub server: ServerConfig,
    /// Onboarding links and payment simulation
    pub onboarding: OnboardingConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the Places API key.
    pub fn places_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.places.api_key = Some(key.into());
        self
    }

    /// Seed the simulated metrics generator.
    pub const fn seed(mut self, seed: u64) -> Self {
        self.config.analysis.seed = Some(seed);
        self
    }

    /// Set the simulated provider latency.
    pub const fn latency_ms(mut self, latency_ms: u64) -> Self {
        self.config.analysis.latency_ms = latency_ms;
        self
    }

    /// Use custom scoring weights.
    pub const fn weights(mut self, weights: ScoringWeights) -> Self {
        self.config.scoring.weights = Some(weights);
        self
    }

    /// Set the session store directory.
    pub fn session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.session.dir = Some(dir.into());
        self
    }

    /// Set the server bind address.
    pub fn bind(mut self, host: impl Into<String>, port: u16) -> Self {
        self.config.server.host = host.into();
        self.config.server.port = port;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section Configurations
// ============================================================================

/// Place data source configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PlacesConfig {
    /// Google Places API key. The `GOOGLE_PLACES_API_KEY` environment
    /// variable takes precedence. Without a key the mock data set is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL of the Places API
    pub api_base: String,
    /// Request timeout in seconds
    #[schemars(range(min = 1))]
    pub timeout_secs: u64,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_PLACES_API_BASE.to_string(),
            timeout_secs: DEFAULT_PLACES_TIMEOUT_SECS,
        }
    }
}

impl PlacesConfig {
    /// API key to use, if any. Blank values count as unset.
    #[must_use]
    pub fn resolved_api_key(&self) -> Option<String> {
        Self::non_blank(std::env::var(PLACES_API_KEY_ENV).ok())
            .or_else(|| Self::non_blank(self.api_key.clone()))
    }

    fn non_blank(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Analysis pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Seed for the simulated metrics generator (random when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Artificial delay before each simulated analysis, in milliseconds
    pub latency_ms: u64,
    /// Maximum number of action items per analysis
    #[schemars(range(min = 1, max = 8))]
    pub max_recommendations: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            seed: None,
            latency_ms: 0,
            max_recommendations: MAX_RECOMMENDATIONS,
        }
    }
}

impl AnalysisConfig {
    #[must_use]
    pub const fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Custom scoring configuration. Unset sections use the built-in tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoringConfig {
    /// Composite weights; must sum to 1.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<ScoringWeights>,
    /// Benchmark thresholds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmarks: Option<Benchmarks>,
}

/// Session handoff storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory for the file-backed session store (user cache dir when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// HTTP service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Allow cross-origin requests from any origin
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            cors: true,
        }
    }
}

impl ServerConfig {
    /// `host:port` bind address
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Onboarding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OnboardingConfig {
    /// Base URL of the web app used in report and connect links
    pub app_url: String,
    /// Probability that a simulated payment succeeds
    #[schemars(range(min = 0.0, max = 1.0))]
    pub payment_success_rate: f64,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            app_url: DEFAULT_APP_URL.to_string(),
            payment_success_rate: DEFAULT_PAYMENT_SUCCESS_RATE,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
    /// Maximum action items shown in reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
}

//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::defaults::{DEFAULT_PLACES_API_BASE, DEFAULT_PLACES_TIMEOUT_SECS};
use super::types::AppConfig;
use crate::scoring::MAX_RECOMMENDATIONS;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[".gbp-score.yaml", ".gbp-score.yml", "gbp-score.yaml"];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/gbp-score/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("gbp-score")))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override. This is useful
    /// for layering CLI args over file config.
    pub fn merge(&mut self, other: &Self) {
        // Places
        if other.places.api_key.is_some() {
            self.places.api_key.clone_from(&other.places.api_key);
        }
        if other.places.api_base != DEFAULT_PLACES_API_BASE {
            self.places.api_base.clone_from(&other.places.api_base);
        }
        if other.places.timeout_secs != DEFAULT_PLACES_TIMEOUT_SECS {
            self.places.timeout_secs = other.places.timeout_secs;
        }

        // Analysis
        if other.analysis.seed.is_some() {
            self.analysis.seed = other.analysis.seed;
        }
        if other.analysis.latency_ms != 0 {
            self.analysis.latency_ms = other.analysis.latency_ms;
        }
        if other.analysis.max_recommendations != MAX_RECOMMENDATIONS {
            self.analysis.max_recommendations = other.analysis.max_recommendations;
        }

        // Scoring
        if other.scoring.weights.is_some() {
            self.scoring.weights = other.scoring.weights;
        }
        if other.scoring.benchmarks.is_some() {
            self.scoring.benchmarks.clone_from(&other.scoring.benchmarks);
        }

        // Session
        if other.session.dir.is_some() {
            self.session.dir.clone_from(&other.session.dir);
        }

        // Server
        let default_server = super::types::ServerConfig::default();
        if other.server.host != default_server.host {
            self.server.host.clone_from(&other.server.host);
        }
        if other.server.port != default_server.port {
            self.server.port = other.server.port;
        }
        if !other.server.cors {
            self.server.cors = false;
        }

        // Onboarding
        let default_onboarding = super::types::OnboardingConfig::default();
        if other.onboarding.app_url != default_onboarding.app_url {
            self.onboarding.app_url.clone_from(&other.onboarding.app_url);
        }
        if other.onboarding.payment_success_rate != default_onboarding.payment_success_rate {
            self.onboarding.payment_success_rate = other.onboarding.payment_success_rate;
        }

        // Output - only override if explicitly set
        if other.output.format != crate::reports::ReportFormat::default() {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }
        if other.output.max_items.is_some() {
            self.output.max_items = other.output.max_items;
        }
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# gbp-score Configuration File
# =============================
#
# Place this file at:
#   - .gbp-score.yaml in the working directory
#   - ~/.config/gbp-score/gbp-score.yaml for global config
#
# CLI arguments always override file settings.

# Place data source
places:
  # Google Places API key (GOOGLE_PLACES_API_KEY takes precedence).
  # Without a key the built-in mock businesses are used.
  # api_key: your-key
  api_base: https://maps.googleapis.com/maps/api/place
  timeout_secs: 10

# Analysis pipeline
analysis:
  # Seed for reproducible simulated metrics
  # seed: 42
  # Artificial delay per analysis in milliseconds
  latency_ms: 0
  max_recommendations: 8

# Custom scoring (omit to use the built-in tables)
# scoring:
#   weights:
#     searchRank: 0.20
#     profileCompletion: 0.15
#     seoScore: 0.12
#     reviewReplyRate: 0.12
#     reviewVelocity: 0.10
#     responseTime: 0.10
#     photoCount: 0.08
#     photoQuality: 0.05
#     positiveSentiment: 0.05
#     localPackVisibility: 0.03

# Session handoff storage (defaults to the user cache directory)
# session:
#   dir: /tmp/gbp-score-session

# HTTP service
server:
  host: 127.0.0.1
  port: 3000
  cors: true

# Onboarding
onboarding:
  app_url: https://tribly.ai
  payment_success_rate: 0.9

# Output configuration
output:
  # Format: summary, json, markdown
  format: summary
  # file: report.json
  no_color: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp.path().join(".gbp-score.yaml");
        std::fs::write(&config_path, "analysis:\n  seed: 7\n").expect("write");

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().expect("tempdir");
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
analysis:
  seed: 7
  latency_ms: 250
server:
  port: 8080
output:
  format: markdown
";
        std::fs::write(&config_path, yaml).expect("write");

        let config = load_config_file(&config_path).expect("load");
        assert_eq!(config.analysis.seed, Some(7));
        assert_eq!(config.analysis.latency_ms, 250);
        assert_eq!(config.analysis.max_recommendations, 8);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.output.format, ReportFormat::Markdown);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "server: [not, a, map]\n").expect("write");
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::default();
        base.analysis.seed = Some(1);
        base.server.port = 9000;

        let overrides = AppConfig::builder()
            .seed(5)
            .output_format(ReportFormat::Json)
            .no_color(true)
            .build();
        base.merge(&overrides);

        assert_eq!(base.analysis.seed, Some(5));
        assert_eq!(base.server.port, 9000);
        assert_eq!(base.output.format, ReportFormat::Json);
        assert!(base.output.no_color);
    }

    #[test]
    fn test_full_example_config_parses() {
        let config: AppConfig =
            serde_yaml::from_str(&generate_full_example_config()).expect("example parses");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.places.timeout_secs, 10);
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "analysis:\n  seed: 3\n").expect("write");

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}

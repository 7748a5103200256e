//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scoring::Benchmarks;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Brief terminal summary
    #[default]
    Summary,
    /// Structured JSON output
    Json,
    /// Human-readable Markdown
    Markdown,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Summary => write!(f, "summary"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Title for the report
    pub title: Option<String>,
    /// Include the per-metric breakdown
    pub include_metrics: bool,
    /// Maximum action items to list
    pub max_items: Option<usize>,
    /// Table the metric statuses are classified against
    pub benchmarks: Benchmarks,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: None,
            include_metrics: true,
            max_items: None,
            benchmarks: Benchmarks::default(),
        }
    }
}

impl ReportConfig {
    #[must_use]
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Title, defaulting to one derived from the business name
    #[must_use]
    pub fn title_for(&self, business_name: &str) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("GBP Score: {business_name}"))
    }

    /// Number of action items to show out of `total`
    #[must_use]
    pub fn item_limit(&self, total: usize) -> usize {
        self.max_items.map_or(total, |max| max.min(total))
    }
}

//! JSON report generator.

use super::{metric_rows, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::analysis::AnalysisResult;
use crate::scoring::{Metric, MetricStatus};
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, result: &AnalysisResult, config: &ReportConfig) -> Result<String, ReportError> {
        let report = JsonAnalysisReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: env!("CARGO_PKG_NAME").to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
                generated_at: Utc::now().to_rfc3339(),
                title: config.title.clone(),
            },
            metrics: if config.include_metrics {
                Some(
                    metric_rows(result, &config.benchmarks)
                        .into_iter()
                        .map(|row| MetricEntry {
                            metric: row.metric,
                            value: row.value,
                            sub_score: row.sub_score,
                            status: row.status,
                        })
                        .collect(),
                )
            } else {
                None
            },
            result,
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        }
        .map_err(|e| ReportError::SerializationError(e.to_string()))?;

        Ok(json)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON structures

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonAnalysisReport<'a> {
    metadata: JsonReportMetadata,
    result: &'a AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<Vec<MetricEntry>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetricEntry {
    metric: Metric,
    value: f64,
    sub_score: u8,
    status: MetricStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Analyzer, StaticProvider};
    use std::sync::Arc;

    fn sample() -> AnalysisResult {
        Analyzer::new(Arc::new(StaticProvider::default()))
            .analyse("Cafe Nova")
            .expect("analysis")
    }

    #[test]
    fn test_json_report_shape() {
        let json = JsonReporter::new()
            .generate(&sample(), &ReportConfig::default())
            .expect("report");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["metadata"]["tool"]["name"], "gbp-score");
        assert!(value["metadata"]["generatedAt"].is_string());
        assert_eq!(value["result"]["analysisData"]["businessName"], "Cafe Nova");
        assert_eq!(value["metrics"].as_array().map(Vec::len), Some(10));
        assert_eq!(value["metrics"][0]["metric"], "searchRank");
    }

    #[test]
    fn test_compact_without_metrics() {
        let config = ReportConfig {
            include_metrics: false,
            ..Default::default()
        };
        let json = JsonReporter::new()
            .pretty(false)
            .generate(&sample(), &config)
            .expect("report");
        assert!(!json.contains('\n'));
        assert!(!json.contains("\"metrics\""));
    }
}

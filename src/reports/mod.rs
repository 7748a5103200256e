//! Report generation for analysis results.
//!
//! This module provides several output formats for an [`AnalysisResult`]:
//! - Summary: Compact terminal output, optionally coloured
//! - JSON: Structured data for programmatic integration
//! - Markdown: Human-readable documentation
//!
//! # Security
//!
//! Business names and addresses come from an external place source. The
//! `escape` module escapes them before they are embedded in Markdown.

pub mod escape;
mod json;
mod markdown;
mod summary;
mod types;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use summary::SummaryReporter;
pub use types::{ReportConfig, ReportFormat};

use crate::analysis::AnalysisResult;
use crate::scoring::{Benchmarks, Metric, MetricStatus};
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report for one analysis
    fn generate(&self, result: &AnalysisResult, config: &ReportConfig) -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_report(
        &self,
        result: &AnalysisResult,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate(result, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// One row of the per-metric breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub metric: Metric,
    pub value: f64,
    pub sub_score: u8,
    pub status: MetricStatus,
}

impl MetricRow {
    /// Raw value with its unit
    #[must_use]
    pub fn display_value(&self) -> String {
        let v = self.value;
        match self.metric {
            Metric::SearchRank => format!("#{v:.1}"),
            Metric::ResponseTime => format!("{v}h"),
            Metric::ReviewVelocity => format!("{v}/week"),
            Metric::PhotoCount => format!("{v}"),
            Metric::ProfileCompletion
            | Metric::SeoScore
            | Metric::ReviewReplyRate
            | Metric::PhotoQuality
            | Metric::PositiveSentiment
            | Metric::LocalPackVisibility => format!("{v}%"),
        }
    }
}

/// Per-metric rows in composite-weight order
#[must_use]
pub fn metric_rows(result: &AnalysisResult, benchmarks: &Benchmarks) -> Vec<MetricRow> {
    let metrics = result.analysis_data.metrics();
    Metric::ALL
        .iter()
        .map(|&metric| {
            let value = metrics.value(metric);
            MetricRow {
                metric,
                value,
                sub_score: result.sub_scores.get(metric),
                status: MetricStatus::classify(value, benchmarks.get(metric), metric.direction()),
            }
        })
        .collect()
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Analyzer, StaticProvider};
    use crate::scoring::MetricsBundle;
    use std::sync::Arc;

    fn sample() -> AnalysisResult {
        let metrics = MetricsBundle {
            response_time: 30.0,
            photo_count: 12.0,
            photo_quality: 80.0,
            review_reply_score: 85.0,
            profile_completion: 90.0,
            google_search_rank: 6.5,
            seo_score: 72.0,
            review_score: 2.0,
            positive_reviews: 78.0,
            negative_reviews: 8.0,
            local_pack_appearances: 40.0,
            review_count: 120.0,
            rating: 4.3,
        };
        Analyzer::new(Arc::new(StaticProvider::from_metrics(metrics)))
            .analyse("Cafe Nova")
            .expect("analysis")
    }

    #[test]
    fn test_metric_rows_cover_every_metric() {
        let rows = metric_rows(&sample(), &Benchmarks::default());
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].metric, Metric::SearchRank);
        assert_eq!(rows[0].display_value(), "#6.5");
        // 6.5 is past "good" (5) but within "average" (10)
        assert_eq!(rows[0].status, MetricStatus::Average);
        assert_eq!(rows[0].sub_score, 60);
    }

    #[test]
    fn test_reporters_match_format() {
        for format in [ReportFormat::Summary, ReportFormat::Json, ReportFormat::Markdown] {
            assert_eq!(create_reporter(format).format(), format);
        }
    }

    #[test]
    fn test_write_report() {
        let mut buf = Vec::new();
        JsonReporter::new()
            .write_report(&sample(), &ReportConfig::default(), &mut buf)
            .expect("write");
        assert!(String::from_utf8(buf).expect("utf8").contains("\"overallScore\""));
    }
}

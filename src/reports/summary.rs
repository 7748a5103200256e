//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{metric_rows, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::analysis::AnalysisResult;
use crate::scoring::{MetricStatus, Priority};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn score_color(score: u8) -> &'static str {
    match score {
        80..=100 => "green",
        50..=79 => "yellow",
        _ => "red",
    }
}

const fn status_color(status: MetricStatus) -> &'static str {
    match status {
        MetricStatus::Good => "green",
        MetricStatus::Average => "yellow",
        MetricStatus::Poor => "red",
    }
}

const fn priority_color(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "red",
        Priority::Medium => "yellow",
        Priority::Low => "dim",
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(&self, result: &AnalysisResult, config: &ReportConfig) -> Result<String, ReportError> {
        let data = &result.analysis_data;
        let mut lines = Vec::new();

        // Header
        lines.push(self.color(&config.title_for(&data.business_name), "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        lines.push(format!(
            "{}    {}",
            self.color("Score:", "cyan"),
            self.color(
                &format!("{}/100", result.overall_score),
                score_color(result.overall_score)
            )
        ));
        lines.push(format!(
            "{}   {:.1} ({} reviews)",
            self.color("Rating:", "cyan"),
            data.rating,
            data.review_count
        ));
        lines.push(format!("{}  {}", self.color("Address:", "cyan"), data.address));
        if data.missing_fields > 0 {
            lines.push(format!(
                "{}  {} profile fields missing",
                self.color("Profile:", "cyan"),
                data.missing_fields
            ));
        }

        if config.include_metrics {
            lines.push(String::new());
            lines.push(self.color("Metrics:", "bold"));
            for row in metric_rows(result, &config.benchmarks) {
                lines.push(format!(
                    "  {:<24}{:>10}  {:>3}  {}",
                    row.metric.name(),
                    row.display_value(),
                    row.sub_score,
                    self.color(row.status.label(), status_color(row.status))
                ));
            }
            lines.push(format!(
                "  {:<24}{:>10}",
                "Sentiment (+/=/-)",
                format!(
                    "{}/{}/{}",
                    data.positive_reviews, data.neutral_reviews, data.negative_reviews
                )
            ));
        }

        lines.push(String::new());
        lines.push(self.color("Action items:", "bold"));
        let items = &data.action_items;
        if items.is_empty() {
            lines.push(format!("  {}", self.color("Nothing to fix", "dim")));
        }
        for item in items.iter().take(config.item_limit(items.len())) {
            let tag = format!("[{}]", item.priority.name().to_uppercase());
            lines.push(format!(
                "  {} {}",
                self.color(&format!("{tag:<8}"), priority_color(item.priority)),
                item.title
            ));
            lines.push(format!("           {}", self.color(&item.description, "dim")));
        }

        Ok(lines.join("\n") + "\n")
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

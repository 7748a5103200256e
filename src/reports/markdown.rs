//! Markdown report generator.

use std::fmt::Write as _;

use super::escape::{escape_markdown_inline, escape_markdown_table};
use super::{metric_rows, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::analysis::AnalysisResult;

/// Markdown report generator
pub struct MarkdownReporter {
    include_toc: bool,
}

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { include_toc: false }
    }

    /// Include a table of contents after the title
    #[must_use]
    pub const fn with_toc(mut self, include_toc: bool) -> Self {
        self.include_toc = include_toc;
        self
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, result: &AnalysisResult, config: &ReportConfig) -> Result<String, ReportError> {
        let data = &result.analysis_data;
        let mut md = String::new();

        writeln!(
            md,
            "# {}\n",
            escape_markdown_inline(&config.title_for(&data.business_name))
        )?;

        if self.include_toc {
            writeln!(md, "- [Overview](#overview)")?;
            if config.include_metrics {
                writeln!(md, "- [Metrics](#metrics)")?;
            }
            writeln!(md, "- [Action Items](#action-items)\n")?;
        }

        writeln!(md, "## Overview\n")?;
        writeln!(md, "| Field | Value |")?;
        writeln!(md, "|-------|-------|")?;
        writeln!(md, "| Overall Score | **{}/100** |", result.overall_score)?;
        writeln!(md, "| Rating | {:.1} |", data.rating)?;
        writeln!(md, "| Reviews | {} |", data.review_count)?;
        writeln!(md, "| Address | {} |", escape_markdown_table(&data.address))?;
        writeln!(md, "| Missing Profile Fields | {} |", data.missing_fields)?;
        writeln!(
            md,
            "| Sentiment | {}% positive, {}% neutral, {}% negative |\n",
            data.positive_reviews, data.neutral_reviews, data.negative_reviews
        )?;

        if config.include_metrics {
            writeln!(md, "## Metrics\n")?;
            writeln!(md, "| Metric | Value | Sub-score | Status |")?;
            writeln!(md, "|--------|-------|-----------|--------|")?;
            for row in metric_rows(result, &config.benchmarks) {
                writeln!(
                    md,
                    "| {} | {} | {} | {} |",
                    row.metric.name(),
                    row.display_value(),
                    row.sub_score,
                    row.status.label()
                )?;
            }
            writeln!(md)?;
        }

        writeln!(md, "## Action Items\n")?;
        let items = &data.action_items;
        if items.is_empty() {
            writeln!(md, "_No action items._")?;
        }
        for (i, item) in items.iter().take(config.item_limit(items.len())).enumerate() {
            writeln!(
                md,
                "{}. **{}** ({})  \n   {}",
                i + 1,
                escape_markdown_inline(&item.title),
                item.priority.name(),
                escape_markdown_inline(&item.description)
            )?;
        }

        Ok(md)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}

//! Analyse command handler.
//!
//! Implements the `analyse` subcommand: score a business, render the report
//! and hand the result off to the session store for the `session` command.

use anyhow::{Context, Result};

use super::output::{exit_codes, should_use_color, write_output, OutputTarget};
use super::{open_places, open_session_store, report_config};
use crate::analysis::{AnalysisResult, Analyzer};
use crate::config::AppConfig;
use crate::reports::create_reporter_with_options;
use crate::session::{save_handoff, SessionHandoff};

/// Analyse command options
#[derive(Debug, Clone, Default)]
pub struct AnalyseOptions {
    pub business: String,
    pub phone: String,
    /// Fail if the overall score is below this value
    pub min_score: Option<u8>,
    /// Skip writing the session handoff
    pub no_save: bool,
    pub quiet: bool,
}

/// Run the analyse command, returning the desired exit code.
pub fn run_analyse(config: &AppConfig, options: AnalyseOptions) -> Result<i32> {
    let places = open_places(config)?;
    let analyzer = Analyzer::from_config(config, places);
    let result = analyzer
        .analyse(&options.business)
        .with_context(|| format!("failed to analyse '{}'", options.business.trim()))?;

    if !options.no_save {
        save_session(config, &result, &options.phone)?;
    }

    render(config, &result, options.quiet)?;

    if let Some(threshold) = options.min_score {
        if result.overall_score < threshold {
            tracing::error!(
                "Score {} is below minimum threshold {}",
                result.overall_score,
                threshold
            );
            return Ok(exit_codes::BELOW_THRESHOLD);
        }
    }

    Ok(exit_codes::SUCCESS)
}

/// Render `result` with the configured format and target.
pub(super) fn render(config: &AppConfig, result: &AnalysisResult, quiet: bool) -> Result<()> {
    let reporter =
        create_reporter_with_options(config.output.format, should_use_color(config.output.no_color));
    let report = reporter.generate(result, &report_config(config))?;
    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&report, &target, quiet)
}

fn save_session(config: &AppConfig, result: &AnalysisResult, phone: &str) -> Result<()> {
    let store = open_session_store(config)?;
    save_handoff(&store, &SessionHandoff::new(result, phone.trim()))
        .context("failed to save analysis session")?;
    Ok(())
}

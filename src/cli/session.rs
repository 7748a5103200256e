//! Session command handlers.
//!
//! `session show` re-renders the last analysis from the stored handoff,
//! `session clear` discards it.

use anyhow::{Context, Result};

use super::analyse::render;
use super::open_session_store;
use super::output::exit_codes;
use crate::analysis::AnalysisResult;
use crate::config::AppConfig;
use crate::scoring::CompositeScorer;
use crate::session::{clear_handoff, load_handoff, SessionHandoff};

/// Render the stored analysis.
pub fn run_session_show(config: &AppConfig, quiet: bool) -> Result<i32> {
    let store = open_session_store(config)?;
    let Some(handoff) = load_handoff(&store).context("failed to read analysis session")? else {
        if !quiet {
            eprintln!("No stored analysis. Run `gbp-score analyse <BUSINESS>` first.");
        }
        return Ok(exit_codes::NOT_FOUND);
    };

    tracing::debug!(business = %handoff.business_name, "Loaded analysis handoff");
    render(config, &restore(config, handoff), quiet)?;
    Ok(exit_codes::SUCCESS)
}

/// Remove the stored analysis.
pub fn run_session_clear(config: &AppConfig, quiet: bool) -> Result<i32> {
    let store = open_session_store(config)?;
    clear_handoff(&store).context("failed to clear analysis session")?;
    if !quiet {
        eprintln!("Cleared stored analysis in {}", store.dir().display());
    }
    Ok(exit_codes::SUCCESS)
}

/// Rebuild a full result from a handoff. Sub-scores are not stored, so they
/// are recomputed from the display metrics; the stored overall score is kept.
fn restore(config: &AppConfig, handoff: SessionHandoff) -> AnalysisResult {
    let mut scorer = CompositeScorer::new();
    if let Some(weights) = config.scoring.weights {
        scorer = scorer.with_weights(weights);
    }
    if let Some(benchmarks) = &config.scoring.benchmarks {
        scorer = scorer.with_benchmarks(benchmarks.clone());
    }

    AnalysisResult {
        overall_score: handoff.overall_score,
        sub_scores: scorer.sub_scores(&handoff.analysis_data.metrics()),
        analysis_data: handoff.analysis_data,
    }
}

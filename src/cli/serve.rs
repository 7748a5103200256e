//! Serve command handler.

use anyhow::{Context, Result};

use super::open_places;
use super::output::exit_codes;
use crate::analysis::Analyzer;
use crate::config::AppConfig;
use crate::server::{serve, AppState};

/// Run the HTTP service until shutdown.
pub fn run_serve(config: &AppConfig) -> Result<i32> {
    let places = open_places(config)?;
    let analyzer = Analyzer::from_config(config, places.clone());
    let state = AppState::new(places, analyzer, config.onboarding.app_url.as_str());

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime
        .block_on(serve(&config.server, state))
        .context("server failed")?;

    Ok(exit_codes::SUCCESS)
}

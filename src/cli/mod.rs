//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod analyse;
mod connect;
mod onboard;
pub mod output;
mod places;
#[cfg(feature = "server")]
mod serve;
mod session;

pub use analyse::{run_analyse, AnalyseOptions};
pub use connect::run_connect;
pub use onboard::{run_onboard, OnboardOptions};
pub use output::{exit_codes, should_use_color, write_output, OutputTarget};
pub use places::{run_autocomplete, run_details};
#[cfg(feature = "server")]
pub use serve::run_serve;
pub use session::{run_session_clear, run_session_show};

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::places::{source_from_config, PlacesSource};
use crate::reports::ReportConfig;
use crate::session::FileSessionStore;

/// Place source for the configured API key (mock data without one)
fn open_places(config: &AppConfig) -> Result<Arc<dyn PlacesSource>> {
    let source = source_from_config(&config.places).context("failed to set up place lookup")?;
    Ok(Arc::from(source))
}

/// Session store in the configured directory, or the user cache directory
fn open_session_store(config: &AppConfig) -> Result<FileSessionStore> {
    let store = match &config.session.dir {
        Some(dir) => FileSessionStore::new(dir.clone()),
        None => FileSessionStore::default_location(),
    };
    store.context("failed to open session store")
}

fn report_config(config: &AppConfig) -> ReportConfig {
    ReportConfig {
        max_items: config.output.max_items,
        benchmarks: config.scoring.benchmarks.clone().unwrap_or_default(),
        ..ReportConfig::default()
    }
}

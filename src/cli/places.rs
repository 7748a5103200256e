//! Place lookup command handlers.
//!
//! Implements the `autocomplete` and `details` subcommands. Output is the
//! provider's JSON shape, the same body the HTTP service returns.

use anyhow::{Context, Result};
use serde_json::json;

use super::open_places;
use super::output::{exit_codes, to_json, write_output, OutputTarget};
use crate::config::AppConfig;

/// Print suggestions for a partial business name.
pub fn run_autocomplete(config: &AppConfig, query: &str, quiet: bool) -> Result<i32> {
    let places = open_places(config)?;
    let predictions = places
        .autocomplete(query.trim())
        .context("failed to search places")?;

    tracing::debug!(count = predictions.len(), source = places.name(), "Autocomplete results");

    let body = to_json(&json!({ "predictions": predictions }))?;
    write_output(&body, &OutputTarget::from_option(config.output.file.clone()), quiet)?;
    Ok(exit_codes::SUCCESS)
}

/// Print details for a place id.
pub fn run_details(config: &AppConfig, place_id: &str, quiet: bool) -> Result<i32> {
    let places = open_places(config)?;
    let Some(result) = places
        .details(place_id.trim())
        .context("failed to get place details")?
    else {
        tracing::error!("Place not found: {place_id}");
        return Ok(exit_codes::NOT_FOUND);
    };

    let body = to_json(&json!({ "result": result }))?;
    write_output(&body, &OutputTarget::from_option(config.output.file.clone()), quiet)?;
    Ok(exit_codes::SUCCESS)
}

//! Connect command handler.

use anyhow::Result;

use super::output::{exit_codes, to_json, write_output, OutputTarget};
use crate::config::AppConfig;
use crate::onboarding::connect_links;

/// Print the report link, connect link and WhatsApp share link.
pub fn run_connect(config: &AppConfig, business: &str, phone: &str, quiet: bool) -> Result<i32> {
    let links = connect_links(&config.onboarding.app_url, business, phone)?;
    write_output(
        &to_json(&links)?,
        &OutputTarget::from_option(config.output.file.clone()),
        quiet,
    )?;
    Ok(exit_codes::SUCCESS)
}

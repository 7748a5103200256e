//! Onboard command handler.
//!
//! Drives the onboarding wizard end to end without interaction: analyse,
//! prefill the details form from place data, open a payment for the chosen
//! plan and settle it through the simulated gateway.

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::json;

use super::open_places;
use super::output::{exit_codes, to_json, write_output, OutputTarget};
use crate::analysis::Analyzer;
use crate::config::AppConfig;
use crate::onboarding::{
    prefill_from_source, PaymentPlan, SimulatedGateway, Wizard, WizardEvent, WizardState,
};

/// Onboard command options
#[derive(Debug, Clone)]
pub struct OnboardOptions {
    pub business: String,
    pub phone: String,
    pub plan: PaymentPlan,
    /// Override the prefilled contact email
    pub email: Option<String>,
    pub quiet: bool,
}

/// Run the onboarding flow, returning the desired exit code.
pub fn run_onboard(config: &AppConfig, options: OnboardOptions) -> Result<i32> {
    let places = open_places(config)?;
    let analyzer = Analyzer::from_config(config, places.clone());
    let mut wizard = Wizard::new();

    wizard
        .analyse(&analyzer, &options.business, &options.phone)
        .with_context(|| format!("failed to analyse '{}'", options.business.trim()))?;

    let session = wizard.session();
    let mut draft = prefill_from_source(
        places.as_ref(),
        &session.business_name,
        &session.business_phone_number,
    )
    .context("failed to prefill business details")?;
    if let Some(email) = options.email {
        draft.email = email;
    }

    wizard.apply(WizardEvent::ProceedToDetails(draft))?;
    wizard.apply(WizardEvent::StartPayment {
        plan: options.plan,
        at: Utc::now(),
    })?;

    let gateway = SimulatedGateway::new()
        .with_success_rate(config.onboarding.payment_success_rate)
        .with_seed(config.analysis.seed);
    let state = *wizard.settle_payment(&gateway, Utc::now())?;

    tracing::info!(business = %wizard.session().business_name, %state, "Onboarding finished");

    let body = to_json(&json!({
        "state": state,
        "session": wizard.session(),
    }))?;
    write_output(
        &body,
        &OutputTarget::from_option(config.output.file.clone()),
        options.quiet,
    )?;

    Ok(match state {
        WizardState::PaymentSuccess => exit_codes::SUCCESS,
        _ => exit_codes::PAYMENT_FAILED,
    })
}

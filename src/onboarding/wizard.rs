//! Onboarding wizard state machine.
//!
//! ```text
//! CollectingName -> Analysing -> Scored -> CollectingDetails -> PaymentPending
//!        ^             |          |                                | |  |
//!        +-- failed ---+          +-- re-analyse                   | |  +-> PaymentSuccess
//!                                                                  | +-> PaymentFailed --+
//!                                                                  +-> PaymentExpired ---+-> retry
//! ```
//!
//! `Reset` returns to `CollectingName` from any state and discards all
//! collected data.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::payment::{
    subscription_expiry, PaymentGateway, PaymentOutcome, PaymentPlan, PaymentSession,
    PaymentStatus,
};
use super::prefill::BusinessDraft;
use crate::analysis::{AnalysisResult, Analyzer};
use crate::error::{GbpError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardState {
    CollectingName,
    Analysing,
    Scored,
    CollectingDetails,
    PaymentPending,
    PaymentSuccess,
    PaymentFailed,
    PaymentExpired,
}

impl WizardState {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CollectingName => "CollectingName",
            Self::Analysing => "Analysing",
            Self::Scored => "Scored",
            Self::CollectingDetails => "CollectingDetails",
            Self::PaymentPending => "PaymentPending",
            Self::PaymentSuccess => "PaymentSuccess",
            Self::PaymentFailed => "PaymentFailed",
            Self::PaymentExpired => "PaymentExpired",
        }
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub enum WizardEvent {
    /// Submit a business name (and optional phone) for analysis
    SubmitName { name: String, phone: String },
    AnalysisCompleted(Box<AnalysisResult>),
    AnalysisFailed,
    /// Move on to the details form with a prefilled draft
    ProceedToDetails(BusinessDraft),
    /// Replace the draft while the details form is open
    UpdateDetails(BusinessDraft),
    StartPayment { plan: PaymentPlan, at: DateTime<Utc> },
    /// Seconds elapsed on the payment countdown
    Tick(u32),
    PaymentSucceeded { at: DateTime<Utc> },
    PaymentDeclined,
    RetryPayment { at: DateTime<Utc> },
    /// Close the payment dialog and return to the form
    CancelPayment,
    Reset,
}

impl WizardEvent {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SubmitName { .. } => "SubmitName",
            Self::AnalysisCompleted(_) => "AnalysisCompleted",
            Self::AnalysisFailed => "AnalysisFailed",
            Self::ProceedToDetails(_) => "ProceedToDetails",
            Self::UpdateDetails(_) => "UpdateDetails",
            Self::StartPayment { .. } => "StartPayment",
            Self::Tick(_) => "Tick",
            Self::PaymentSucceeded { .. } => "PaymentSucceeded",
            Self::PaymentDeclined => "PaymentDeclined",
            Self::RetryPayment { .. } => "RetryPayment",
            Self::CancelPayment => "CancelPayment",
            Self::Reset => "Reset",
        }
    }
}

/// Data collected over one onboarding session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingSession {
    pub business_name: String,
    pub business_phone_number: String,
    pub analysis: Option<AnalysisResult>,
    pub draft: Option<BusinessDraft>,
    pub payment: Option<PaymentSession>,
    pub subscription_expires_at: Option<DateTime<Utc>>,
}

/// Onboarding wizard.
#[derive(Debug, Clone)]
pub struct Wizard {
    state: WizardState,
    session: OnboardingSession,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: WizardState::CollectingName,
            session: OnboardingSession::default(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> WizardState {
        self.state
    }

    #[must_use]
    pub const fn session(&self) -> &OnboardingSession {
        &self.session
    }

    /// Apply an event, returning the new state.
    ///
    /// Events that are not valid in the current state are rejected with
    /// [`GbpError::InvalidTransition`] and leave the wizard unchanged.
    pub fn apply(&mut self, event: WizardEvent) -> Result<&WizardState> {
        use WizardEvent as E;
        use WizardState as S;

        let from = self.state;
        let next = match (from, event) {
            (_, E::Reset) => {
                self.session = OnboardingSession::default();
                S::CollectingName
            }
            (S::CollectingName | S::Scored, E::SubmitName { name, phone }) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(GbpError::missing_input("business name is required"));
                }
                self.session.business_name = name.to_string();
                self.session.business_phone_number = phone.trim().to_string();
                self.session.analysis = None;
                self.session.draft = None;
                S::Analysing
            }
            (S::Analysing, E::AnalysisCompleted(result)) => {
                self.session.analysis = Some(*result);
                S::Scored
            }
            (S::Analysing, E::AnalysisFailed) => S::CollectingName,
            (S::Scored, E::ProceedToDetails(draft)) | (S::CollectingDetails, E::UpdateDetails(draft)) => {
                self.session.draft = Some(draft);
                S::CollectingDetails
            }
            (S::CollectingDetails, E::StartPayment { plan, at }) => {
                let draft = self
                    .session
                    .draft
                    .as_mut()
                    .ok_or_else(|| GbpError::validation("business details are missing"))?;
                let missing = draft.missing_required();
                if !missing.is_empty() {
                    return Err(GbpError::validation(format!(
                        "required fields missing: {}",
                        missing.join(", ")
                    )));
                }
                draft.payment_plan = Some(plan);
                self.session.payment = Some(PaymentSession::new(plan, &draft.name, at));
                S::PaymentPending
            }
            (S::PaymentPending, E::Tick(secs)) => {
                let expired = self
                    .session
                    .payment
                    .as_mut()
                    .is_some_and(|payment| payment.tick(secs) == PaymentStatus::Expired);
                if expired {
                    S::PaymentExpired
                } else {
                    S::PaymentPending
                }
            }
            (S::PaymentPending, E::PaymentSucceeded { at }) => {
                if let Some(payment) = self.session.payment.as_mut() {
                    payment.status = PaymentStatus::Success;
                }
                self.session.subscription_expires_at = Some(subscription_expiry(at));
                S::PaymentSuccess
            }
            (S::PaymentPending, E::PaymentDeclined) => {
                if let Some(payment) = self.session.payment.as_mut() {
                    payment.status = PaymentStatus::Failed;
                }
                S::PaymentFailed
            }
            (S::PaymentFailed | S::PaymentExpired, E::RetryPayment { at }) => {
                let plan = self
                    .session
                    .payment
                    .as_ref()
                    .map(|p| p.plan)
                    .ok_or_else(|| GbpError::validation("no payment to retry"))?;
                let name = self
                    .session
                    .draft
                    .as_ref()
                    .map(|d| d.name.clone())
                    .unwrap_or_default();
                self.session.payment = Some(PaymentSession::new(plan, &name, at));
                S::PaymentPending
            }
            (S::PaymentPending | S::PaymentFailed | S::PaymentExpired, E::CancelPayment) => {
                self.session.payment = None;
                S::CollectingDetails
            }
            (state, event) => {
                return Err(GbpError::invalid_transition(state.name(), event.name()));
            }
        };

        if next != from {
            tracing::debug!(from = %from, to = %next, "Wizard transition");
        }
        self.state = next;
        Ok(&self.state)
    }

    /// Submit a name and run the analysis through `analyzer`.
    ///
    /// On failure the wizard returns to `CollectingName` so the caller can
    /// retry, and the analysis error is returned.
    pub fn analyse(&mut self, analyzer: &Analyzer, name: &str, phone: &str) -> Result<&WizardState> {
        self.apply(WizardEvent::SubmitName {
            name: name.to_string(),
            phone: phone.to_string(),
        })?;

        match analyzer.analyse(&self.session.business_name) {
            Ok(result) => self.apply(WizardEvent::AnalysisCompleted(Box::new(result))),
            Err(err) => {
                self.apply(WizardEvent::AnalysisFailed)?;
                Err(err)
            }
        }
    }

    /// Ask `gateway` whether the pending payment went through.
    pub fn settle_payment(
        &mut self,
        gateway: &dyn PaymentGateway,
        at: DateTime<Utc>,
    ) -> Result<&WizardState> {
        let payment = match (self.state, self.session.payment.as_ref()) {
            (WizardState::PaymentPending, Some(payment)) => payment,
            (state, _) => return Err(GbpError::invalid_transition(state.name(), "SettlePayment")),
        };

        match gateway.verify(payment)? {
            PaymentOutcome::Success => self.apply(WizardEvent::PaymentSucceeded { at }),
            PaymentOutcome::Failed => self.apply(WizardEvent::PaymentDeclined),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::StaticProvider;
    use std::sync::Arc;

    fn submit(name: &str) -> WizardEvent {
        WizardEvent::SubmitName {
            name: name.to_string(),
            phone: String::new(),
        }
    }

    #[test]
    fn test_initial_state() {
        assert_eq!(Wizard::new().state(), WizardState::CollectingName);
    }

    #[test]
    fn test_blank_name_is_rejected_in_place() {
        let mut wizard = Wizard::new();
        assert!(matches!(
            wizard.apply(submit("  ")),
            Err(GbpError::MissingInput(_))
        ));
        assert_eq!(wizard.state(), WizardState::CollectingName);
    }

    #[test]
    fn test_invalid_transition() {
        let mut wizard = Wizard::new();
        match wizard.apply(WizardEvent::Tick(1)) {
            Err(GbpError::InvalidTransition { state, event }) => {
                assert_eq!(state, "CollectingName");
                assert_eq!(event, "Tick");
            }
            other => panic!("Expected InvalidTransition, got {other:?}"),
        }
    }

    #[test]
    fn test_analysis_failure_returns_to_name() {
        let mut wizard = Wizard::new();
        wizard.apply(submit("Cafe")).expect("submit");
        assert_eq!(
            *wizard.apply(WizardEvent::AnalysisFailed).expect("fail"),
            WizardState::CollectingName
        );
    }

    #[test]
    fn test_analyse_helper() {
        let analyzer = Analyzer::new(Arc::new(StaticProvider::default()));
        let mut wizard = Wizard::new();
        let state = *wizard.analyse(&analyzer, " Cafe ", "+91 1").expect("analyse");
        assert_eq!(state, WizardState::Scored);
        assert_eq!(wizard.session().business_name, "Cafe");
        assert!(wizard.session().analysis.is_some());
    }

    #[test]
    fn test_reset_discards_everything() {
        let analyzer = Analyzer::new(Arc::new(StaticProvider::default()));
        let mut wizard = Wizard::new();
        wizard.analyse(&analyzer, "Cafe", "").expect("analyse");
        wizard.apply(WizardEvent::Reset).expect("reset");
        assert_eq!(wizard.state(), WizardState::CollectingName);
        assert_eq!(wizard.session(), &OnboardingSession::default());
    }
}

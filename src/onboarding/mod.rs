//! Business onboarding after analysis.
//!
//! Onboarding walks an analysed business through a details form prefilled
//! from place data, plan selection and a UPI payment with a countdown. The
//! [`Wizard`] state machine tracks where the business is in that flow.

mod connect;
mod payment;
mod prefill;
mod wizard;

pub use connect::{connect_links, ConnectLinks, DEFAULT_APP_URL};
pub use payment::{
    subscription_expiry, upi_url, PaymentGateway, PaymentOutcome, PaymentPlan, PaymentSession,
    PaymentStatus, SimulatedGateway, PAYMENT_WINDOW_SECS,
};
pub use prefill::{prefill_draft, prefill_from_source, BusinessCategory, BusinessDraft};
pub use wizard::{OnboardingSession, Wizard, WizardEvent, WizardState};

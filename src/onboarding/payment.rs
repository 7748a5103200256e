//! Subscription payment flow.
//!
//! A payment session wraps a UPI deep link for the selected plan and a
//! fifteen-minute countdown. Settlement goes through a [`PaymentGateway`];
//! the only gateway shipped here is a simulation.

use chrono::{DateTime, Months, Utc};
use rand::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Seconds a payment session stays open
pub const PAYMENT_WINDOW_SECS: u32 = 900;

/// Months a successful payment keeps the subscription active
const SUBSCRIPTION_MONTHS: u32 = 12;

const UPI_PAYEE: &str = "tribly@pay";
const UPI_PAYEE_NAME: &str = "Tribly%20QR";

/// Subscription plan
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentPlan {
    QrBasic,
    QrPlus,
}

impl PaymentPlan {
    /// Price in whole rupees
    #[must_use]
    pub const fn price_inr(self) -> u32 {
        match self {
            Self::QrBasic => 2999,
            Self::QrPlus => 6999,
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::QrBasic => "QR-Basic",
            Self::QrPlus => "QR-Plus",
        }
    }

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::QrBasic => "qr-basic",
            Self::QrPlus => "qr-plus",
        }
    }
}

impl std::fmt::Display for PaymentPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
    Expired,
}

/// An open payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSession {
    pub session_id: String,
    pub plan: PaymentPlan,
    pub business_name: String,
    pub upi_url: String,
    pub remaining_secs: u32,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl PaymentSession {
    /// Open a session for `plan`. A blank business name is billed as "New Business".
    #[must_use]
    pub fn new(plan: PaymentPlan, business_name: &str, now: DateTime<Utc>) -> Self {
        let business_name = match business_name.trim() {
            "" => "New Business",
            name => name,
        };
        Self {
            session_id: format!("payment-{}", now.timestamp_millis()),
            plan,
            business_name: business_name.to_string(),
            upi_url: upi_url(plan, business_name),
            remaining_secs: PAYMENT_WINDOW_SECS,
            status: PaymentStatus::Pending,
            created_at: now,
        }
    }

    /// Advance the countdown by `elapsed_secs`.
    ///
    /// A pending session that runs out of time becomes expired; settled
    /// sessions are not affected.
    pub fn tick(&mut self, elapsed_secs: u32) -> PaymentStatus {
        if self.status == PaymentStatus::Pending {
            self.remaining_secs = self.remaining_secs.saturating_sub(elapsed_secs);
            if self.remaining_secs == 0 {
                self.status = PaymentStatus::Expired;
            }
        }
        self.status
    }

    /// `MM:SS` countdown display
    #[must_use]
    pub fn countdown(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }
}

/// UPI deep link for a plan subscription
#[must_use]
pub fn upi_url(plan: PaymentPlan, business_name: &str) -> String {
    format!(
        "upi://pay?pa={UPI_PAYEE}&pn={UPI_PAYEE_NAME}&am={}&cu=INR&tn={}%20Subscription%20-%20{}",
        plan.price_inr(),
        plan.display_name(),
        encode_component(business_name)
    )
}

/// Percent-encode everything except the URI unreserved marks.
pub(super) fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(char::from(byte)),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Subscription expiry for a payment settled at `paid_at`
#[must_use]
pub fn subscription_expiry(paid_at: DateTime<Utc>) -> DateTime<Utc> {
    paid_at
        .checked_add_months(Months::new(SUBSCRIPTION_MONTHS))
        .unwrap_or(paid_at)
}

/// Settlement result reported by a gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOutcome {
    Success,
    Failed,
}

/// Trait for payment gateways.
pub trait PaymentGateway: Send + Sync {
    /// Check whether the payment for `session` went through.
    fn verify(&self, session: &PaymentSession) -> Result<PaymentOutcome>;

    fn name(&self) -> &'static str;
}

/// Gateway that settles payments at random with a fixed success rate.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    success_rate: f64,
    seed: Option<u64>,
}

impl SimulatedGateway {
    pub const DEFAULT_SUCCESS_RATE: f64 = 0.9;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            success_rate: Self::DEFAULT_SUCCESS_RATE,
            seed: None,
        }
    }

    #[must_use]
    pub const fn with_success_rate(mut self, rate: f64) -> Self {
        self.success_rate = rate;
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentGateway for SimulatedGateway {
    fn verify(&self, session: &PaymentSession) -> Result<PaymentOutcome> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let outcome = if rng.gen::<f64>() < self.success_rate {
            PaymentOutcome::Success
        } else {
            PaymentOutcome::Failed
        };
        tracing::debug!(session = %session.session_id, ?outcome, "Simulated payment settled");
        Ok(outcome)
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

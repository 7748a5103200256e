//! **Google Business Profile health scoring and recommendations.**
//!
//! `gbp-score` takes a business name, acquires a bundle of profile metrics,
//! normalises each metric against fixed industry benchmarks into a 0-100
//! sub-score, combines the sub-scores into a weighted overall score and
//! derives a ranked list of improvement actions. Around that core it ships
//! place lookup (Google Places or a built-in mock data set), a session
//! handoff store, the onboarding wizard with its payment flow, report
//! renderers, a CLI and an HTTP service.
//!
//! ## Core Concepts & Modules
//!
//! - **[`scoring`]**: Benchmarks, per-metric normalisation, the
//!   [`CompositeScorer`] and the [`RecommendationEngine`]. Everything here is
//!   pure and total: any finite metrics bundle yields a score and a
//!   (possibly empty) list of recommendations.
//! - **[`analysis`]**: The [`Analyzer`], which acquires a snapshot from a
//!   [`MetricsProvider`] and runs scoring over it.
//! - **[`places`]**: Business name autocomplete and place details behind the
//!   [`PlacesSource`] trait.
//! - **[`session`]**: Key-value session storage for the analysis handoff.
//! - **[`onboarding`]**: Details prefill, payment sessions and the wizard
//!   state machine.
//! - **[`reports`]**: Summary, JSON and Markdown renderers.
//!
//! ## Getting Started
//!
//! ```
//! use std::sync::Arc;
//! use gbp_score::{Analyzer, StaticProvider};
//!
//! let analyzer = Analyzer::new(Arc::new(StaticProvider::default()));
//! let result = analyzer.analyse("Cafe Nova").unwrap();
//! assert!(result.overall_score <= 100);
//! println!("{} scored {}/100", result.analysis_data.business_name, result.overall_score);
//! ```
//!
//! Scoring a metrics bundle directly:
//!
//! ```
//! use gbp_score::{CompositeScorer, MetricsBundle, RecommendationEngine};
//!
//! let metrics = MetricsBundle {
//!     response_time: 30.0,
//!     photo_count: 12.0,
//!     ..Default::default()
//! };
//! let score = CompositeScorer::new().overall_score(&metrics);
//! let actions = RecommendationEngine::default().action_items(&metrics);
//! assert!(score <= 100);
//! assert!(actions.len() <= 8);
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Metric values are bounded percentages, counts and hours
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod onboarding;
pub mod places;
pub mod reports;
pub mod scoring;
#[cfg(feature = "server")]
pub mod server;
pub mod session;

// Re-export main types for convenience
pub use analysis::{
    AnalysisData, AnalysisResult, Analyzer, BusinessSnapshot, MetricsProvider, SimulatedProvider,
    StaticProvider,
};
pub use config::{AppConfig, AppConfigBuilder, ConfigPreset};
pub use config::{ConfigError, Validatable};
pub use error::{ErrorContext, GbpError, OptionContext, Result};
pub use onboarding::{
    BusinessDraft, PaymentPlan, PaymentSession, Wizard, WizardEvent, WizardState,
};
pub use places::{MockPlaces, PlaceDetails, PlacePrediction, PlacesSource};
pub use reports::{ReportFormat, ReportGenerator};
pub use scoring::{
    ActionItem, Benchmarks, CompositeScorer, Metric, MetricsBundle, Priority, Recommendation,
    RecommendationEngine, ScoringWeights, SubScores,
};
pub use session::{FileSessionStore, MemorySessionStore, SessionHandoff, SessionStore};

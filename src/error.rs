//! Unified error types for gbp-score.
//!
//! Scoring and recommendation generation are total functions and never fail;
//! every error in this module is scoped to a single analysis, lookup or
//! wizard transition.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for gbp-score operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GbpError {
    /// No business name was supplied; the analysis core was not invoked
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Acquiring the metrics bundle failed
    #[error("Metrics acquisition failed: {context}")]
    DataSource {
        context: String,
        #[source]
        source: DataSourceErrorKind,
    },

    /// The external place provider answered with a non-success status
    #[error("Upstream provider error ({status}): {message}")]
    UpstreamProvider { status: String, message: String },

    /// The onboarding wizard rejected an event in its current state
    #[error("Invalid wizard transition: {event} is not allowed in state {state}")]
    InvalidTransition { state: String, event: String },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The session store could not be read or written, or held a corrupt entry
    #[error("Session storage error: {0}")]
    Session(String),
}

/// Specific data source error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DataSourceErrorKind {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for gbp-score operations
pub type Result<T> = std::result::Result<T, GbpError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl GbpError {
    /// Create a missing-input error
    pub fn missing_input(message: impl Into<String>) -> Self {
        Self::MissingInput(message.into())
    }

    /// Create a data source error with context
    pub fn data_source(context: impl Into<String>, source: DataSourceErrorKind) -> Self {
        Self::DataSource {
            context: context.into(),
            source,
        }
    }

    /// Create an upstream provider error
    pub fn upstream(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UpstreamProvider {
            status: status.into(),
            message: message.into(),
        }
    }

    /// Create an invalid transition error
    pub fn invalid_transition(state: impl Into<String>, event: impl Into<String>) -> Self {
        Self::InvalidTransition {
            state: state.into(),
            event: event.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a session storage error
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session(message.into())
    }

    /// Whether the failure came from metrics acquisition or the upstream
    /// provider, i.e. the caller may re-enable the "Analyse" action and retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::DataSource { .. } | Self::UpstreamProvider { .. })
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for GbpError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for GbpError {
    fn from(err: serde_json::Error) -> Self {
        Self::data_source(
            "JSON deserialization",
            DataSourceErrorKind::InvalidResponse(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are prepended to the error's existing context, so a
/// failure deep inside a provider reads like
/// `"analysing Cafe: fetching details: Network error: ..."`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<GbpError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: GbpError, new_ctx: &str) -> GbpError {
    match err {
        GbpError::DataSource {
            context: existing,
            source,
        } => GbpError::DataSource {
            context: chain_context(new_ctx, &existing),
            source,
        },
        GbpError::Io {
            path,
            message,
            source,
        } => GbpError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        GbpError::MissingInput(msg) => GbpError::MissingInput(chain_context(new_ctx, &msg)),
        GbpError::Config(msg) => GbpError::Config(chain_context(new_ctx, &msg)),
        GbpError::Validation(msg) => GbpError::Validation(chain_context(new_ctx, &msg)),
        GbpError::Session(msg) => GbpError::Session(chain_context(new_ctx, &msg)),
        // Provider messages and transitions are surfaced verbatim
        other @ (GbpError::UpstreamProvider { .. } | GbpError::InvalidTransition { .. }) => other,
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| GbpError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| GbpError::Validation(f().into()))
    }
}

//! Error handling module for designmypc
//!
//! Provides the crate-wide error taxonomy using thiserror. Each variant maps
//! to a distinct recovery path so callers never have to guess whether to
//! retry, fall back to structured input, or re-prompt the user.

use crate::classifier::ClassifierFailure;
use crate::types::{Tier, UseCase};
use thiserror::Error;

/// Main error type for designmypc
#[derive(Error, Debug)]
pub enum BuildError {
    /// Catalog has no bundle for an enumerated key (packaging bug)
    #[error("No catalog entry for {tier} {use_case}")]
    NotFound { use_case: UseCase, tier: Tier },

    /// External classification call failed
    #[error("Classification unavailable: {0}")]
    ClassificationUnavailable(ClassifierFailure),

    /// External chat-completion call failed
    #[error("Assistant unavailable: {0}")]
    AssistantUnavailable(ClassifierFailure),

    /// Validation errors (budget, use-case, option index)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation not valid for the current session stage
    #[error("State error: {0}")]
    State(String),

    /// IO errors (export files, terminal)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for designmypc operations
pub type Result<T> = std::result::Result<T, BuildError>;

/// What the caller should do after a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Try the same operation again
    Retry,
    /// Drop back to structured input (use-case + budget)
    FallbackToStructured,
    /// Ask the user to correct their input
    Reprompt,
    /// Not recoverable in-session
    Fatal,
}

impl BuildError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a state error
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Recovery path for this error
    pub fn recovery(&self) -> Recovery {
        match self {
            Self::NotFound { .. } => Recovery::Fatal,
            Self::ClassificationUnavailable(_) => Recovery::FallbackToStructured,
            Self::AssistantUnavailable(failure) if failure.is_transient() => Recovery::Retry,
            Self::AssistantUnavailable(_) => Recovery::Reprompt,
            Self::Validation(_) | Self::State(_) => Recovery::Reprompt,
            Self::Io(_) | Self::Json(_) => Recovery::Retry,
        }
    }

    /// Whether the session can continue after this error
    pub fn is_recoverable(&self) -> bool {
        self.recovery() != Recovery::Fatal
    }
}

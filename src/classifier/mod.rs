//! External AI collaborators.
//!
//! The resolver only knows the `Classifier` and `Completer` capabilities
//! defined here; which provider sits behind them is decided by the
//! configuration. Both are single blocking request/response calls with an
//! explicit timeout and a typed failure.
//!
//! # Modules
//!
//! - `zero_shot` - Hugging Face style zero-shot text classification
//! - `chat` - OpenAI-compatible chat completion

pub mod chat;
pub mod zero_shot;

#[cfg(test)]
mod test_support;

pub use chat::ChatCompleter;
pub use zero_shot::ZeroShotClassifier;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One candidate label with its score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Why an external call did not produce a usable answer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifierFailure {
    #[error("request timed out")]
    Timeout,

    #[error("authentication failed")]
    Authentication,

    #[error("rate limited by provider")]
    RateLimited,

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("service error: {0}")]
    Service(String),

    /// No credential or endpoint configured
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl ClassifierFailure {
    /// Failures that may succeed if the same request is sent again
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::RateLimited | Self::Service(_))
    }

    /// Map a reqwest transport error onto the failure taxonomy
    pub(crate) fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            Self::from_status(status.as_u16(), &err.to_string())
        } else {
            Self::Service(err.to_string())
        }
    }

    /// Map a non-success HTTP status onto the failure taxonomy
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => Self::Authentication,
            408 | 504 => Self::Timeout,
            429 => Self::RateLimited,
            _ => Self::Service(format!("HTTP {}: {}", status, truncate(body, 200))),
        }
    }
}

/// Maps free text onto a ranked list of candidate labels.
pub trait Classifier {
    /// Rank `labels` against `text`, highest score first.
    fn classify(&self, text: &str, labels: &[String])
    -> Result<Vec<LabelScore>, ClassifierFailure>;
}

/// Produces opaque prose from a system and a user prompt.
pub trait Completer {
    fn complete(&self, system_prompt: &str, user_prompt: &str)
    -> Result<String, ClassifierFailure>;
}

/// Sort a ranking by score, highest first. NaN scores sink to the end.
pub fn rank_descending(scores: &mut [LabelScore]) {
    scores.sort_by(|a, b| match (a.score.is_nan(), b.score.is_nan()) {
        (true, false) => std::cmp::Ordering::Greater,
        (false, true) => std::cmp::Ordering::Less,
        _ => b.score.total_cmp(&a.score),
    });
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

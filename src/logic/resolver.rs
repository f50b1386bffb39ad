//! Requirement Resolver
//!
//! Translates what the user asked for into a catalog key and a
//! `Recommendation`.
//!
//! # Design
//!
//! - **Pure logic**: no I/O; the only external call goes through the
//!   `Classifier` trait handed in by the caller
//! - **No silent defaults**: every failure is reported with its own error
//!   kind so the caller can pick retry, fallback or re-prompt
//! - **Deterministic**: identical input yields identical output
//!
//! # Resolution Rules
//!
//! | Mode        | Input                          | Use-case                    | Tier |
//! |-------------|--------------------------------|-----------------------------|------|
//! | Structured  | use-case, budget, preferences  | as given                    | `TierPolicy` on budget |
//! | Classified  | free text                      | top label has "gaming"?     | top label has "budget"? Entry : High |

use crate::catalog::{self, ComponentBundle};
use crate::classifier::{rank_descending, Classifier, LabelScore};
use crate::error::{BuildError, Result};
use crate::types::{Tier, UseCase};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Label keyword that routes to the Gaming use-case
pub const GAMING_KEYWORD: &str = "gaming";

/// Label keyword that routes to the Entry ("Budget") tier
pub const BUDGET_KEYWORD: &str = "budget";

// ============================================================================
// Tier Policy
// ============================================================================

/// Budget thresholds for structured mode.
///
/// Ceilings are inclusive: with the defaults a budget of exactly 1000 is
/// Entry and 1001 is Mid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierPolicy {
    /// Highest budget still resolved to Entry
    pub entry_ceiling: f64,
    /// Highest budget still resolved to Mid
    pub mid_ceiling: f64,
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self {
            entry_ceiling: 1000.0,
            mid_ceiling: 2000.0,
        }
    }
}

impl TierPolicy {
    /// Tier for a (validated) budget
    pub fn tier_for(&self, budget: f64) -> Tier {
        if budget <= self.entry_ceiling {
            Tier::Entry
        } else if budget <= self.mid_ceiling {
            Tier::Mid
        } else {
            Tier::High
        }
    }

    /// Ceilings must be finite, positive and strictly increasing
    pub fn validate(&self) -> Result<()> {
        if !self.entry_ceiling.is_finite() || !self.mid_ceiling.is_finite() {
            return Err(BuildError::validation("tier ceilings must be finite"));
        }
        if self.entry_ceiling <= 0.0 {
            return Err(BuildError::validation("entry ceiling must be positive"));
        }
        if self.mid_ceiling <= self.entry_ceiling {
            return Err(BuildError::validation(format!(
                "mid ceiling ({}) must be above entry ceiling ({})",
                self.mid_ceiling, self.entry_ceiling
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Requests and Recommendations
// ============================================================================

/// Structured user requirement
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRequest {
    pub use_case: UseCase,
    /// Budget in US dollars
    pub budget: f64,
    /// Free-form tags, kept for display only
    pub preferences: BTreeSet<String>,
}

impl StructuredRequest {
    pub fn new(use_case: UseCase, budget: f64) -> Self {
        Self {
            use_case,
            budget,
            preferences: BTreeSet::new(),
        }
    }

    /// Add a preference tag; blank tags are dropped
    pub fn with_preference(mut self, tag: impl AsRef<str>) -> Self {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() {
            self.preferences.insert(tag.to_string());
        }
        self
    }

    /// Build a request from raw user strings
    pub fn parse<I, S>(use_case: &str, budget: f64, preferences: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let use_case = parse_use_case(use_case)?;
        Ok(preferences
            .into_iter()
            .fold(Self::new(use_case, budget), |req, tag| req.with_preference(tag)))
    }
}

/// How a recommendation was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    Structured,
    Classified,
}

/// Resolver output: one catalog entry plus the signals that led to it
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub use_case: UseCase,
    pub tier: Tier,
    pub bundle: &'static ComponentBundle,
    /// Budget the user stated (structured mode only)
    pub budget: Option<f64>,
    /// `budget - bundle.price` (structured mode only)
    pub price_delta: Option<f64>,
    pub preferences: BTreeSet<String>,
    /// Full ranking returned by the classifier (classified mode only)
    pub labels: Vec<LabelScore>,
    /// Free-text requirement (classified mode only)
    pub requirement: Option<String>,
    pub source: ResolutionSource,
}

impl Recommendation {
    /// Top-ranked classifier label, if any
    pub fn top_label(&self) -> Option<&LabelScore> {
        self.labels.first()
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Parse a use-case from user input (case-insensitive)
pub fn parse_use_case(input: &str) -> Result<UseCase> {
    UseCase::from_str(input.trim()).map_err(|_| {
        BuildError::validation(format!(
            "unknown use-case '{}' (expected Gaming or Workstation)",
            input.trim()
        ))
    })
}

/// A budget must be a finite number above zero
pub fn validate_budget(budget: f64) -> Result<f64> {
    if !budget.is_finite() {
        return Err(BuildError::validation("budget must be a number"));
    }
    if budget <= 0.0 {
        return Err(BuildError::validation(format!(
            "budget must be positive (got {})",
            budget
        )));
    }
    Ok(budget)
}

/// Resolve a structured request.
///
/// # What This Explicitly Refuses To Do
///
/// - Use preferences to pick parts: they are carried through for display
/// - Clamp an invalid budget: a non-positive budget is a validation error
pub fn resolve_structured(request: &StructuredRequest, policy: &TierPolicy) -> Result<Recommendation> {
    let budget = validate_budget(request.budget)?;
    let tier = policy.tier_for(budget);
    let bundle = catalog::lookup(request.use_case, tier)?;
    let price_delta = budget - f64::from(bundle.price);

    info!(
        "Resolved structured request: {} {} (budget {}, delta {})",
        tier, request.use_case, budget, price_delta
    );

    Ok(Recommendation {
        use_case: request.use_case,
        tier,
        bundle,
        budget: Some(budget),
        price_delta: Some(price_delta),
        preferences: request.preferences.clone(),
        labels: Vec::new(),
        requirement: None,
        source: ResolutionSource::Structured,
    })
}

/// Keyword rule applied to the top-ranked label.
///
/// "gaming" anywhere in the label selects Gaming, otherwise Workstation;
/// "budget" selects Entry, otherwise High. Matching ignores ASCII case.
pub fn decide_from_label(label: &str) -> (UseCase, Tier) {
    let label = label.to_ascii_lowercase();
    let use_case = if label.contains(GAMING_KEYWORD) {
        UseCase::Gaming
    } else {
        UseCase::Workstation
    };
    let tier = if label.contains(BUDGET_KEYWORD) {
        Tier::Entry
    } else {
        Tier::High
    };
    (use_case, tier)
}

/// Resolve free-text requirements through an external classifier.
///
/// Any classifier failure surfaces as `BuildError::ClassificationUnavailable`;
/// an empty ranking counts as a malformed response.
pub fn resolve_classified(
    text: &str,
    classifier: &dyn Classifier,
    candidate_labels: &[String],
) -> Result<Recommendation> {
    let text = text.trim();
    if text.is_empty() {
        return Err(BuildError::validation("describe what you need the PC for"));
    }
    if candidate_labels.is_empty() {
        return Err(BuildError::validation("no candidate labels to classify against"));
    }

    let mut ranking = classifier.classify(text, candidate_labels).map_err(|failure| {
        warn!("Classifier failed: {}", failure);
        BuildError::ClassificationUnavailable(failure)
    })?;
    rank_descending(&mut ranking);

    let top = ranking.first().ok_or_else(|| {
        BuildError::ClassificationUnavailable(crate::classifier::ClassifierFailure::Malformed(
            "empty ranking".to_string(),
        ))
    })?;
    debug!("Top label: {} ({:.3})", top.label, top.score);

    let (use_case, tier) = decide_from_label(&top.label);
    let bundle = catalog::lookup(use_case, tier)?;

    info!("Resolved classified request: {} {} from '{}'", tier, use_case, top.label);

    Ok(Recommendation {
        use_case,
        tier,
        bundle,
        budget: None,
        price_delta: None,
        preferences: BTreeSet::new(),
        labels: ranking,
        requirement: Some(text.to_string()),
        source: ResolutionSource::Classified,
    })
}

// ============================================================================
// Tests
// ============================================================================

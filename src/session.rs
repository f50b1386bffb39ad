//! Build session state machine
//!
//! A `Session` is the explicit, caller-owned context for one user working
//! through the wizard. It owns the current `BuildSelection` and enforces
//! which operations are valid at each stage.
//!
//! # Stage Flow
//!
//! ```text
//! CollectingInput --resolve--> Resolved --export--> Exported
//!        ^                      |    ^                  |
//!        |                      +----+ re-select slot   | re-select slot
//!        |                                              v
//!        +------------------ reset ------------------ Resolved
//! ```
//!
//! A failed resolution leaves the session in `CollectingInput` with no
//! selection. Only `reset` returns to `CollectingInput`; there is no expiry.

use crate::classifier::Classifier;
use crate::error::{BuildError, Result};
use crate::export::BuildExport;
use crate::logic::resolver::{self, Recommendation, StructuredRequest, TierPolicy};
use crate::catalog::{ComponentBundle, Options};
use crate::types::{Slot, Tier, UseCase};
use chrono::{Local, NaiveDateTime};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Session stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionStage {
    /// Waiting for a use-case/budget or a free-text requirement
    #[default]
    CollectingInput,
    /// A build has been resolved and may be customized
    Resolved,
    /// The current build has been written to a file
    Exported,
}

impl SessionStage {
    pub const fn description(self) -> &'static str {
        match self {
            Self::CollectingInput => "Collecting input",
            Self::Resolved => "Build resolved",
            Self::Exported => "Build exported",
        }
    }

    /// Whether a build selection exists in this stage
    pub const fn has_selection(self) -> bool {
        matches!(self, Self::Resolved | Self::Exported)
    }
}

impl fmt::Display for SessionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

// ============================================================================
// Build Selection
// ============================================================================

/// A resolved bundle plus the part chosen for each slot.
///
/// Choices default to the recommended (first) option. Re-selecting one
/// slot never touches another slot or the reference price.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSelection {
    recommendation: Recommendation,
    chosen: [usize; Slot::COUNT],
    created_at: NaiveDateTime,
}

impl BuildSelection {
    /// Start a selection with every slot on its recommended part
    pub fn new(recommendation: Recommendation) -> Self {
        Self::with_timestamp(recommendation, Local::now().naive_local())
    }

    pub fn with_timestamp(recommendation: Recommendation, created_at: NaiveDateTime) -> Self {
        Self {
            recommendation,
            chosen: [0; Slot::COUNT],
            created_at,
        }
    }

    pub fn recommendation(&self) -> &Recommendation {
        &self.recommendation
    }

    pub fn bundle(&self) -> &'static ComponentBundle {
        self.recommendation.bundle
    }

    pub fn use_case(&self) -> UseCase {
        self.recommendation.use_case
    }

    pub fn tier(&self) -> Tier {
        self.recommendation.tier
    }

    /// Reference price of the bundle
    pub fn price(&self) -> u32 {
        self.bundle().price
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn options(&self, slot: Slot) -> Options {
        self.bundle().options(slot)
    }

    pub fn chosen_index(&self, slot: Slot) -> usize {
        self.chosen[slot.index()]
    }

    pub fn chosen_part(&self, slot: Slot) -> &'static str {
        self.options(slot)
            .get(self.chosen_index(slot))
            .copied()
            .unwrap_or_else(|| self.bundle().recommended(slot))
    }

    /// Chosen part for every slot, in display order
    pub fn chosen_parts(&self) -> impl Iterator<Item = (Slot, &'static str)> + '_ {
        Slot::all().map(move |slot| (slot, self.chosen_part(slot)))
    }

    /// Whether any slot differs from the recommended part
    pub fn is_customized(&self) -> bool {
        self.chosen.iter().any(|&i| i != 0)
    }

    /// Choose option `index` for `slot`
    pub fn select(&mut self, slot: Slot, index: usize) -> Result<&'static str> {
        let options = self.options(slot);
        let part = options.get(index).copied().ok_or_else(|| {
            BuildError::validation(format!(
                "{} has {} option(s); index {} is out of range",
                slot,
                options.len(),
                index
            ))
        })?;
        self.chosen[slot.index()] = index;
        Ok(part)
    }

    /// Move the choice for `slot` to the next (or previous) option, wrapping
    pub fn cycle(&mut self, slot: Slot, forward: bool) -> &'static str {
        let len = self.options(slot).len().max(1);
        let current = self.chosen_index(slot);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.chosen[slot.index()] = next;
        self.chosen_part(slot)
    }
}

// ============================================================================
// Session
// ============================================================================

/// Per-user session context
#[derive(Debug, Clone, Default)]
pub struct Session {
    stage: SessionStage,
    selection: Option<BuildSelection>,
    last_export: Option<PathBuf>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> SessionStage {
        self.stage
    }

    pub fn selection(&self) -> Option<&BuildSelection> {
        self.selection.as_ref()
    }

    /// Path of the most recent export, if the session has exported
    pub fn last_export(&self) -> Option<&Path> {
        self.last_export.as_deref()
    }

    fn ensure_collecting(&self, operation: &str) -> Result<()> {
        if self.stage != SessionStage::CollectingInput {
            return Err(BuildError::state(format!(
                "cannot {} while {} (reset first)",
                operation,
                self.stage.description().to_lowercase()
            )));
        }
        Ok(())
    }

    fn selection_mut(&mut self, operation: &str) -> Result<&mut BuildSelection> {
        self.selection
            .as_mut()
            .ok_or_else(|| BuildError::state(format!("cannot {} before a build is resolved", operation)))
    }

    fn accept(&mut self, recommendation: Recommendation) -> &BuildSelection {
        self.stage = SessionStage::Resolved;
        self.last_export = None;
        self.selection.insert(BuildSelection::new(recommendation))
    }

    /// Resolve a structured request and start a selection
    pub fn resolve_structured(
        &mut self,
        request: &StructuredRequest,
        policy: &TierPolicy,
    ) -> Result<&BuildSelection> {
        self.ensure_collecting("resolve a build")?;
        let recommendation = resolver::resolve_structured(request, policy)?;
        Ok(self.accept(recommendation))
    }

    /// Resolve free text through the classifier and start a selection.
    ///
    /// On failure the session stays in `CollectingInput` so the caller can
    /// fall back to structured input.
    pub fn resolve_from_text(
        &mut self,
        text: &str,
        classifier: &dyn Classifier,
        candidate_labels: &[String],
    ) -> Result<&BuildSelection> {
        self.ensure_collecting("resolve a build")?;
        let recommendation = resolver::resolve_classified(text, classifier, candidate_labels)?;
        Ok(self.accept(recommendation))
    }

    /// Choose a specific option for one slot
    pub fn select_option(&mut self, slot: Slot, index: usize) -> Result<&'static str> {
        let part = self.selection_mut("change a part")?.select(slot, index)?;
        debug!("Selected {} = {}", slot, part);
        self.stage = SessionStage::Resolved;
        Ok(part)
    }

    /// Step through the options of one slot
    pub fn cycle_option(&mut self, slot: Slot, forward: bool) -> Result<&'static str> {
        let part = self.selection_mut("change a part")?.cycle(slot, forward);
        debug!("Cycled {} to {}", slot, part);
        self.stage = SessionStage::Resolved;
        Ok(part)
    }

    /// Snapshot the current selection without changing stage
    pub fn snapshot(&self) -> Result<BuildExport> {
        self.selection
            .as_ref()
            .map(BuildExport::from_selection)
            .ok_or_else(|| BuildError::state("nothing to export before a build is resolved"))
    }

    /// Write the current selection to `path` and move to `Exported`
    pub fn export_to(&mut self, path: &Path) -> Result<BuildExport> {
        let export = self.snapshot()?;
        export.save_to_file(path)?;
        info!("Exported build to {}", path.display());
        self.stage = SessionStage::Exported;
        self.last_export = Some(path.to_path_buf());
        Ok(export)
    }

    /// Discard the selection and start over
    pub fn reset(&mut self) {
        info!("Session reset from stage: {}", self.stage);
        *self = Self::default();
    }
}

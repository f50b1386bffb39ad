//! Application state definitions
//!
//! Everything the renderer reads lives on `AppState`. The build itself is
//! owned by the embedded `Session`; the fields here only hold input that
//! has not been resolved yet plus cursor positions.

use crate::error::{BuildError, Result};
use crate::logic::resolver::{self, StructuredRequest, TierPolicy};
use crate::session::Session;
use crate::theme::UiConstants;
use crate::types::{Slot, Tier, UseCase};
use crate::ui::WizardStep;
use std::collections::BTreeSet;

/// Preference tags offered on the budget step
pub const PREFERENCE_TAGS: &[&str] = &[
    "Quiet",
    "RGB Lighting",
    "Small Form Factor",
    "Upgradeable",
    "Wi-Fi",
];

/// Use-case menu: the two catalog use-cases plus "describe it in words"
pub const MENU_ENTRIES: usize = 3;

/// Menu index of the free-text entry
pub const DESCRIBE_ENTRY: usize = 2;

/// Slow request queued for the event loop's next blocking call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingRequest {
    Classify,
    Advise,
}

impl PendingRequest {
    pub fn busy_label(self) -> &'static str {
        match self {
            Self::Classify => "Matching your description to a build...",
            Self::Advise => "Asking the assistant about this build...",
        }
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current wizard step
    pub step: WizardStep,
    /// Build session (stage, selection, last export)
    pub session: Session,
    /// Use-case menu cursor
    pub use_case_selection: usize,
    /// Use-case chosen on step 1, if a structured path was taken
    pub use_case: Option<UseCase>,
    /// Budget text as typed
    pub budget_input: String,
    /// Preference list cursor
    pub preference_selection: usize,
    pub preferences: BTreeSet<String>,
    /// Free-text requirement as typed
    pub requirement_input: String,
    /// Overview slot cursor
    pub slot_selection: usize,
    /// Status message for user feedback
    pub status_message: String,
    /// Inline error, cleared on the next successful action
    pub error_message: Option<String>,
    /// Latest assistant review of the build
    pub advice: Option<String>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    pub pending: Option<PendingRequest>,
    /// Budget bands used for resolution and for the budget step's tier guide
    pub tier_policy: TierPolicy,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            step: WizardStep::default(),
            session: Session::new(),
            use_case_selection: 0,
            use_case: None,
            budget_input: String::new(),
            preference_selection: 0,
            preferences: BTreeSet::new(),
            requirement_input: String::new(),
            slot_selection: 0,
            status_message: "Welcome! Choose what you'll use your PC for.".to_string(),
            error_message: None,
            advice: None,
            help_visible: false,
            pending: None,
            tier_policy: TierPolicy::default(),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tier_policy(tier_policy: TierPolicy) -> Self {
        Self {
            tier_policy,
            ..Self::default()
        }
    }

    /// Tier the typed budget would resolve to, if it is a valid budget
    pub fn typed_budget_tier(&self) -> Option<Tier> {
        let budget = self.budget_input.trim().parse::<f64>().ok()?;
        resolver::validate_budget(budget)
            .ok()
            .map(|budget| self.tier_policy.tier_for(budget))
    }

    /// Busy label for the status line while a request is queued
    pub fn busy(&self) -> Option<&'static str> {
        self.pending.map(PendingRequest::busy_label)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    /// Use-case under the menu cursor; `None` on the describe entry
    pub fn highlighted_use_case(&self) -> Option<UseCase> {
        match self.use_case_selection {
            0 => Some(UseCase::Gaming),
            1 => Some(UseCase::Workstation),
            _ => None,
        }
    }

    pub fn menu_up(&mut self) {
        self.use_case_selection = (self.use_case_selection + MENU_ENTRIES - 1) % MENU_ENTRIES;
    }

    pub fn menu_down(&mut self) {
        self.use_case_selection = (self.use_case_selection + 1) % MENU_ENTRIES;
    }

    /// Append a budget character; only digits and one decimal point
    pub fn push_budget_char(&mut self, c: char) -> bool {
        let accepted = (c.is_ascii_digit() || (c == '.' && !self.budget_input.contains('.')))
            && self.budget_input.len() < UiConstants::BUDGET_MAX_CHARS;
        if accepted {
            self.budget_input.push(c);
        }
        accepted
    }

    pub fn push_requirement_char(&mut self, c: char) -> bool {
        let accepted = self.requirement_input.chars().count() < UiConstants::REQUIREMENT_MAX_CHARS;
        if accepted {
            self.requirement_input.push(c);
        }
        accepted
    }

    pub fn preference_up(&mut self) {
        let len = PREFERENCE_TAGS.len();
        self.preference_selection = (self.preference_selection + len - 1) % len;
    }

    pub fn preference_down(&mut self) {
        self.preference_selection = (self.preference_selection + 1) % PREFERENCE_TAGS.len();
    }

    /// Toggle the preference under the cursor; returns whether it is now on
    pub fn toggle_preference(&mut self) -> bool {
        let Some(tag) = PREFERENCE_TAGS.get(self.preference_selection) else {
            return false;
        };
        if self.preferences.remove(*tag) {
            false
        } else {
            self.preferences.insert(tag.to_string());
            true
        }
    }

    /// Build a structured request from the budget step inputs
    pub fn structured_request(&self) -> Result<StructuredRequest> {
        let use_case = self
            .use_case
            .ok_or_else(|| BuildError::state("no use-case chosen"))?;
        let budget = self
            .budget_input
            .trim()
            .parse::<f64>()
            .map_err(|_| BuildError::validation("enter your budget in dollars, e.g. 1500"))?;
        let budget = resolver::validate_budget(budget)?;
        Ok(self
            .preferences
            .iter()
            .fold(StructuredRequest::new(use_case, budget), |req, tag| {
                req.with_preference(tag)
            }))
    }

    /// Slot under the overview cursor
    pub fn selected_slot(&self) -> Slot {
        Slot::all().nth(self.slot_selection).unwrap_or(Slot::Cpu)
    }

    pub fn slot_up(&mut self) {
        self.slot_selection = (self.slot_selection + Slot::COUNT - 1) % Slot::COUNT;
    }

    pub fn slot_down(&mut self) {
        self.slot_selection = (self.slot_selection + 1) % Slot::COUNT;
    }

    /// Discard inputs and the session, back to step 1
    pub fn start_over(&mut self) {
        self.session.reset();
        let session = std::mem::take(&mut self.session);
        *self = Self {
            session,
            tier_policy: self.tier_policy,
            status_message: "Started over. Choose what you'll use your PC for.".to_string(),
            ..Self::default()
        };
    }
}

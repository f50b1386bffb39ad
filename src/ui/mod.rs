//! User interface rendering module
//!
//! - `header` - ASCII header, step progress, nav bar and help overlay
//! - `screens` - One render function per wizard step

mod header;
pub mod screens;

use crate::app::AppState;
use crate::components::keybindings::KeybindingContext;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub use header::HeaderRenderer;

// ============================================================================
// Wizard State Machine
// ============================================================================

/// Wizard step for the guided build flow.
///
/// # State Transitions
///
/// ```text
/// UseCase -> Budget   -> Overview
///         \-> Describe -/
/// ```
///
/// # Invariants
///
/// - `Overview` is only entered once the session holds a resolved build
/// - Leaving `Overview` backwards means resetting the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WizardStep {
    /// Pick Gaming, Workstation, or describe needs in words.
    #[default]
    UseCase,
    /// Type a budget and toggle preference tags.
    Budget,
    /// Free-text requirement routed through the classifier.
    Describe,
    /// Resolved build with per-slot options and summary.
    Overview,
}

impl WizardStep {
    /// Get the previous step, or `None` where going back needs a reset.
    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::UseCase => None,
            Self::Budget | Self::Describe => Some(Self::UseCase),
            Self::Overview => None,
        }
    }

    /// Get the display title for this step.
    pub fn title(&self) -> &'static str {
        match self {
            Self::UseCase => "Step 1: What's your primary use case?",
            Self::Budget => "Step 2: Set your budget",
            Self::Describe => "Step 2: Describe what you need",
            Self::Overview => "Step 3: Your build",
        }
    }

    /// Get the step number (1-indexed for display).
    pub fn step_number(&self) -> usize {
        match self {
            Self::UseCase => 1,
            Self::Budget | Self::Describe => 2,
            Self::Overview => 3,
        }
    }

    /// Total number of steps.
    pub const TOTAL_STEPS: usize = 3;

    /// Progress through the wizard as a percentage
    pub fn progress_percent(&self) -> u16 {
        (self.step_number() * 100 / Self::TOTAL_STEPS) as u16
    }
}

/// UI renderer for the application
pub struct UiRenderer {
    header: HeaderRenderer,
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UiRenderer {
    pub fn new() -> Self {
        Self {
            header: HeaderRenderer::new(),
        }
    }

    /// Render the complete UI for the current step
    pub fn render(&self, f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HeaderRenderer::HEIGHT), // Header
                Constraint::Length(3),                      // Progress
                Constraint::Min(8),                         // Step content
                Constraint::Length(3),                      // Status
                Constraint::Length(1),                      // Navigation bar
            ])
            .split(f.area());

        self.header.render_header(f, main_chunks[0]);
        header::render_step_progress(f, main_chunks[1], state.step);

        match state.step {
            WizardStep::UseCase => screens::render_use_case_screen(f, main_chunks[2], state),
            WizardStep::Budget => screens::render_budget_screen(f, main_chunks[2], state),
            WizardStep::Describe => screens::render_describe_screen(f, main_chunks[2], state),
            WizardStep::Overview => screens::render_overview_screen(f, main_chunks[2], state),
        }

        header::render_status(f, main_chunks[3], state);
        header::render_nav_bar(f, main_chunks[4], state, keybinding_ctx);

        if state.help_visible {
            header::render_help_overlay(f, state, keybinding_ctx);
        }
    }
}

//! Application module
//!
//! Contains the wizard's event loop and key handling. Classifier and
//! assistant calls are single blocking requests: a key press queues one as
//! `PendingRequest`, the loop draws the busy status, then runs it.
//!
//! # Module Structure
//! - `state` - Application state (`AppState`, `PendingRequest`, menu constants)
//! - Main module - App struct and event loop

mod state;

pub use state::{AppState, PendingRequest, DESCRIBE_ENTRY, MENU_ENTRIES, PREFERENCE_TAGS};

use crate::classifier::{
    ChatCompleter, Classifier, ClassifierFailure, Completer, ZeroShotClassifier,
};
use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::config::AppConfig;
use crate::error::{BuildError, Recovery};
use crate::export::DEFAULT_FILE_NAME;
use crate::logic::advisor;
use crate::ui::{UiRenderer, WizardStep};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tracing::{debug, info, warn};

/// An HTTP collaborator, or the reason it is unavailable
type Collaborator<T> = std::result::Result<Box<T>, ClassifierFailure>;

/// Main application struct
pub struct App {
    state: AppState,
    config: AppConfig,
    ui_renderer: UiRenderer,
    /// Keybinding context for navigation hints and dispatch
    keybinding_context: KeybindingContext,
    classifier: Collaborator<dyn Classifier>,
    completer: Collaborator<dyn Completer>,
}

impl App {
    /// Create a new application with HTTP collaborators built from config.
    ///
    /// A missing API token disables the matching feature instead of failing.
    pub fn new(config: AppConfig) -> Self {
        info!("Creating new App instance");

        let classifier = ZeroShotClassifier::from_settings(&config.classifier)
            .map(|c| Box::new(c) as Box<dyn Classifier>);
        if let Err(reason) = &classifier {
            warn!("Free-text matching disabled: {}", reason);
        }

        let completer = ChatCompleter::from_settings(&config.assistant)
            .map(|c| Box::new(c) as Box<dyn Completer>);
        if let Err(reason) = &completer {
            warn!("Assistant disabled: {}", reason);
        }

        Self::from_parts(config, classifier, completer)
    }

    /// Create an application with explicit collaborators (`None` disables)
    pub fn with_collaborators(
        config: AppConfig,
        classifier: Option<Box<dyn Classifier>>,
        completer: Option<Box<dyn Completer>>,
    ) -> Self {
        let disabled = || ClassifierFailure::NotConfigured("disabled".to_string());
        Self::from_parts(
            config,
            classifier.ok_or_else(disabled),
            completer.ok_or_else(disabled),
        )
    }

    fn from_parts(
        config: AppConfig,
        classifier: Collaborator<dyn Classifier>,
        completer: Collaborator<dyn Completer>,
    ) -> Self {
        Self {
            state: AppState::with_tier_policy(config.tier_policy),
            config,
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
            classifier,
            completer,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        info!("Starting main application loop");

        loop {
            terminal.draw(|f| {
                self.ui_renderer
                    .render(f, &self.state, &self.keybinding_context)
            })?;

            // The busy status is on screen now; run the blocking call
            if self.process_pending() {
                let mut typed_ahead = Vec::new();
                while event::poll(Duration::ZERO)? {
                    typed_ahead.push(event::read()?);
                }
                if self.discard_typeahead(typed_ahead) {
                    break;
                }
                continue;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key_event) = event::read()? {
                    // Ignore release/repeat events reported by some terminals
                    if key_event.kind == KeyEventKind::Press && self.handle_key_event(key_event) {
                        break;
                    }
                }
            }
        }

        info!("Leaving main application loop at step {:?}", self.state.step);
        Ok(())
    }

    // ========================================================================
    // Pending requests
    // ========================================================================

    /// Run the queued classifier or assistant request, if any.
    /// Returns whether a request ran.
    pub fn process_pending(&mut self) -> bool {
        let Some(request) = self.state.pending.take() else {
            return false;
        };
        match request {
            PendingRequest::Classify => self.run_classification(),
            PendingRequest::Advise => self.run_advice(),
        }
        true
    }

    /// Drop input that queued up while a blocking request ran, since it was
    /// typed against the previous screen. Returns `true` if Ctrl+C was among
    /// it.
    pub fn discard_typeahead(&mut self, events: impl IntoIterator<Item = Event>) -> bool {
        let mut dropped = 0usize;
        for event in events {
            if let Event::Key(key_event) = event {
                if is_ctrl_c(&key_event) {
                    info!("Ctrl+C pressed during a request, exiting");
                    return true;
                }
                dropped += 1;
            }
        }
        if dropped > 0 {
            debug!("Discarded {} key events typed during the request", dropped);
        }
        false
    }

    fn run_classification(&mut self) {
        let classifier = match &self.classifier {
            Ok(classifier) => classifier.as_ref(),
            Err(reason) => {
                let error = BuildError::ClassificationUnavailable(reason.clone());
                self.classification_failed(error);
                return;
            }
        };

        let text = self.state.requirement_input.trim().to_string();
        info!("Classifying requirement ({} chars)", text.chars().count());
        let resolved = self
            .state
            .session
            .resolve_from_text(&text, classifier, &self.config.classifier.candidate_labels)
            .map(|selection| {
                let matched = selection
                    .recommendation()
                    .top_label()
                    .map(|top| top.label.clone())
                    .unwrap_or_default();
                format!(
                    "Matched \"{}\": here is your {} build",
                    matched,
                    selection.bundle().title()
                )
            });

        match resolved {
            Ok(message) => self.enter_overview(message),
            Err(e) => self.classification_failed(e),
        }
    }

    fn classification_failed(&mut self, error: BuildError) {
        warn!("Classification failed: {}", error);
        match error.recovery() {
            Recovery::FallbackToStructured => {
                self.state.step = WizardStep::UseCase;
                self.state.use_case_selection = 0;
                self.state.set_error(format!(
                    "{}. Pick Gaming or Workstation and enter a budget instead.",
                    error
                ));
            }
            _ => self.state.set_error(error.to_string()),
        }
    }

    fn run_advice(&mut self) {
        let completer = match &self.completer {
            Ok(completer) => completer.as_ref(),
            Err(reason) => {
                self.state
                    .set_error(format!("The assistant is unavailable ({}).", reason));
                return;
            }
        };
        let Some(selection) = self.state.session.selection() else {
            self.state.set_error("Resolve a build before asking the assistant.");
            return;
        };

        match advisor::advise(completer, selection) {
            Ok(advice) => {
                self.state.advice = Some(advice);
                self.state.set_status("Assistant review ready");
            }
            Err(e) => {
                let hint = match e.recovery() {
                    Recovery::Retry => " Press A to try again.",
                    _ => "",
                };
                self.state.set_error(format!("{}.{}", e, hint));
            }
        }
    }

    // ========================================================================
    // Key handling
    // ========================================================================

    /// Handle one key press. Returns `true` when the app should exit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        if is_ctrl_c(&key_event) {
            info!("Ctrl+C pressed, exiting");
            return true;
        }

        if self.state.pending.is_some() {
            debug!("Ignoring {:?} while a request is running", key_event.code);
            return false;
        }

        if self.state.help_visible {
            if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.state.help_visible = false;
            }
            return false;
        }

        let step = self.state.step;

        // Text entry takes raw characters before the keymap
        match (step, key_event.code) {
            (WizardStep::Describe, KeyCode::Char(c)) => {
                self.state.push_requirement_char(c);
                return false;
            }
            (WizardStep::Budget, KeyCode::Char(c)) if c.is_ascii_digit() || c == '.' => {
                self.state.push_budget_char(c);
                return false;
            }
            (WizardStep::Describe, KeyCode::Backspace) => {
                self.state.requirement_input.pop();
                return false;
            }
            (WizardStep::Budget, KeyCode::Backspace) => {
                self.state.budget_input.pop();
                return false;
            }
            _ => {}
        }

        let Some(action) = self.keybinding_context.action_for(step, key_event.code) else {
            return false;
        };
        debug!("Key {:?} -> {:?} on {:?}", key_event.code, action, step);

        match action {
            KeyAction::Quit => return true,
            KeyAction::Help => self.state.help_visible = true,
            KeyAction::Back => self.go_back(),
            KeyAction::NavigateUp => match step {
                WizardStep::UseCase => self.state.menu_up(),
                WizardStep::Budget => self.state.preference_up(),
                WizardStep::Overview => self.state.slot_up(),
                WizardStep::Describe => {}
            },
            KeyAction::NavigateDown => match step {
                WizardStep::UseCase => self.state.menu_down(),
                WizardStep::Budget => self.state.preference_down(),
                WizardStep::Overview => self.state.slot_down(),
                WizardStep::Describe => {}
            },
            KeyAction::Select => match step {
                WizardStep::UseCase => self.choose_use_case(),
                WizardStep::Budget => self.resolve_budget(),
                WizardStep::Describe => self.start_classification(),
                WizardStep::Overview => {}
            },
            KeyAction::Toggle => {
                self.state.toggle_preference();
            }
            KeyAction::PreviousOption => self.cycle_part(false),
            KeyAction::NextOption => self.cycle_part(true),
            KeyAction::Save => self.save_build(),
            KeyAction::Advise => self.start_advice(),
            KeyAction::Reset => self.state.start_over(),
            KeyAction::Type => {}
        }

        false
    }

    fn go_back(&mut self) {
        if let Some(previous) = self.state.step.previous() {
            self.state.step = previous;
            self.state.set_status("Choose what you'll use your PC for.");
        }
    }

    fn choose_use_case(&mut self) {
        match self.state.highlighted_use_case() {
            Some(use_case) => {
                info!("Use-case chosen: {}", use_case);
                self.state.use_case = Some(use_case);
                self.state.step = WizardStep::Budget;
                self.state
                    .set_status(format!("{} selected. Type your budget and press Enter.", use_case));
            }
            None => match &self.classifier {
                Ok(_) => {
                    self.state.step = WizardStep::Describe;
                    self.state
                        .set_status("Describe what you need, then press Enter.");
                }
                Err(reason) => {
                    self.state.set_error(format!(
                        "Describing your needs is unavailable ({}). Pick Gaming or Workstation.",
                        reason
                    ));
                }
            },
        }
    }

    fn resolve_budget(&mut self) {
        let request = match self.state.structured_request() {
            Ok(request) => request,
            Err(e) => {
                self.state.set_error(e.to_string());
                return;
            }
        };

        let resolved = self
            .state
            .session
            .resolve_structured(&request, &self.state.tier_policy)
            .map(|selection| {
                format!(
                    "Recommended {} build at {}",
                    selection.bundle().title(),
                    crate::catalog::format_usd(selection.price())
                )
            });

        match resolved {
            Ok(message) => self.enter_overview(message),
            Err(e) => self.state.set_error(e.to_string()),
        }
    }

    fn start_classification(&mut self) {
        if self.state.requirement_input.trim().is_empty() {
            self.state.set_error("Describe what you need first.");
            return;
        }
        self.state.error_message = None;
        self.state.pending = Some(PendingRequest::Classify);
    }

    fn enter_overview(&mut self, message: String) {
        self.state.step = WizardStep::Overview;
        self.state.slot_selection = 0;
        self.state.advice = None;
        self.state.set_status(message);
    }

    fn cycle_part(&mut self, forward: bool) {
        let slot = self.state.selected_slot();
        match self.state.session.cycle_option(slot, forward) {
            Ok(part) => {
                self.state.advice = None;
                self.state.set_status(format!("{}: {}", slot, part));
            }
            Err(e) => self.state.set_error(e.to_string()),
        }
    }

    fn save_build(&mut self) {
        let path = self.config.export_dir.join(DEFAULT_FILE_NAME);
        match self.state.session.export_to(&path) {
            Ok(_) => self
                .state
                .set_status(format!("Build saved to {}", path.display())),
            Err(e) => self
                .state
                .set_error(format!("Could not save build: {}", e)),
        }
    }

    fn start_advice(&mut self) {
        if let Err(reason) = &self.completer {
            self.state
                .set_error(format!("The assistant is unavailable ({}).", reason));
            return;
        }
        self.state.error_message = None;
        self.state.pending = Some(PendingRequest::Advise);
    }
}

fn is_ctrl_c(key_event: &KeyEvent) -> bool {
    key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
}

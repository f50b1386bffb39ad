//! Tests for the Wizard Application
//!
//! These tests drive `App` with key events the way a user would and check
//! the resulting `AppState`:
//! - Structured path: use-case, budget, preferences, overview
//! - Free-text path through a fake classifier, including fallback
//! - Part cycling, saving, advice and reset on the overview

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use designmypc::app::{App, AppState, PendingRequest, DESCRIBE_ENTRY};
use designmypc::classifier::{Classifier, ClassifierFailure, Completer, LabelScore};
use designmypc::config::AppConfig;
use designmypc::export::{BuildExport, DEFAULT_FILE_NAME};
use designmypc::session::SessionStage;
use designmypc::types::{Slot, Tier, UseCase};
use designmypc::components::keybindings::KeybindingContext;
use designmypc::logic::resolver::TierPolicy;
use designmypc::ui::{UiRenderer, WizardStep};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tempfile::TempDir;

struct FakeClassifier(Result<Vec<LabelScore>, ClassifierFailure>);

impl Classifier for FakeClassifier {
    fn classify(&self, _text: &str, _labels: &[String]) -> Result<Vec<LabelScore>, ClassifierFailure> {
        self.0.clone()
    }
}

struct FakeCompleter(&'static str);

impl Completer for FakeCompleter {
    fn complete(&self, _system: &str, _user: &str) -> Result<String, ClassifierFailure> {
        Ok(self.0.to_string())
    }
}

fn offline_app() -> App {
    App::with_collaborators(AppConfig::default(), None, None)
}

fn app_with(
    classifier: FakeClassifier,
    completer: Option<FakeCompleter>,
    config: AppConfig,
) -> App {
    App::with_collaborators(
        config,
        Some(Box::new(classifier) as Box<dyn Classifier>),
        completer.map(|c| Box::new(c) as Box<dyn Completer>),
    )
}

/// Draw one frame and return the screen as text rows
fn render_rows(app: &App) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
    let renderer = UiRenderer::new();
    let keybindings = KeybindingContext::new();
    terminal
        .draw(|f| renderer.render(f, app.state(), &keybindings))
        .unwrap();
    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(usize::from(buffer.area.width))
        .map(|row| row.iter().map(|cell| cell.symbol()).collect())
        .collect()
}

fn press(app: &mut App, code: KeyCode) -> bool {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Walk the structured path up to the overview
fn structured_build(app: &mut App, use_case_down: usize, budget: &str) {
    for _ in 0..use_case_down {
        press(app, KeyCode::Down);
    }
    press(app, KeyCode::Enter);
    type_text(app, budget);
    press(app, KeyCode::Enter);
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn test_app_state_default() {
    let state = AppState::default();
    assert_eq!(state.step, WizardStep::UseCase);
    assert!(state.status_message.contains("Welcome"));
    assert!(!state.help_visible);
    assert!(state.pending.is_none());
    assert_eq!(state.session.stage(), SessionStage::CollectingInput);
}

// =============================================================================
// Structured Path
// =============================================================================

#[test]
fn test_structured_path_reaches_overview() {
    let mut app = offline_app();
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state().step, WizardStep::Budget);
    assert_eq!(app.state().use_case, Some(UseCase::Gaming));

    type_text(&mut app, "1500");
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Enter);

    let state = app.state();
    assert_eq!(state.step, WizardStep::Overview);
    assert!(state.error_message.is_none());
    let selection = state.session.selection().unwrap();
    assert_eq!(selection.tier(), Tier::Mid);
    assert!(selection.recommendation().preferences.contains("Quiet"));
}

#[test]
fn test_budget_screen_shows_configured_tier_bands() {
    let config = AppConfig {
        tier_policy: TierPolicy {
            entry_ceiling: 500.0,
            mid_ceiling: 800.0,
        },
        ..AppConfig::default()
    };
    let mut app = App::with_collaborators(config, None, None);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state().step, WizardStep::Budget);

    let screen = render_rows(&app).join("\n");
    assert!(screen.contains("up to $500"), "{}", screen);
    assert!(screen.contains("above $800"), "{}", screen);
    assert!(!screen.contains("up to $1,000"), "{}", screen);
    assert!(screen.contains("$3,000 build"), "{}", screen);

    type_text(&mut app, "900");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state().session.selection().unwrap().tier(), Tier::High);
}

#[test]
fn test_empty_budget_shows_inline_error() {
    let mut app = offline_app();
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.state().step, WizardStep::Budget);
    assert!(app.state().error_message.is_some());
    assert!(app.state().session.selection().is_none());
}

#[test]
fn test_budget_ignores_letters_and_backspace_edits() {
    let mut app = offline_app();
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "2x5");
    press(&mut app, KeyCode::Backspace);
    type_text(&mut app, "00");
    assert_eq!(app.state().budget_input, "200");
}

#[test]
fn test_escape_returns_to_use_case() {
    let mut app = offline_app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.state().step, WizardStep::UseCase);
}

// =============================================================================
// Free-text Path
// =============================================================================

#[test]
fn test_describe_requires_classifier() {
    let mut app = offline_app();
    press(&mut app, KeyCode::Up);
    assert_eq!(app.state().use_case_selection, DESCRIBE_ENTRY);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state().step, WizardStep::UseCase);
    assert!(app.state().error_message.is_some());
}

#[test]
fn test_describe_path_uses_top_label() {
    let classifier = FakeClassifier(Ok(vec![
        LabelScore::new("gaming performance focused", 0.2),
        LabelScore::new("budget conscious", 0.8),
    ]));
    let mut app = app_with(classifier, None, AppConfig::default());

    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state().step, WizardStep::Describe);

    // 'q' and '?' are text here, not shortcuts
    type_text(&mut app, "quiet office pc?");
    assert_eq!(app.state().requirement_input, "quiet office pc?");
    assert!(!app.state().help_visible);

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state().pending, Some(PendingRequest::Classify));
    assert!(app.process_pending());

    let state = app.state();
    assert!(state.pending.is_none());
    assert_eq!(state.step, WizardStep::Overview);
    let selection = state.session.selection().unwrap();
    assert_eq!(selection.use_case(), UseCase::Workstation);
    assert_eq!(selection.tier(), Tier::Entry);
}

#[test]
fn test_classifier_failure_falls_back_to_use_case() {
    let classifier = FakeClassifier(Err(ClassifierFailure::Timeout));
    let mut app = app_with(classifier, None, AppConfig::default());

    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "video editing");
    press(&mut app, KeyCode::Enter);
    assert!(app.process_pending());

    let state = app.state();
    assert_eq!(state.step, WizardStep::UseCase);
    assert_eq!(state.session.stage(), SessionStage::CollectingInput);
    assert!(state.session.selection().is_none());
    assert!(state.error_message.as_deref().unwrap_or_default().contains("Gaming or Workstation"));
}

#[test]
fn test_keys_ignored_while_request_pending() {
    let classifier = FakeClassifier(Ok(vec![LabelScore::new("high-end enthusiast", 1.0)]));
    let mut app = app_with(classifier, None, AppConfig::default());
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "everything");
    press(&mut app, KeyCode::Enter);

    assert!(!press(&mut app, KeyCode::Esc));
    assert_eq!(app.state().step, WizardStep::Describe);
    assert!(app.process_pending());
    assert_eq!(app.state().step, WizardStep::Overview);
}

#[test]
fn test_keys_typed_during_request_are_discarded() {
    let classifier = FakeClassifier(Ok(vec![LabelScore::new("gaming performance focused", 0.9)]));
    let mut app = app_with(classifier, None, AppConfig::default());
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "4k gaming");
    press(&mut app, KeyCode::Enter);
    assert!(app.process_pending());
    assert_eq!(app.state().step, WizardStep::Overview);

    // 'r' and 'q' would reset and quit on the overview
    let typed = [KeyCode::Char('r'), KeyCode::Char('s'), KeyCode::Char('q')]
        .map(|code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    assert!(!app.discard_typeahead(typed));

    let state = app.state();
    assert_eq!(state.step, WizardStep::Overview);
    assert_eq!(state.session.stage(), SessionStage::Resolved);
    assert!(state.session.last_export().is_none());
}

#[test]
fn test_ctrl_c_typed_during_request_still_quits() {
    let mut app = offline_app();
    let typed = vec![
        Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
        Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
    ];
    assert!(app.discard_typeahead(typed));
}

// =============================================================================
// Overview
// =============================================================================

#[test]
fn test_cycle_part_on_overview() {
    let mut app = offline_app();
    structured_build(&mut app, 0, "3000");
    press(&mut app, KeyCode::Down);
    assert_eq!(app.state().selected_slot(), Slot::Gpu);
    press(&mut app, KeyCode::Right);

    let selection = app.state().session.selection().unwrap();
    assert_eq!(selection.chosen_part(Slot::Gpu), "RX 7900 XTX");
    assert_eq!(selection.chosen_part(Slot::Cpu), "AMD Ryzen 9 7950X3D");
    assert_eq!(selection.price(), 3000);
}

#[test]
fn test_save_writes_export_dir() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        export_dir: dir.path().to_path_buf(),
        ..AppConfig::default()
    };
    let mut app = App::with_collaborators(config, None, None);
    structured_build(&mut app, 1, "2000");
    press(&mut app, KeyCode::Char('s'));

    let path = dir.path().join(DEFAULT_FILE_NAME);
    assert_eq!(app.state().session.stage(), SessionStage::Exported);
    assert_eq!(app.state().session.last_export(), Some(path.as_path()));

    let export = BuildExport::load_from_file(&path).unwrap();
    assert_eq!(export.build_type, "Mid Workstation");
    assert_eq!(export.budget, Some(2000.0));
}

#[test]
fn test_advice_shown_after_request_runs() {
    let classifier = FakeClassifier(Err(ClassifierFailure::Timeout));
    let completer = FakeCompleter("  Great for 1440p.  ");
    let mut app = app_with(classifier, Some(completer), AppConfig::default());
    structured_build(&mut app, 0, "1200");
    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.state().pending, Some(PendingRequest::Advise));
    assert!(app.process_pending());
    assert_eq!(app.state().advice.as_deref(), Some("Great for 1440p."));
}

#[test]
fn test_advice_without_assistant_is_inline_error() {
    let mut app = offline_app();
    structured_build(&mut app, 0, "1200");
    press(&mut app, KeyCode::Char('a'));
    assert!(app.state().pending.is_none());
    assert!(app.state().error_message.is_some());
    assert!(!app.process_pending());
}

#[test]
fn test_escape_on_overview_keeps_build() {
    let mut app = offline_app();
    structured_build(&mut app, 0, "1500");
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.state().step, WizardStep::Overview);
    assert!(app.state().session.selection().is_some());
}

#[test]
fn test_reset_starts_over() {
    let mut app = offline_app();
    structured_build(&mut app, 0, "900");
    press(&mut app, KeyCode::Char('r'));
    let state = app.state();
    assert_eq!(state.step, WizardStep::UseCase);
    assert!(state.session.selection().is_none());
    assert!(state.budget_input.is_empty());
}

// =============================================================================
// Global Keys
// =============================================================================

#[test]
fn test_help_toggle_and_quit() {
    let mut app = offline_app();
    assert!(!press(&mut app, KeyCode::Char('?')));
    assert!(app.state().help_visible);
    // Keys are swallowed while help is open
    assert!(!press(&mut app, KeyCode::Char('q')));
    press(&mut app, KeyCode::Esc);
    assert!(!app.state().help_visible);
    assert!(press(&mut app, KeyCode::Char('q')));
}

#[test]
fn test_ctrl_c_always_quits() {
    let mut app = offline_app();
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Enter);
    assert!(app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
}

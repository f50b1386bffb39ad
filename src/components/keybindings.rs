//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change with the current wizard
//! step. The same registry feeds the nav bar and the help overlay, so what
//! is displayed always matches what `App` handles.

use crate::ui::WizardStep;
use crossterm::event::KeyCode;
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    Select,
    Toggle,
    PreviousOption,
    NextOption,
    Back,
    Save,
    Advise,
    Reset,
    Quit,
    Help,
    Type,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Step-specific keybindings
    step_bindings: HashMap<WizardStep, Vec<Keybinding>>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    pub fn new() -> Self {
        let mut ctx = Self {
            step_bindings: HashMap::new(),
        };
        ctx.register_defaults();
        ctx
    }

    fn register_defaults(&mut self) {
        self.step_bindings.insert(
            WizardStep::UseCase,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Navigate up"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Navigate down"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Choose"),
                Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
                Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            ],
        );

        self.step_bindings.insert(
            WizardStep::Budget,
            vec![
                Keybinding::new(KeyCode::Char('0'), KeyAction::Type, "0-9", "Type budget"),
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous preference"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next preference"),
                Keybinding::new(KeyCode::Char(' '), KeyAction::Toggle, "Space", "Toggle preference"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Design build"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back"),
                Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            ],
        );

        self.step_bindings.insert(
            WizardStep::Describe,
            vec![
                Keybinding::new(KeyCode::Char('a'), KeyAction::Type, "Text", "Describe your needs"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Classify"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back"),
            ],
        );

        self.step_bindings.insert(
            WizardStep::Overview,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous component"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next component"),
                Keybinding::new(KeyCode::Left, KeyAction::PreviousOption, "Left", "Previous option"),
                Keybinding::new(KeyCode::Right, KeyAction::NextOption, "Right", "Next option"),
                Keybinding::new(KeyCode::Char('s'), KeyAction::Save, "S", "Save build"),
                Keybinding::new(KeyCode::Char('a'), KeyAction::Advise, "A", "Ask assistant"),
                Keybinding::new(KeyCode::Char('r'), KeyAction::Reset, "R", "Start over"),
                Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
                Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            ],
        );
    }

    /// Get keybindings for a specific step
    pub fn get_bindings(&self, step: WizardStep) -> Vec<&Keybinding> {
        self.step_bindings
            .get(&step)
            .map(|bindings| bindings.iter().collect())
            .unwrap_or_default()
    }

    /// Look up the action bound to a key on this step
    pub fn action_for(&self, step: WizardStep, key: KeyCode) -> Option<KeyAction> {
        self.get_bindings(step)
            .into_iter()
            .find(|b| b.key == key && b.action != KeyAction::Type)
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, step: WizardStep) -> Vec<NavBarItem> {
        let mut items: Vec<NavBarItem> = Vec::new();
        let mut has_nav = false;
        let mut has_option = false;

        for binding in self.get_bindings(step) {
            match binding.action {
                // Combine Up/Down into single item for cleaner display
                KeyAction::NavigateUp | KeyAction::NavigateDown => {
                    if !has_nav {
                        items.push(NavBarItem {
                            key_display: "Up/Dn".to_string(),
                            action_label: "Navigate".to_string(),
                        });
                        has_nav = true;
                    }
                }
                KeyAction::PreviousOption | KeyAction::NextOption => {
                    if !has_option {
                        items.push(NavBarItem {
                            key_display: "Lt/Rt".to_string(),
                            action_label: "Change part".to_string(),
                        });
                        has_option = true;
                    }
                }
                _ => items.push(NavBarItem {
                    key_display: binding.display.clone(),
                    action_label: binding.description.clone(),
                }),
            }
        }

        items
    }

    /// Get full help content for a step (for help overlay)
    pub fn get_help_content(&self, step: WizardStep) -> Vec<HelpSection> {
        let groups: [(&str, &[KeyAction]); 3] = [
            (
                "Navigation",
                &[
                    KeyAction::NavigateUp,
                    KeyAction::NavigateDown,
                    KeyAction::PreviousOption,
                    KeyAction::NextOption,
                ],
            ),
            (
                "Actions",
                &[
                    KeyAction::Type,
                    KeyAction::Select,
                    KeyAction::Toggle,
                    KeyAction::Save,
                    KeyAction::Advise,
                ],
            ),
            (
                "General",
                &[KeyAction::Back, KeyAction::Reset, KeyAction::Help, KeyAction::Quit],
            ),
        ];

        let bindings = self.get_bindings(step);
        groups
            .iter()
            .filter_map(|(title, actions)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| actions.contains(&b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}

//! Build advisor.
//!
//! Asks a chat-completion collaborator for a short prose review of the
//! current build. The reply is opaque text; nothing here parses it.

use crate::catalog::{self, COMPATIBILITY_NOTES};
use crate::classifier::{ClassifierFailure, Completer};
use crate::error::{BuildError, Result};
use crate::session::BuildSelection;
use tracing::{info, warn};

pub const SYSTEM_PROMPT: &str = "You are a friendly PC building expert. \
Review the build you are given, explain in plain language who it suits, \
point out one strength and one trade-off, and keep the answer under 150 words. \
Do not recommend parts outside the listed options.";

/// User prompt describing the selection, one fact per line
pub fn build_prompt(selection: &BuildSelection) -> Result<String> {
    let recommendation = selection.recommendation();
    let performance = catalog::summary(selection.use_case(), selection.tier())?;

    let mut lines = vec![
        format!("Build: {}", selection.bundle().title()),
        format!("Reference price: ${}", selection.price()),
    ];
    if let Some(budget) = recommendation.budget {
        lines.push(format!("Stated budget: ${:.0}", budget));
    }
    if let Some(requirement) = &recommendation.requirement {
        lines.push(format!("User requirement: {}", requirement));
    }
    if !recommendation.preferences.is_empty() {
        let tags: Vec<&str> = recommendation.preferences.iter().map(String::as_str).collect();
        lines.push(format!("Preferences: {}", tags.join(", ")));
    }

    lines.push("Components:".to_string());
    for (slot, part) in selection.chosen_parts() {
        let alternatives: Vec<&str> = selection
            .options(slot)
            .iter()
            .copied()
            .filter(|o| *o != part)
            .collect();
        lines.push(if alternatives.is_empty() {
            format!("- {}: {}", slot, part)
        } else {
            format!("- {}: {} (alternatives: {})", slot, part, alternatives.join(", "))
        });
    }

    let metrics: Vec<String> = performance
        .metrics()
        .iter()
        .map(|(label, value)| format!("{} {}", label, value))
        .collect();
    lines.push(format!("Expected performance: {}", metrics.join(", ")));
    lines.push(format!("Checks: {}", COMPATIBILITY_NOTES.join("; ")));

    let mut prompt = lines.join("\n");
    prompt.push('\n');
    Ok(prompt)
}

/// Ask the assistant about the selection
pub fn advise(completer: &dyn Completer, selection: &BuildSelection) -> Result<String> {
    info!("Requesting advice for {}", selection.bundle().title());
    let prompt = build_prompt(selection)?;

    let reply = completer.complete(SYSTEM_PROMPT, &prompt).map_err(|failure| {
        warn!("Assistant failed: {}", failure);
        BuildError::AssistantUnavailable(failure)
    })?;

    let reply = reply.trim();
    if reply.is_empty() {
        return Err(BuildError::AssistantUnavailable(ClassifierFailure::Malformed(
            "empty reply".to_string(),
        )));
    }
    Ok(reply.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::resolver::{resolve_structured, StructuredRequest, TierPolicy};
    use crate::types::{Slot, UseCase};
    use std::sync::Mutex;

    struct RecordingCompleter {
        reply: std::result::Result<String, ClassifierFailure>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl Completer for RecordingCompleter {
        fn complete(
            &self,
            system_prompt: &str,
            user_prompt: &str,
        ) -> std::result::Result<String, ClassifierFailure> {
            self.seen
                .lock()
                .unwrap()
                .push((system_prompt.to_string(), user_prompt.to_string()));
            self.reply.clone()
        }
    }

    fn selection() -> BuildSelection {
        let request = StructuredRequest::new(UseCase::Workstation, 2200.0).with_preference("Quiet");
        let rec = resolve_structured(&request, &TierPolicy::default()).unwrap();
        BuildSelection::new(rec)
    }

    #[test]
    fn test_prompt_lists_chosen_parts() {
        let mut sel = selection();
        sel.select(Slot::Gpu, 1).unwrap();
        let prompt = build_prompt(&sel).unwrap();
        assert!(prompt.contains("Build: High Workstation"));
        assert!(prompt.contains("- GPU: 2x RTX 4080 (alternatives: RTX 4090)"));
        assert!(prompt.contains("- RAM: 128GB DDR5 6400MHz\n"));
        assert!(prompt.contains("Preferences: Quiet"));
        assert!(prompt.contains("Stated budget: $2200"));
        assert!(prompt.contains("Expected performance: Render Score"));
        assert!(prompt.ends_with('\n'));
    }

    #[test]
    fn test_advise_trims_reply() {
        let completer = RecordingCompleter {
            reply: Ok("  A strong render box.\n".to_string()),
            seen: Mutex::new(Vec::new()),
        };
        let advice = advise(&completer, &selection()).unwrap();
        assert_eq!(advice, "A strong render box.");
        let seen = completer.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, SYSTEM_PROMPT);
    }

    #[test]
    fn test_advise_failures() {
        let completer = RecordingCompleter {
            reply: Err(ClassifierFailure::Authentication),
            seen: Mutex::new(Vec::new()),
        };
        assert!(matches!(
            advise(&completer, &selection()),
            Err(BuildError::AssistantUnavailable(ClassifierFailure::Authentication))
        ));

        let completer = RecordingCompleter {
            reply: Ok("   ".to_string()),
            seen: Mutex::new(Vec::new()),
        };
        assert!(matches!(
            advise(&completer, &selection()),
            Err(BuildError::AssistantUnavailable(ClassifierFailure::Malformed(_)))
        ));
    }
}

//! Application configuration.
//!
//! Configuration is a JSON file where every field is optional; missing
//! fields fall back to the defaults below. API credentials never live in the
//! file: the file only names the environment variable that holds them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::logic::resolver::TierPolicy;

/// Labels offered to the classifier when the config does not override them
pub const DEFAULT_CANDIDATE_LABELS: &[&str] = &[
    "gaming performance focused",
    "budget conscious",
    "high-end enthusiast",
    "professional workstation",
];

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tier_policy: TierPolicy,
    pub classifier: ClassifierSettings,
    pub assistant: AssistantSettings,
    /// Directory the wizard saves `pc_build.json` into
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tier_policy: TierPolicy::default(),
            classifier: ClassifierSettings::default(),
            assistant: AssistantSettings::default(),
            export_dir: PathBuf::from("."),
        }
    }
}

/// Zero-shot classifier settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    pub endpoint: String,
    /// Name of the environment variable holding the API token
    pub token_env: String,
    pub timeout_secs: u64,
    pub candidate_labels: Vec<String>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api-inference.huggingface.co/models/facebook/bart-large-mnli"
                .to_string(),
            token_env: "HF_API_TOKEN".to_string(),
            timeout_secs: 15,
            candidate_labels: DEFAULT_CANDIDATE_LABELS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ClassifierSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// API token from the configured environment variable, if set
    pub fn token(&self) -> Option<String> {
        read_token(&self.token_env)
    }
}

/// Chat-completion assistant settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    pub endpoint: String,
    pub model: String,
    pub token_env: String,
    pub timeout_secs: u64,
    pub temperature: f32,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            token_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 30,
            temperature: 0.7,
        }
    }
}

impl AssistantSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn token(&self) -> Option<String> {
        read_token(&self.token_env)
    }
}

fn read_token(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Load from `path` when given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.tier_policy
            .validate()
            .context("Invalid tier policy")?;

        if self.classifier.timeout_secs == 0 {
            anyhow::bail!("Classifier timeout must be at least 1 second");
        }
        if self.assistant.timeout_secs == 0 {
            anyhow::bail!("Assistant timeout must be at least 1 second");
        }

        if self.classifier.candidate_labels.is_empty() {
            anyhow::bail!("At least one candidate label is required");
        }
        if self
            .classifier
            .candidate_labels
            .iter()
            .any(|l| l.trim().is_empty())
        {
            anyhow::bail!("Candidate labels cannot be blank");
        }

        for (name, endpoint) in [
            ("Classifier", &self.classifier.endpoint),
            ("Assistant", &self.assistant.endpoint),
        ] {
            let endpoint = endpoint.trim();
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                anyhow::bail!("{} endpoint must start with http:// or https://", name);
            }
        }

        if !(0.0..=2.0).contains(&self.assistant.temperature) {
            anyhow::bail!("Assistant temperature must be between 0.0 and 2.0");
        }

        Ok(())
    }
}

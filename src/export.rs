//! Build export files.
//!
//! A build is saved as a pretty-printed UTF-8 JSON document:
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "timestamp": "2024-05-01 14:03:22",
//!   "type": "Mid Gaming",
//!   "category": "Gaming",
//!   "tier": "Mid",
//!   "components": { "CPU": "AMD Ryzen 7 5800X3D", ... },
//!   "options": { "CPU": ["AMD Ryzen 7 5800X3D", "Intel i7-13700K"], ... },
//!   "price": 1500,
//!   "budget": 1600.0,
//!   "preferences": ["Quiet"]
//! }
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use strum::IntoEnumIterator;

use crate::catalog;
use crate::error::Result;
use crate::session::BuildSelection;
use crate::types::{Slot, Tier, UseCase};

/// Current export schema version
pub const SCHEMA_VERSION: u32 = 1;

/// File name the wizard saves to
pub const DEFAULT_FILE_NAME: &str = "pc_build.json";

/// Timestamp format used in export files
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serialized snapshot of a build selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildExport {
    pub schema_version: u32,
    pub timestamp: String,
    /// "<Tier> <UseCase>", e.g. "High Workstation"
    #[serde(rename = "type")]
    pub build_type: String,
    pub category: UseCase,
    pub tier: Tier,
    /// Chosen part per slot
    pub components: BTreeMap<Slot, String>,
    /// Every acceptable part per slot, recommended first
    #[serde(default)]
    pub options: BTreeMap<Slot, Vec<String>>,
    pub price: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default)]
    pub preferences: Vec<String>,
}

impl BuildExport {
    /// Snapshot a selection
    pub fn from_selection(selection: &BuildSelection) -> Self {
        let recommendation = selection.recommendation();
        Self {
            schema_version: SCHEMA_VERSION,
            timestamp: selection.created_at().format(TIMESTAMP_FORMAT).to_string(),
            build_type: selection.bundle().title(),
            category: selection.use_case(),
            tier: selection.tier(),
            components: selection
                .chosen_parts()
                .map(|(slot, part)| (slot, part.to_string()))
                .collect(),
            options: selection
                .bundle()
                .slots()
                .map(|(slot, options)| (slot, options.iter().map(|o| o.to_string()).collect()))
                .collect(),
            price: selection.price(),
            budget: recommendation.budget,
            preferences: recommendation.preferences.iter().cloned().collect(),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save the export to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load an export from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read build from {:?}", path.as_ref()))?;

        let export: Self =
            serde_json::from_str(&content).context("Failed to parse build JSON")?;

        Ok(export)
    }

    /// Validate the export
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.schema_version == 0 || self.schema_version > SCHEMA_VERSION {
            anyhow::bail!(
                "Unsupported schema version {} (this build supports up to {})",
                self.schema_version,
                SCHEMA_VERSION
            );
        }

        if self.price == 0 {
            anyhow::bail!("Price must be positive");
        }

        let bundle = catalog::lookup(self.category, self.tier)?;
        if self.build_type != bundle.title() {
            anyhow::bail!(
                "Type '{}' does not match tier and category ('{}')",
                self.build_type,
                bundle.title()
            );
        }
        if self.price != bundle.price {
            anyhow::bail!(
                "Price {} does not match the {} reference price {}",
                self.price,
                bundle.title(),
                bundle.price
            );
        }

        if chrono::NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).is_err() {
            anyhow::bail!("Timestamp '{}' is not in YYYY-MM-DD HH:MM:SS format", self.timestamp);
        }

        for slot in Slot::iter() {
            let part = self
                .components
                .get(&slot)
                .ok_or_else(|| anyhow::anyhow!("Missing component for {}", slot))?;
            if part.trim().is_empty() {
                anyhow::bail!("Component for {} is blank", slot);
            }
            if !bundle.options(slot).iter().any(|o| *o == part.as_str()) {
                anyhow::bail!("{} '{}' is not offered in the {} build", slot, part, bundle.title());
            }

            // Older hand-written files may omit the option lists
            if let Some(options) = self.options.get(&slot) {
                if !options.iter().any(|o| o == part) {
                    anyhow::bail!("{} '{}' is not one of its listed options", slot, part);
                }
            }
        }

        if let Some(budget) = self.budget {
            if !budget.is_finite() || budget <= 0.0 {
                anyhow::bail!("Budget must be positive");
            }
        }

        Ok(())
    }
}

//! Type-safe build selection types
//!
//! Use-cases, tiers and component slots are closed enumerations so the
//! catalog can be matched exhaustively and user input is parsed in one place.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Top-level build intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[derive(Serialize, Deserialize, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum UseCase {
    /// Gaming and streaming rigs
    #[default]
    Gaming,
    /// Productivity, rendering and development machines
    Workstation,
}

impl UseCase {
    /// Label shown on the wizard's first step
    pub const fn menu_label(self) -> &'static str {
        match self {
            Self::Gaming => "Gaming & Streaming",
            Self::Workstation => "Professional Workstation",
        }
    }

    /// One-line hint shown under the menu entry
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Gaming => "Optimized for gaming, streaming, and content creation",
            Self::Workstation => "Optimized for productivity, rendering, and development",
        }
    }
}

/// Performance/price bracket within a use-case.
///
/// `Entry` doubles as the "Budget" tier and `High` as the "High-end" tier
/// used by classification mode, so both spellings parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[derive(Serialize, Deserialize, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Tier {
    #[default]
    #[strum(to_string = "Entry", serialize = "budget")]
    Entry,
    #[strum(to_string = "Mid", serialize = "mid-range")]
    Mid,
    #[strum(to_string = "High", serialize = "high-end")]
    High,
}

impl Tier {
    /// Label shown on the wizard's tier hints
    pub const fn menu_label(self) -> &'static str {
        match self {
            Self::Entry => "Entry Level",
            Self::Mid => "Mid Range",
            Self::High => "High End",
        }
    }
}

/// Component slot in a bundle, in display and export order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Slot {
    #[strum(serialize = "CPU")]
    #[serde(rename = "CPU")]
    Cpu,
    #[strum(serialize = "GPU")]
    #[serde(rename = "GPU")]
    Gpu,
    #[strum(serialize = "RAM")]
    #[serde(rename = "RAM")]
    Ram,
    Storage,
    Motherboard,
    #[strum(serialize = "PSU")]
    #[serde(rename = "PSU")]
    Psu,
    Case,
}

impl Slot {
    /// Number of slots every bundle carries
    pub const COUNT: usize = 7;

    /// All slots in display order
    pub fn all() -> impl Iterator<Item = Slot> {
        Slot::iter()
    }

    /// Position of this slot in display order
    pub const fn index(self) -> usize {
        self as usize
    }
}

//! Reusable UI components
//!
//! - `keybindings` - Per-step key registry feeding the nav bar and help
//! - `help_overlay` - Context-sensitive help popup

pub mod help_overlay;
pub mod keybindings;

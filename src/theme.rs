//! Centralized theme and styling for the wizard
//!
//! Single source of truth for colors and styles. The palette follows the
//! GJAM brand: a dark panel background with a violet accent.
//!
//! # Usage
//! ```rust
//! use designmypc::theme::{Colors, Styles};
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let title_style = Styles::title();
//! ```

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the application
pub struct Colors;

impl Colors {
    // -------------------------------------------------------------------------
    // Base Colors
    // -------------------------------------------------------------------------

    /// Panel background (#1e2329)
    pub const BG_PANEL: Color = Color::Rgb(30, 35, 41);

    /// Gauge/progress bar background
    pub const BG_GAUGE: Color = Color::Rgb(45, 49, 57);

    pub const FG_PRIMARY: Color = Color::White;

    pub const FG_SECONDARY: Color = Color::Gray;

    pub const FG_MUTED: Color = Color::DarkGray;

    // -------------------------------------------------------------------------
    // Accent Colors
    // -------------------------------------------------------------------------

    /// Brand violet (#7747FF) - borders, titles, highlights
    pub const PRIMARY: Color = Color::Rgb(119, 71, 255);

    /// Secondary accent - prices, emphasis
    pub const SECONDARY: Color = Color::LightCyan;

    // -------------------------------------------------------------------------
    // Semantic Colors
    // -------------------------------------------------------------------------

    pub const SUCCESS: Color = Color::Green;

    pub const WARNING: Color = Color::Yellow;

    pub const ERROR: Color = Color::Red;

    // -------------------------------------------------------------------------
    // UI Element Colors
    // -------------------------------------------------------------------------

    pub const BORDER_ACTIVE: Color = Color::Rgb(119, 71, 255);

    pub const BORDER_INACTIVE: Color = Color::DarkGray;

    pub const SELECTED_BG: Color = Color::Rgb(119, 71, 255);

    pub const SELECTED_FG: Color = Color::White;

    pub const UNSELECTED: Color = Color::Gray;

    pub const PROGRESS: Color = Color::Rgb(119, 71, 255);
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI elements
pub struct Styles;

impl Styles {
    /// Screen and panel titles
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    pub fn panel() -> Style {
        Style::default().bg(Colors::BG_PANEL).fg(Colors::FG_PRIMARY)
    }

    /// Highlighted list entry
    pub fn selected() -> Style {
        Style::default()
            .bg(Colors::SELECTED_BG)
            .fg(Colors::SELECTED_FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn unselected() -> Style {
        Style::default().fg(Colors::UNSELECTED)
    }

    /// Muted helper text under menu entries
    pub fn hint() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    /// Key label in the nav bar and help overlay
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn metric_label() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    pub fn metric_value() -> Style {
        Style::default()
            .fg(Colors::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Colors::WARNING)
    }

    pub fn error() -> Style {
        Style::default().fg(Colors::ERROR)
    }
}

// =============================================================================
// UI CONSTANTS
// =============================================================================

/// Layout constants
pub struct UiConstants;

impl UiConstants {
    /// Help overlay width as a percentage of the screen
    pub const OVERLAY_WIDTH_PCT: u16 = 60;

    /// Help overlay height as a percentage of the screen
    pub const OVERLAY_HEIGHT_PCT: u16 = 70;

    pub const OVERLAY_MIN_WIDTH: u16 = 44;

    pub const OVERLAY_MAX_WIDTH: u16 = 80;

    /// Longest budget the input box accepts, in characters
    pub const BUDGET_MAX_CHARS: usize = 9;

    /// Longest free-text requirement, in characters
    pub const REQUIREMENT_MAX_CHARS: usize = 280;
}

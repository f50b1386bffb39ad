//! Header and common widget rendering
//!
//! ASCII header, step progress gauge, status line, navigation bar and the
//! help overlay hook.

use super::WizardStep;
use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::theme::{Colors, Styles};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// Header renderer containing the ASCII art header
pub struct HeaderRenderer {
    header_lines: Vec<Line<'static>>,
}

impl Default for HeaderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderRenderer {
    /// Rows taken by the header (art plus tagline)
    pub const HEIGHT: u16 = 5;

    pub fn new() -> Self {
        Self {
            header_lines: Self::create_header(),
        }
    }

    /// Render the ASCII art header
    pub fn render_header(&self, f: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let header = Paragraph::new(self.header_lines.clone())
            .block(Block::default().borders(Borders::NONE))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn create_header() -> Vec<Line<'static>> {
        let art = [
            r" ___  ___ ___ ___ ___ _  _   __  ____   __  ___  ___ ",
            r"|   \| __/ __|_ _/ __| \| | |  \/  \ \ / / | _ \/ __|",
            r"| |) | _|\__ \| | (_ | .` | | |\/| |\ V /  |  _/ (__ ",
            r"|___/|___|___/___\___|_|\_| |_|  |_| |_|   |_|  \___|",
        ];

        let mut lines: Vec<Line<'static>> = art
            .iter()
            .map(|row| Line::from(Span::styled(*row, Style::default().fg(Colors::PRIMARY))))
            .collect();
        lines.push(Line::from(Span::styled(
            "Powered by GJAM Technologies AI",
            Style::default()
                .fg(Colors::SECONDARY)
                .add_modifier(Modifier::ITALIC),
        )));
        lines
    }
}

/// Render the wizard progress gauge
pub fn render_step_progress(f: &mut Frame, area: Rect, step: WizardStep) {
    let label = if step == WizardStep::Overview {
        "Build Complete!".to_string()
    } else {
        format!("Step {} of {}", step.step_number(), WizardStep::TOTAL_STEPS)
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(Colors::PROGRESS).bg(Colors::BG_GAUGE))
        .percent(step.progress_percent())
        .label(label);
    f.render_widget(gauge, area);
}

/// Render the status line: busy indicator, inline error, or last status
pub fn render_status(f: &mut Frame, area: Rect, state: &AppState) {
    let (text, style) = if let Some(busy) = state.busy() {
        (format!("⏳ {}", busy), Style::default().fg(Colors::WARNING))
    } else if let Some(error) = &state.error_message {
        (format!("✗ {}", error), Styles::error())
    } else {
        (state.status_message.clone(), Style::default().fg(Colors::FG_SECONDARY))
    };

    let status = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::TOP))
        .wrap(Wrap { trim: true });
    f.render_widget(status, area);
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    area: Rect,
    state: &AppState,
    keybinding_ctx: &KeybindingContext,
) {
    let mut spans: Vec<Span> = Vec::new();
    for item in keybinding_ctx.get_nav_items(state.step) {
        spans.push(Span::styled(format!(" {} ", item.key_display), Styles::key_hint()));
        spans.push(Span::styled(
            format!(" {}  ", item.action_label),
            Style::default().fg(Colors::FG_SECONDARY),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(state.step, keybinding_ctx);
    help_overlay.render(f, f.area());
}

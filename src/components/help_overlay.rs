//! Help overlay component
//!
//! Displays context-sensitive help in a centered popup.

use super::keybindings::{HelpSection, KeybindingContext};
use crate::theme::{Colors, Styles, UiConstants};
use crate::ui::WizardStep;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Help overlay component
pub struct HelpOverlay {
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    /// Create a new help overlay for the given step
    pub fn new(step: WizardStep, keybinding_ctx: &KeybindingContext) -> Self {
        let sections = keybinding_ctx.get_help_content(step);
        Self {
            content: Self::build_content(&sections, step),
        }
    }

    /// Build the help content from sections
    fn build_content(sections: &[HelpSection], step: WizardStep) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.push(Line::from(vec![Span::styled(
            "  Design My PC Help  ",
            Styles::title(),
        )]));
        lines.push(Line::from(""));

        lines.push(Line::from(vec![
            Span::styled("Current: ", Style::default().fg(Colors::FG_MUTED)),
            Span::styled(step.title(), Style::default().fg(Colors::SECONDARY)),
        ]));
        lines.push(Line::from(""));

        for section in sections {
            lines.push(Line::from(vec![Span::styled(
                format!("  {}  ", section.title),
                Style::default()
                    .fg(Colors::SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )]));

            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(
                        format!("{:<10}", key),
                        Style::default()
                            .fg(Colors::PRIMARY)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(description.clone(), Style::default().fg(Colors::FG_PRIMARY)),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![Span::styled(
            "Press ? or Esc to close",
            Style::default().fg(Colors::FG_MUTED),
        )]));

        lines
    }

    /// Number of content lines, used by tests and for sizing
    pub fn line_count(&self) -> usize {
        self.content.len()
    }

    /// Popup area centered in `parent`
    pub fn area(parent: Rect) -> Rect {
        let width = percent_of(parent.width, UiConstants::OVERLAY_WIDTH_PCT)
            .clamp(UiConstants::OVERLAY_MIN_WIDTH, UiConstants::OVERLAY_MAX_WIDTH)
            .min(parent.width);
        let height = percent_of(parent.height, UiConstants::OVERLAY_HEIGHT_PCT);
        Rect {
            x: parent.x.saturating_add((parent.width - width) / 2),
            y: parent.y.saturating_add((parent.height - height) / 2),
            width,
            height,
        }
    }

    /// Render the help overlay
    pub fn render(&self, f: &mut Frame, parent: Rect) {
        let area = Self::area(parent);
        if area.width == 0 || area.height == 0 {
            return;
        }

        f.render_widget(Clear, area);
        let popup = Paragraph::new(self.content.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Styles::border_active())
                    .title(" Help ")
                    .style(Styles::panel()),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(popup, area);
    }
}

/// `pct` percent of `len`, computed wide so large terminals cannot overflow
fn percent_of(len: u16, pct: u16) -> u16 {
    let scaled = u32::from(len) * u32::from(pct.min(100)) / 100;
    u16::try_from(scaled).unwrap_or(len)
}

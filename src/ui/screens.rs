//! Wizard screens.
//!
//! One render function per `WizardStep`:
//! - `UseCase` - Gaming, Workstation, or describe needs in words
//! - `Budget` - Budget entry and preference tags
//! - `Describe` - Free-text requirement for the classifier
//! - `Overview` - Chosen parts, alternatives, summary and advice
//!
//! Screens only read `AppState`; all mutation happens in `App`.

use crate::app::{AppState, DESCRIBE_ENTRY, PREFERENCE_TAGS};
use crate::catalog::{self, COMPATIBILITY_NOTES};
use crate::logic::resolver::ResolutionSource;
use crate::session::{BuildSelection, SessionStage};
use crate::theme::{Colors, Styles, UiConstants};
use crate::types::{Tier, UseCase};
use strum::IntoEnumIterator;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

fn render_title(f: &mut Frame, area: Rect, text: &str) {
    let title = Paragraph::new(text.to_string())
        .style(Styles::title())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, area);
}

fn title_and_body(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(4)])
        .split(area);
    (chunks[0], chunks[1])
}

// ============================================================================
// Step 1: Use-case
// ============================================================================

pub fn render_use_case_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let (title_area, body) = title_and_body(area);
    render_title(f, title_area, state.step.title());

    let entries: [(&str, &str); 3] = [
        (UseCase::Gaming.menu_label(), UseCase::Gaming.hint()),
        (UseCase::Workstation.menu_label(), UseCase::Workstation.hint()),
        (
            "Describe it in words",
            "Tell us what you need and we'll match a build",
        ),
    ];

    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(i, (label, hint))| {
            let selected = i == state.use_case_selection;
            let marker = if selected { "> " } else { "  " };
            let label_style = if selected {
                Styles::selected()
            } else {
                Styles::unselected()
            };
            ListItem::new(vec![
                Line::from(Span::styled(format!("{}{}", marker, label), label_style)),
                Line::from(Span::styled(format!("    {}", hint), Styles::hint())),
                Line::from(""),
            ])
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.use_case_selection.min(DESCRIBE_ENTRY)));

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active()),
    );
    f.render_stateful_widget(list, body, &mut list_state);
}

// ============================================================================
// Step 2a: Budget and preferences
// ============================================================================

pub fn render_budget_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let (title_area, body) = title_and_body(area);
    let use_case = state
        .use_case
        .map(|u| u.menu_label())
        .unwrap_or("your PC");
    render_title(f, title_area, &format!("{} ({})", state.step.title(), use_case));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Budget input
            Constraint::Length(3), // Tier guide
            Constraint::Min(4),    // Preferences
        ])
        .split(body);

    let input = Paragraph::new(Line::from(vec![
        Span::styled("$ ", Styles::metric_label()),
        Span::styled(state.budget_input.clone(), Style::default().fg(Colors::FG_PRIMARY)),
        Span::styled("_", Style::default().fg(Colors::PRIMARY).add_modifier(Modifier::SLOW_BLINK)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .title(" Budget (USD) "),
    );
    f.render_widget(input, chunks[0]);

    let typed_tier = state.typed_budget_tier();
    let guide: Vec<Line> = tier_guide(state)
        .into_iter()
        .map(|(tier, text)| {
            let style = if typed_tier == Some(tier) {
                Styles::success()
            } else {
                Styles::hint()
            };
            Line::from(Span::styled(text, style))
        })
        .collect();
    f.render_widget(Paragraph::new(guide), chunks[1]);

    let items: Vec<ListItem> = PREFERENCE_TAGS
        .iter()
        .enumerate()
        .map(|(i, tag)| {
            let checked = state.preferences.contains(*tag);
            let checkbox = if checked { "[x]" } else { "[ ]" };
            let style = if i == state.preference_selection {
                Styles::selected()
            } else if checked {
                Styles::success()
            } else {
                Styles::unselected()
            };
            ListItem::new(Line::from(Span::styled(format!(" {} {}", checkbox, tag), style)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_inactive())
            .title(" Preferences (optional) "),
    );
    f.render_widget(list, chunks[2]);
}

/// One line per tier: its budget band from the active policy and, once a
/// use-case is chosen, the reference price of that bundle.
pub fn tier_guide(state: &AppState) -> Vec<(Tier, String)> {
    let policy = &state.tier_policy;
    Tier::iter()
        .map(|tier| {
            let band = match tier {
                Tier::Entry => format!("up to {}", ceiling_usd(policy.entry_ceiling)),
                Tier::Mid => format!("up to {}", ceiling_usd(policy.mid_ceiling)),
                Tier::High => format!("above {}", ceiling_usd(policy.mid_ceiling)),
            };
            let price = state
                .use_case
                .and_then(|use_case| catalog::lookup(use_case, tier).ok())
                .map(|bundle| format!("{} build", catalog::format_usd(bundle.price)))
                .unwrap_or_default();
            (
                tier,
                format!("  {:<12} {:<16} {}", tier.menu_label(), band, price)
                    .trim_end()
                    .to_string(),
            )
        })
        .collect()
}

fn ceiling_usd(ceiling: f64) -> String {
    if ceiling.fract() == 0.0 && ceiling <= f64::from(u32::MAX) {
        catalog::format_usd(ceiling as u32)
    } else {
        format!("${:.2}", ceiling)
    }
}

// ============================================================================
// Step 2b: Free-text requirement
// ============================================================================

pub fn render_describe_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let (title_area, body) = title_and_body(area);
    render_title(f, title_area, state.step.title());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(2)])
        .split(body);

    let text = if state.requirement_input.is_empty() {
        Line::from(Span::styled(
            "e.g. a quiet machine for 4K video editing and some weekend gaming",
            Styles::hint(),
        ))
    } else {
        Line::from(vec![
            Span::styled(state.requirement_input.clone(), Style::default().fg(Colors::FG_PRIMARY)),
            Span::styled("_", Style::default().fg(Colors::PRIMARY)),
        ])
    };

    let input = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_active())
                .title(" What will you use it for? "),
        );
    f.render_widget(input, chunks[0]);

    let counter = Paragraph::new(Span::styled(
        format!(
            "{}/{} characters",
            state.requirement_input.chars().count(),
            UiConstants::REQUIREMENT_MAX_CHARS
        ),
        Styles::hint(),
    ))
    .alignment(Alignment::Right);
    f.render_widget(counter, chunks[1]);
}

// ============================================================================
// Step 3: Overview
// ============================================================================

pub fn render_overview_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let (title_area, body) = title_and_body(area);

    let Some(selection) = state.session.selection() else {
        render_title(f, title_area, state.step.title());
        let empty = Paragraph::new("  No build resolved yet. Press R to start over.")
            .style(Styles::warning());
        f.render_widget(empty, body);
        return;
    };

    render_title(
        f,
        title_area,
        &format!("{}: {} PC", state.step.title(), selection.bundle().title()),
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(body);

    render_components(f, columns[0], state, selection);
    render_summary(f, columns[1], state, selection);
}

fn render_components(f: &mut Frame, area: Rect, state: &AppState, selection: &BuildSelection) {
    let selected_slot = state.selected_slot();

    let items: Vec<ListItem> = selection
        .chosen_parts()
        .map(|(slot, part)| {
            let options = selection.options(slot);
            let is_current = slot == selected_slot;
            let marker = if is_current { "> " } else { "  " };
            let part_style = if is_current {
                Styles::selected()
            } else {
                Style::default().fg(Colors::FG_PRIMARY)
            };

            let mut spans = vec![
                Span::styled(format!("{}{:<12}", marker, slot.to_string()), Styles::metric_label()),
                Span::styled(part.to_string(), part_style),
            ];
            if options.len() > 1 {
                spans.push(Span::styled(
                    format!("  ({}/{})", selection.chosen_index(slot) + 1, options.len()),
                    Styles::hint(),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = if selection.is_customized() {
        " Components (customized) "
    } else {
        " Components "
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .title(title),
    );
    f.render_widget(list, area);
}

fn render_summary(f: &mut Frame, area: Rect, state: &AppState, selection: &BuildSelection) {
    let recommendation = selection.recommendation();
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Price   ", Styles::metric_label()),
        Span::styled(catalog::format_usd(selection.price()), Styles::metric_value()),
    ]));

    if let (Some(budget), Some(delta)) = (recommendation.budget, recommendation.price_delta) {
        let (label, style) = if delta >= 0.0 {
            (format!("${:.0} under budget", delta), Styles::success())
        } else {
            (format!("${:.0} over budget", -delta), Styles::warning())
        };
        lines.push(Line::from(vec![
            Span::styled("Budget  ", Styles::metric_label()),
            Span::styled(format!("${:.0}  ", budget), Style::default().fg(Colors::FG_PRIMARY)),
            Span::styled(label, style),
        ]));
    }

    if recommendation.source == ResolutionSource::Classified {
        if let Some(top) = recommendation.top_label() {
            lines.push(Line::from(vec![
                Span::styled("Matched ", Styles::metric_label()),
                Span::styled(
                    format!("{} ({:.0}%)", top.label, top.score * 100.0),
                    Style::default().fg(Colors::FG_PRIMARY),
                ),
            ]));
        }
    }

    if !recommendation.preferences.is_empty() {
        let tags: Vec<&str> = recommendation.preferences.iter().map(String::as_str).collect();
        lines.push(Line::from(vec![
            Span::styled("Prefs   ", Styles::metric_label()),
            Span::styled(tags.join(", "), Style::default().fg(Colors::FG_PRIMARY)),
        ]));
    }

    lines.push(Line::from(""));
    for (label, value) in selection.bundle().summary.metrics() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<13}", label), Styles::metric_label()),
            Span::styled(value, Styles::metric_value()),
        ]));
    }

    lines.push(Line::from(""));
    for note in COMPATIBILITY_NOTES {
        lines.push(Line::from(Span::styled(format!("✓ {}", note), Styles::success())));
    }

    if state.session.stage() == SessionStage::Exported {
        if let Some(path) = state.session.last_export() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Saved to {}", path.display()),
                Styles::success(),
            )));
        }
    }

    if let Some(advice) = &state.advice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Assistant", Styles::title())));
        lines.push(Line::from(Span::styled(
            advice.clone(),
            Style::default().fg(Colors::FG_PRIMARY),
        )));
    }

    let summary = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_inactive())
            .title(" Summary "),
    );
    f.render_widget(summary, area);
}

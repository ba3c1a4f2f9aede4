//! Building blocks for the calculator screen: text fields, step sliders and
//! result boxes, all styled from the active theme.

use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::config::SliderRange;
use crate::theme::Theme;

fn border(theme: &Theme, focused: bool) -> Style {
    if focused {
        Style::default().fg(theme.highlight)
    } else {
        Style::default().fg(theme.field)
    }
}

/// Single-line text entry with a label in the border
pub fn text_field<'a>(
    label: &'a str,
    value: &'a str,
    focused: bool,
    theme: &Theme,
) -> Paragraph<'a> {
    let cursor = if focused { "▏" } else { "" };
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", label),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(border(theme, focused))
        .style(Style::default().bg(theme.field));

    Paragraph::new(Line::from(vec![
        Span::styled(value, Style::default().fg(theme.text)),
        Span::styled(cursor, Style::default().fg(theme.highlight)),
    ]))
    .block(block)
}

/// Badge-style label above a slider, e.g. "Tip: 15%"
pub fn badge(text: String, theme: &Theme) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        format!(" {} ", text),
        Style::default()
            .fg(theme.text)
            .bg(theme.field)
            .add_modifier(Modifier::BOLD),
    )))
}

/// Position of `value` within `range`, as a 0..=1 ratio
pub fn slider_ratio(value: f64, range: &SliderRange) -> f64 {
    let span = range.max.saturating_sub(range.min) as f64;
    if span == 0.0 {
        return 1.0;
    }
    ((value - range.min as f64) / span).clamp(0.0, 1.0)
}

/// Horizontal step slider showing its bounds
pub fn slider(value: f64, range: &SliderRange, focused: bool, theme: &Theme) -> Gauge<'static> {
    let filled = if focused { theme.highlight } else { theme.glow };
    Gauge::default()
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT)
                .border_style(border(theme, focused)),
        )
        .gauge_style(Style::default().fg(filled).bg(theme.field))
        .ratio(slider_ratio(value, range))
        .label(Span::styled(
            format!("{} ─ {}", range.min, range.max),
            Style::default().fg(theme.text_dim),
        ))
}

/// Large result panel such as "Total: $123.00"
pub fn amount_box(text: String, theme: &Theme) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Left)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.panel))
            .style(Style::default().bg(theme.panel)),
    )
}

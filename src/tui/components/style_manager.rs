//! Style Manager - Centralized style definitions for TUI components

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::core::models::ImportanceTier;

/// Centralized style manager for consistent TUI styling
pub struct StyleManager;

impl StyleManager {
    /// Title style (cyan, bold)
    pub fn title() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted() -> Style {
        Style::default().fg(Color::Gray)
    }

    /// Selected line (reversed, bold)
    pub fn selected() -> Style {
        Style::default()
            .add_modifier(Modifier::REVERSED)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint bar (white on dark gray)
    pub fn hint_bar() -> Style {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }

    /// Colour of an importance tier: red, yellow, green.
    pub fn tier_color(tier: ImportanceTier) -> Color {
        match tier {
            ImportanceTier::High => Color::Red,
            ImportanceTier::Medium => Color::Yellow,
            ImportanceTier::Low => Color::Green,
        }
    }

    pub fn search_color() -> Color {
        Color::Blue
    }

    /// Section header: black text on the section colour
    pub fn section_header(color: Color) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD)
    }

    pub fn section_row(color: Color) -> Style {
        Style::default().fg(color)
    }

    pub fn span(text: impl Into<String>, style: Style) -> Span<'static> {
        Span::styled(text.into(), style)
    }

    /// Detail line (label: value)
    pub fn detail_line(label: &str, value: String) -> Line<'static> {
        Line::from(vec![
            Self::span(format!("{}: ", label), Self::title()),
            Span::raw(value),
        ])
    }
}

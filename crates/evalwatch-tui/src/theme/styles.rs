//! Semantic style builders for the dashboard.

use evalwatch_core::{ConnectionState, Severity};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Keybinding hint style ---
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// Rounded panel used by every card on screen
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

/// Glass block with a title in secondary text
pub fn titled_block(title: &str) -> Block<'static> {
    glass_block(false)
        .title(format!(" {} ", title))
        .title_style(text_secondary())
        .style(Style::default().bg(palette::CARD_BG))
}

/// Icon and style for the live connection indicator
pub fn connection_indicator(state: ConnectionState) -> (&'static str, Style) {
    match state {
        ConnectionState::Connecting => ("◐", Style::default().fg(palette::STATUS_YELLOW)),
        ConnectionState::Open => ("●", Style::default().fg(palette::STATUS_GREEN)),
        ConnectionState::Closed => ("○", Style::default().fg(palette::STATUS_RED)),
    }
}

/// Colors for one event log line: (prefix, message)
pub fn severity_styles(severity: Severity) -> (Style, Style) {
    match severity {
        Severity::Info => (
            Style::default().fg(palette::STATUS_BLUE),
            text_primary(),
        ),
        Severity::Success => (
            Style::default()
                .fg(palette::STATUS_GREEN)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(palette::STATUS_GREEN),
        ),
        Severity::Warning => (
            Style::default()
                .fg(palette::STATUS_YELLOW)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(palette::STATUS_YELLOW),
        ),
        Severity::Error => (
            Style::default()
                .fg(palette::STATUS_RED)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(palette::STATUS_RED),
        ),
    }
}

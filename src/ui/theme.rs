//! Waystep color theme

#![allow(dead_code)]

use ratatui::style::{Color, Modifier, Style};

// Magenta/cyan theme
pub const PRIMARY: Color = Color::Magenta;
pub const SECONDARY: Color = Color::Cyan;
pub const SUCCESS: Color = Color::Green;
pub const WARNING: Color = Color::Yellow;
pub const ERROR: Color = Color::Red;
pub const TEXT: Color = Color::White;
pub const DIM: Color = Color::DarkGray;

/// Title style (headers)
pub fn title() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

/// Normal text
pub fn text() -> Style {
    Style::default().fg(TEXT)
}

/// Dimmed/inactive text
pub fn dim() -> Style {
    Style::default().fg(DIM)
}

/// Selected/highlighted item
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}

/// Success message
pub fn success() -> Style {
    Style::default().fg(SUCCESS)
}

/// Error message
pub fn error() -> Style {
    Style::default().fg(ERROR)
}

/// Border style
pub fn border() -> Style {
    Style::default().fg(PRIMARY)
}

/// Active border (focused)
pub fn border_active() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

/// Key hint style
pub fn key_hint() -> Style {
    Style::default().fg(SECONDARY)
}

/// Spinner/info style
pub fn info() -> Style {
    Style::default().fg(SECONDARY)
}

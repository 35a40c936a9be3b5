//! UI theme and styling
//!
//! Defines colors, styles, and visual appearance for all screens.

use ratatui::style::{Color, Modifier, Style};

/// Application theme
#[derive(Debug, Clone)]
pub struct Theme {
    // Header block
    pub header_version: Style,
    pub header_connection: Style,

    // Menu
    pub menu_title: Style,
    pub menu_item: Style,
    pub menu_selected: Style,

    // Table
    pub table_header: Style,
    pub table_row_even: Style,
    pub table_row_odd: Style,
    pub table_selected: Style,
    pub table_empty: Style,

    // Info screen
    pub info_text: Style,

    // Footer
    pub hint: Style,
    pub confirm_prompt: Style,

    // Status messages
    pub status_success: Style,
    pub status_error: Style,
    pub status_info: Style,
    pub status_warning: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Header
            header_version: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_connection: Style::default().fg(Color::Gray),

            // Menu
            menu_title: Style::default().add_modifier(Modifier::BOLD),
            menu_item: Style::default().fg(Color::White),
            menu_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            // Table
            table_header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            table_row_even: Style::default().fg(Color::White),
            table_row_odd: Style::default().fg(Color::Gray),
            table_selected: Style::default().fg(Color::Black).bg(Color::Yellow),
            table_empty: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            // Info
            info_text: Style::default().fg(Color::White),

            // Footer
            hint: Style::default().fg(Color::DarkGray),
            confirm_prompt: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),

            // Status messages
            status_success: Style::default().fg(Color::Green),
            status_error: Style::default().fg(Color::Red),
            status_info: Style::default().fg(Color::Blue),
            status_warning: Style::default().fg(Color::Yellow),
        }
    }
}

impl Theme {
    /// Create a new theme with default colors
    pub fn new() -> Self {
        Self::default()
    }
}

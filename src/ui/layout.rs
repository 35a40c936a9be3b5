//! Screen layout management
//!
//! Every screen shares the same vertical arrangement: a two-line header, the
//! body, a footer for the hint or confirmation prompt, and a status line.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Header lines plus one blank separator
pub const HEADER_HEIGHT: u16 = 3;
/// Footer is allowed to wrap once
pub const FOOTER_HEIGHT: u16 = 2;

/// Areas for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
    pub status: Rect,
}

/// Calculate the layout for one frame
pub fn calculate_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(FOOTER_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);

    ScreenLayout {
        header: chunks[0],
        body: chunks[1],
        footer: chunks[2],
        status: chunks[3],
    }
}

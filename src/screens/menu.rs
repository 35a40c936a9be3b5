//! Main menu

use crate::diagnostics::Diagnostic;
use crate::keymap::KeyAction;
use crate::screens::{Footer, ScreenKind, Transition};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Entries in display order; `None` quits
pub const MENU_ITEMS: &[(&str, Option<ScreenKind>)] = &[
    ("Check Version", Some(ScreenKind::Version)),
    (
        "Slow Queries",
        Some(ScreenKind::Table(Diagnostic::SlowQueries)),
    ),
    (
        "Replication Slots",
        Some(ScreenKind::Table(Diagnostic::ReplicationSlots)),
    ),
    (
        "Blocked Queries",
        Some(ScreenKind::Table(Diagnostic::BlockedSessions)),
    ),
    ("Quit", None),
];

const MENU_TITLE: &str = "What do you want to do?";
const MENU_HINT: &str = "Press q to quit.";

#[derive(Debug, Default)]
pub struct MenuScreen {
    cursor: usize,
}

impl MenuScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected_label(&self) -> &'static str {
        MENU_ITEMS[self.cursor].0
    }

    pub fn handle_action(&mut self, action: KeyAction) -> Transition {
        match action {
            KeyAction::MoveUp => {
                self.cursor = self.cursor.saturating_sub(1);
                Transition::Stay
            }
            KeyAction::MoveDown => {
                if self.cursor + 1 < MENU_ITEMS.len() {
                    self.cursor += 1;
                }
                Transition::Stay
            }
            KeyAction::Select => match MENU_ITEMS[self.cursor].1 {
                Some(kind) => Transition::Replace(kind),
                None => Transition::Quit,
            },
            KeyAction::Quit => Transition::Quit,
            _ => Transition::Stay,
        }
    }

    pub fn footer(&self) -> Footer {
        Footer::Hint(MENU_HINT)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut lines = vec![
            Line::from(Span::styled(MENU_TITLE, theme.menu_title)),
            Line::from(""),
        ];
        for (idx, (label, _)) in MENU_ITEMS.iter().enumerate() {
            let line = if idx == self.cursor {
                Line::from(Span::styled(format!("> {}", label), theme.menu_selected))
            } else {
                Line::from(Span::styled(format!("  {}", label), theme.menu_item))
            };
            lines.push(line);
        }
        frame.render_widget(Paragraph::new(lines), area);
    }
}

//! Static text screen (server version)

use crate::keymap::KeyAction;
use crate::screens::{Footer, ScreenKind, Transition};
use crate::session::Session;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

const INFO_HINT: &str = "Press q to return to the menu.";

#[derive(Debug)]
pub struct InfoScreen {
    text: String,
}

impl InfoScreen {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The version captured at startup; no query
    pub fn version(session: &Session) -> Self {
        Self::new(session.version_line())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn handle_action(&mut self, action: KeyAction) -> Transition {
        match action {
            KeyAction::Back => Transition::Replace(ScreenKind::Menu),
            _ => Transition::Stay,
        }
    }

    pub fn footer(&self) -> Footer {
        Footer::Hint(INFO_HINT)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let paragraph = Paragraph::new(self.text.as_str())
            .style(theme.info_text)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

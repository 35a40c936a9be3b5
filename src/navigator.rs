//! Top-level driver: owns the live screen and applies transitions
//!
//! One key is handled to completion, including any query or action it
//! triggers, before the next one. A replacement screen is built inside
//! `dispatch`, so the next render already shows fresh data.

use crate::db::Database;
use crate::keymap::{KeyAction, KeyMap};
use crate::screens::{
    MenuScreen, Screen, ScreenContext, ScreenKind, StatusLevel, StatusMessage, Transition,
};
use crate::session::Session;
use crate::ui::theme::Theme;
use crossterm::event::KeyEvent;
use ratatui::Frame;

pub struct Navigator<D: Database> {
    db: D,
    session: Session,
    keymap: KeyMap,
    theme: Theme,
    screen: Screen,
    status: Option<StatusMessage>,
    page_size: usize,
    running: bool,
}

impl<D: Database> Navigator<D> {
    /// Start on the menu
    pub fn new(db: D, session: Session, page_size: usize) -> Self {
        Self {
            db,
            session,
            keymap: KeyMap::default(),
            theme: Theme::new(),
            screen: Screen::Menu(MenuScreen::new()),
            status: None,
            page_size: page_size.max(1),
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn db(&self) -> &D {
        &self.db
    }

    /// Route one key to the current screen and apply the result
    pub async fn dispatch(&mut self, key: KeyEvent) {
        if !self.running {
            return;
        }
        self.status = None;

        let Some(action) = self.keymap.resolve(self.screen.key_context(), key) else {
            return;
        };
        if action == KeyAction::Quit {
            self.quit();
            return;
        }

        let mut ctx =
            ScreenContext::new(&self.db, &self.session, self.page_size, &mut self.status);
        let transition = self.screen.handle_action(action, &mut ctx).await;
        match transition {
            Transition::Stay => {}
            Transition::Replace(kind) => {
                tracing::debug!(from = ?self.screen.kind(), to = ?kind, "screen transition");
                self.screen = Screen::build(kind, &mut ctx).await;
            }
            Transition::Quit => self.quit(),
        }
    }

    /// Make `kind` the current screen without a key
    pub async fn open(&mut self, kind: ScreenKind) {
        if !self.running {
            return;
        }
        let mut ctx =
            ScreenContext::new(&self.db, &self.session, self.page_size, &mut self.status);
        self.screen = Screen::build(kind, &mut ctx).await;
    }

    /// Background connection failure reported by the driver
    pub fn connection_lost(&mut self, message: &str) {
        tracing::error!(error = %message, "connection lost");
        self.status = Some(StatusMessage {
            message: message.to_string(),
            level: StatusLevel::Error,
        });
    }

    pub fn render(&self, frame: &mut Frame) {
        crate::ui::render(
            frame,
            &self.screen,
            &self.session,
            self.status.as_ref(),
            &self.theme,
        );
    }

    fn quit(&mut self) {
        tracing::info!("quit requested");
        self.running = false;
    }
}

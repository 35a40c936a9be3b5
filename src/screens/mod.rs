//! Screens and the transitions between them
//!
//! Exactly one screen is live at a time. A screen handles a resolved
//! [`KeyAction`] and answers with a [`Transition`]; the navigator applies it.
//! Screens that show data query it once, when they are built.

pub mod confirm;
pub mod info;
pub mod menu;
pub mod table;

use crate::db::Database;
use crate::diagnostics::Diagnostic;
use crate::keymap::{KeyAction, KeyContext};
use crate::session::Session;
use crate::ui::theme::Theme;
use ratatui::{Frame, layout::Rect};

pub use confirm::{ActionTarget, Confirmation};
pub use info::InfoScreen;
pub use menu::MenuScreen;
pub use table::TableScreen;

/// Status message with severity level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub message: String,
    pub level: StatusLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Which screen to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Menu,
    Version,
    Table(Diagnostic),
}

/// Outcome of handling one key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    /// Build this screen and make it current
    Replace(ScreenKind),
    Quit,
}

/// Text under the body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Footer {
    Hint(&'static str),
    Prompt(String),
}

/// What a screen may touch while building or handling a key
pub struct ScreenContext<'a, D> {
    pub db: &'a D,
    pub session: &'a Session,
    pub page_size: usize,
    status: &'a mut Option<StatusMessage>,
}

impl<'a, D: Database> ScreenContext<'a, D> {
    pub fn new(
        db: &'a D,
        session: &'a Session,
        page_size: usize,
        status: &'a mut Option<StatusMessage>,
    ) -> Self {
        Self {
            db,
            session,
            page_size,
            status,
        }
    }

    /// Show a one-line status and record it in the log
    pub fn report(&mut self, level: StatusLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            StatusLevel::Error => tracing::error!("{}", message),
            StatusLevel::Warning => tracing::warn!("{}", message),
            StatusLevel::Info | StatusLevel::Success => tracing::info!("{}", message),
        }
        *self.status = Some(StatusMessage { message, level });
    }
}

/// The live screen
#[derive(Debug)]
pub enum Screen {
    Menu(MenuScreen),
    Info(InfoScreen),
    Table(TableScreen),
}

impl Screen {
    /// Construct a screen, running its query if it has one
    pub async fn build<D: Database>(kind: ScreenKind, ctx: &mut ScreenContext<'_, D>) -> Self {
        match kind {
            ScreenKind::Menu => Screen::Menu(MenuScreen::new()),
            ScreenKind::Version => Screen::Info(InfoScreen::version(ctx.session)),
            ScreenKind::Table(diagnostic) => Screen::Table(TableScreen::load(diagnostic, ctx).await),
        }
    }

    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Menu(_) => ScreenKind::Menu,
            Screen::Info(_) => ScreenKind::Version,
            Screen::Table(t) => ScreenKind::Table(t.diagnostic()),
        }
    }

    /// Binding table for the next key
    pub fn key_context(&self) -> KeyContext {
        match self {
            Screen::Menu(_) => KeyContext::Menu,
            Screen::Info(_) => KeyContext::Info,
            Screen::Table(t) => t.key_context(),
        }
    }

    pub async fn handle_action<D: Database>(
        &mut self,
        action: KeyAction,
        ctx: &mut ScreenContext<'_, D>,
    ) -> Transition {
        match self {
            Screen::Menu(m) => m.handle_action(action),
            Screen::Info(i) => i.handle_action(action),
            Screen::Table(t) => t.handle_action(action, ctx).await,
        }
    }

    pub fn footer(&self) -> Footer {
        match self {
            Screen::Menu(m) => m.footer(),
            Screen::Info(i) => i.footer(),
            Screen::Table(t) => t.footer(),
        }
    }

    pub fn render_body(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        match self {
            Screen::Menu(m) => m.render(frame, area, theme),
            Screen::Info(i) => i.render(frame, area, theme),
            Screen::Table(t) => t.render(frame, area, theme),
        }
    }
}

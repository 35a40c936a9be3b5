//! Table screen shared by every diagnostic
//!
//! Key precedence: while a confirmation is pending only accept and reject do
//! anything. Otherwise back, the diagnostic's actions, then navigation.

use crate::db::Database;
use crate::diagnostics::Diagnostic;
use crate::error::DbError;
use crate::keymap::{KeyAction, KeyContext};
use crate::screens::confirm::{ActionTarget, Confirmation};
use crate::screens::{Footer, ScreenContext, ScreenKind, StatusLevel, Transition};
use crate::ui::table_view::TableView;
use crate::ui::theme::Theme;
use ratatui::{Frame, layout::Rect};
use std::collections::HashSet;

#[derive(Debug)]
pub struct TableScreen {
    diagnostic: Diagnostic,
    view: TableView,
    confirmation: Confirmation,
}

impl TableScreen {
    pub fn new(diagnostic: Diagnostic, view: TableView) -> Self {
        Self {
            diagnostic,
            view,
            confirmation: Confirmation::Idle,
        }
    }

    /// Run the diagnostic's query and format the result.
    ///
    /// A failed query still yields a screen: an empty table plus a status line.
    pub async fn load<D: Database>(diagnostic: Diagnostic, ctx: &mut ScreenContext<'_, D>) -> Self {
        let view = match ctx.db.execute_query(diagnostic.sql()).await {
            Ok(results) => {
                let rows = diagnostic.build_rows(&results);
                tracing::info!(
                    screen = diagnostic.title(),
                    rows = rows.len(),
                    elapsed_ms = results.execution_time.as_millis() as u64,
                    "screen built"
                );
                TableView::new(diagnostic.columns(), rows)
            }
            Err(e) => {
                ctx.report(
                    StatusLevel::Error,
                    format!("{} query failed: {}", diagnostic.title(), e),
                );
                TableView::empty()
            }
        };
        Self::new(diagnostic, view.with_page_size(ctx.page_size))
    }

    pub fn diagnostic(&self) -> Diagnostic {
        self.diagnostic
    }

    pub fn view(&self) -> &TableView {
        &self.view
    }

    pub fn confirmation(&self) -> &Confirmation {
        &self.confirmation
    }

    pub fn key_context(&self) -> KeyContext {
        if self.confirmation.is_active() {
            KeyContext::Confirm
        } else {
            KeyContext::Table
        }
    }

    pub async fn handle_action<D: Database>(
        &mut self,
        action: KeyAction,
        ctx: &mut ScreenContext<'_, D>,
    ) -> Transition {
        if self.confirmation.is_active() {
            return match action {
                KeyAction::Accept => self.accept(ctx).await,
                KeyAction::Reject => {
                    self.confirmation.clear();
                    Transition::Stay
                }
                _ => Transition::Stay,
            };
        }

        match action {
            KeyAction::Back => Transition::Replace(ScreenKind::Menu),
            KeyAction::Terminate | KeyAction::DropSlot if self.diagnostic.supports(action) => {
                self.request_single(ctx);
                Transition::Stay
            }
            KeyAction::TerminateAll if self.diagnostic.supports(action) => {
                self.confirmation.request_all();
                Transition::Stay
            }
            KeyAction::MoveUp => {
                self.view.move_up();
                Transition::Stay
            }
            KeyAction::MoveDown => {
                self.view.move_down();
                Transition::Stay
            }
            KeyAction::PageUp => {
                self.view.page_up();
                Transition::Stay
            }
            KeyAction::PageDown => {
                self.view.page_down();
                Transition::Stay
            }
            KeyAction::GoToTop => {
                self.view.go_to_top();
                Transition::Stay
            }
            KeyAction::GoToBottom => {
                self.view.go_to_bottom();
                Transition::Stay
            }
            _ => Transition::Stay,
        }
    }

    fn request_single<D: Database>(&mut self, ctx: &mut ScreenContext<'_, D>) {
        let Some(row) = self.view.selected_row() else {
            ctx.report(StatusLevel::Warning, "No row selected");
            return;
        };
        match self.diagnostic.target_of(row) {
            Some(target) => self.confirmation.request_single(target),
            None => ctx.report(StatusLevel::Warning, "Selected row has no usable target"),
        }
    }

    async fn accept<D: Database>(&mut self, ctx: &mut ScreenContext<'_, D>) -> Transition {
        match self.confirmation.take() {
            Confirmation::Idle => Transition::Stay,
            Confirmation::Single(target) => {
                tracing::info!(action_target = %target, "executing action");
                match target.execute(ctx.db).await {
                    Ok(()) => {
                        ctx.report(StatusLevel::Success, target.done_message());
                        self.rebuild()
                    }
                    Err(e) => {
                        let level = match e {
                            DbError::SessionNotFound(_) => StatusLevel::Warning,
                            _ => StatusLevel::Error,
                        };
                        ctx.report(level, e.to_string());
                        Transition::Stay
                    }
                }
            }
            Confirmation::All => {
                self.sweep(ctx).await;
                self.rebuild()
            }
        }
    }

    /// Best-effort pass over every row in display order. A failed target is
    /// logged and the sweep moves on. Rows sharing a blocker count as one
    /// session, which is terminated once.
    async fn sweep<D: Database>(&self, ctx: &mut ScreenContext<'_, D>) {
        let mut seen = HashSet::new();
        let mut succeeded = 0usize;
        for (idx, row) in self.view.rows().iter().enumerate() {
            let Some(target) = self.diagnostic.target_of(row) else {
                tracing::warn!(row = idx, "skipping row without a usable target");
                continue;
            };
            if !seen.insert(target.clone()) {
                tracing::debug!(action_target = %target, "already handled in this sweep");
                continue;
            }
            match target.execute(ctx.db).await {
                Ok(()) => {
                    tracing::info!(action_target = %target, "action succeeded");
                    succeeded += 1;
                }
                Err(e) => tracing::warn!(action_target = %target, error = %e, "action failed"),
            }
        }

        let total = seen.len();
        let level = if succeeded == total {
            StatusLevel::Success
        } else {
            StatusLevel::Warning
        };
        ctx.report(
            level,
            format!("Terminated {} of {} sessions", succeeded, total),
        );
    }

    fn rebuild(&self) -> Transition {
        Transition::Replace(ScreenKind::Table(self.diagnostic))
    }

    pub fn footer(&self) -> Footer {
        match self.confirmation.prompt() {
            Some(prompt) => Footer::Prompt(prompt),
            None => Footer::Hint(self.diagnostic.hint()),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.view.render(frame, area, theme);
    }

    /// Currently confirmed target, if a single one is pending
    pub fn pending_target(&self) -> Option<&ActionTarget> {
        match &self.confirmation {
            Confirmation::Single(target) => Some(target),
            _ => None,
        }
    }
}

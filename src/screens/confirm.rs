//! Confirmation sub-state shared by screens with destructive actions
//!
//! A single target and "every row" are distinct variants, so a PID of zero
//! can never be mistaken for the bulk case.

use crate::db::Database;
use crate::error::DbResult;
use std::fmt;

/// What a destructive action applies to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionTarget {
    /// A backend, by PID
    Session(i32),
    /// A replication slot, by name
    Slot(String),
}

impl ActionTarget {
    /// Run the action against the server
    pub async fn execute<D: Database>(&self, db: &D) -> DbResult<()> {
        match self {
            ActionTarget::Session(pid) => db.terminate_session(*pid).await,
            ActionTarget::Slot(name) => db.drop_replication_slot(name).await,
        }
    }

    /// Past-tense summary used after success
    pub fn done_message(&self) -> String {
        match self {
            ActionTarget::Session(pid) => format!("Terminated session with PID {}", pid),
            ActionTarget::Slot(name) => format!("Dropped replication slot '{}'", name),
        }
    }
}

impl fmt::Display for ActionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionTarget::Session(pid) => write!(f, "session {}", pid),
            ActionTarget::Slot(name) => write!(f, "slot {}", name),
        }
    }
}

/// Whether a destructive action is waiting for y/n
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Confirmation {
    #[default]
    Idle,
    /// Confirming one target
    Single(ActionTarget),
    /// Confirming the action on every row
    All,
}

impl Confirmation {
    pub fn is_active(&self) -> bool {
        !matches!(self, Confirmation::Idle)
    }

    pub fn request_single(&mut self, target: ActionTarget) {
        *self = Confirmation::Single(target);
    }

    pub fn request_all(&mut self) {
        *self = Confirmation::All;
    }

    pub fn clear(&mut self) {
        *self = Confirmation::Idle;
    }

    /// Hand over the pending confirmation and go back to idle
    pub fn take(&mut self) -> Confirmation {
        std::mem::take(self)
    }

    /// Footer question while active
    pub fn prompt(&self) -> Option<String> {
        match self {
            Confirmation::Idle => None,
            Confirmation::Single(ActionTarget::Session(pid)) => Some(format!(
                "Are you sure you want to terminate the session with PID '{}'? (y/n)",
                pid
            )),
            Confirmation::Single(ActionTarget::Slot(name)) => Some(format!(
                "Are you sure you want to drop the replication slot '{}'? (y/n)",
                name
            )),
            Confirmation::All => {
                Some("Are you sure you want to terminate all blocking sessions? (y/n)".to_string())
            }
        }
    }
}

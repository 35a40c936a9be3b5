//! Common test utilities and helpers
//!
//! Shared test infrastructure for the navigation and confirmation tests: an
//! in-memory server that answers the diagnostic queries and records actions.

#![allow(dead_code)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pgdba::db::queries;
use pgdba::db::{CellValue, ColumnDef, DataType, Database, QueryResults, Row};
use pgdba::diagnostics::Diagnostic;
use pgdba::error::{DbError, DbResult};
use pgdba::navigator::Navigator;
use pgdba::screens::{Screen, TableScreen};
use pgdba::session::Session;
use std::cell::RefCell;
use std::collections::HashSet;
use std::time::Duration;

/// A blocked/blocking pair as the lock query returns it
#[derive(Debug, Clone)]
pub struct BlockedPair {
    pub blocked_pid: i32,
    pub blocking_pid: i32,
    pub blocked_statement: String,
}

impl BlockedPair {
    pub fn new(blocked_pid: i32, blocking_pid: i32) -> Self {
        Self {
            blocked_pid,
            blocking_pid,
            blocked_statement: format!("UPDATE accounts SET balance = 0 WHERE id = {}", blocked_pid),
        }
    }

    fn to_row(&self) -> Row {
        Row::new(vec![
            CellValue::Integer(self.blocked_pid as i64),
            CellValue::Text("app".into()),
            CellValue::Integer(self.blocking_pid as i64),
            CellValue::Text("admin".into()),
            CellValue::Text(self.blocked_statement.clone()),
            CellValue::Text("LOCK TABLE accounts".into()),
            CellValue::Text("psql".into()),
            CellValue::Null,
        ])
    }
}

/// A replication slot as the slot query returns it
#[derive(Debug, Clone)]
pub struct Slot {
    pub name: String,
    pub size: String,
    pub active: bool,
}

impl Slot {
    pub fn new(name: &str, active: bool) -> Self {
        Self {
            name: name.to_string(),
            size: "16 MB".to_string(),
            active,
        }
    }
}

#[derive(Debug, Default)]
pub struct MockState {
    /// (query id, query text, mean exec time)
    pub statements: Vec<(i64, String, f64)>,
    pub slots: Vec<Slot>,
    pub blocked: Vec<BlockedPair>,
    /// PIDs whose termination is reported as "already gone"
    pub vanished_pids: HashSet<i32>,
    /// Every diagnostic query fails when set
    pub fail_queries: bool,

    /// Recorded calls, in order
    pub queries_run: Vec<String>,
    pub terminate_calls: Vec<i32>,
    pub drop_calls: Vec<String>,
}

/// In-memory server
#[derive(Debug, Default)]
pub struct MockDatabase {
    pub state: RefCell<MockState>,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statements(self, count: usize) -> Self {
        {
            let mut state = self.state.borrow_mut();
            // Ascending means so the client-side ranking has work to do
            state.statements = (1..=count as i64)
                .map(|i| (i, format!("SELECT * FROM t{}", i), i as f64 * 1.5))
                .collect();
        }
        self
    }

    pub fn with_slots(self, slots: Vec<Slot>) -> Self {
        self.state.borrow_mut().slots = slots;
        self
    }

    pub fn with_blocked(self, blocked: Vec<BlockedPair>) -> Self {
        self.state.borrow_mut().blocked = blocked;
        self
    }

    pub fn with_vanished(self, pid: i32) -> Self {
        self.state.borrow_mut().vanished_pids.insert(pid);
        self
    }

    pub fn failing_queries(self) -> Self {
        self.state.borrow_mut().fail_queries = true;
        self
    }

    pub fn terminate_calls(&self) -> Vec<i32> {
        self.state.borrow().terminate_calls.clone()
    }

    pub fn drop_calls(&self) -> Vec<String> {
        self.state.borrow().drop_calls.clone()
    }

    pub fn query_count(&self) -> usize {
        self.state.borrow().queries_run.len()
    }
}

fn columns(names: &[&str]) -> Vec<ColumnDef> {
    names
        .iter()
        .map(|n| ColumnDef {
            name: n.to_string(),
            data_type: DataType::Text,
        })
        .collect()
}

fn results(names: &[&str], rows: Vec<Row>) -> QueryResults {
    let count = rows.len();
    QueryResults::new(columns(names), rows, Duration::from_millis(1), count)
}

impl Database for MockDatabase {
    async fn execute_query(&self, sql: &str) -> DbResult<QueryResults> {
        let mut state = self.state.borrow_mut();
        state.queries_run.push(sql.to_string());
        if state.fail_queries {
            return Err(DbError::QueryFailed(
                "relation \"pg_stat_statements\" does not exist".into(),
            ));
        }

        if sql == queries::SERVER_VERSION {
            Ok(results(
                &["server_version"],
                vec![Row::new(vec![CellValue::Text("16.2".into())])],
            ))
        } else if sql == queries::SLOW_QUERIES {
            let rows = state
                .statements
                .iter()
                .map(|(id, text, mean)| {
                    Row::new(vec![
                        CellValue::Integer(*id),
                        CellValue::Text(text.clone()),
                        CellValue::Integer(3),
                        CellValue::Float(mean * 3.0),
                        CellValue::Float(*mean),
                        CellValue::Float(0.25),
                        CellValue::Integer(42),
                    ])
                })
                .collect();
            Ok(results(
                &["queryid", "query", "calls", "total", "mean", "stddev", "rows"],
                rows,
            ))
        } else if sql == queries::REPLICATION_SLOTS {
            let rows = state
                .slots
                .iter()
                .map(|s| {
                    Row::new(vec![
                        CellValue::Text(s.name.clone()),
                        CellValue::Text(s.size.clone()),
                        CellValue::Boolean(s.active),
                    ])
                })
                .collect();
            Ok(results(&["slot_name", "size", "active"], rows))
        } else if sql == queries::BLOCKED_SESSIONS {
            let rows = state.blocked.iter().map(BlockedPair::to_row).collect();
            Ok(results(
                &[
                    "blocked_pid",
                    "blocked_user",
                    "blocking_pid",
                    "blocking_user",
                    "blocked_statement",
                    "current_statement_in_blocking_process",
                    "blocked_application",
                    "blocking_application",
                ],
                rows,
            ))
        } else {
            Err(DbError::QueryFailed(format!("unexpected query: {}", sql)))
        }
    }

    async fn terminate_session(&self, pid: i32) -> DbResult<()> {
        let mut state = self.state.borrow_mut();
        state.terminate_calls.push(pid);
        if state.vanished_pids.contains(&pid) {
            return Err(DbError::SessionNotFound(pid));
        }
        let before = state.blocked.len();
        state.blocked.retain(|b| b.blocking_pid != pid);
        if state.blocked.len() == before {
            return Err(DbError::SessionNotFound(pid));
        }
        Ok(())
    }

    async fn drop_replication_slot(&self, name: &str) -> DbResult<()> {
        let mut state = self.state.borrow_mut();
        state.drop_calls.push(name.to_string());
        match state.slots.iter().position(|s| s.name == name) {
            Some(idx) if state.slots[idx].active => Err(DbError::ActionFailed {
                action: "drop replication slot",
                target: name.to_string(),
                reason: format!("replication slot \"{}\" is active", name),
            }),
            Some(idx) => {
                state.slots.remove(idx);
                Ok(())
            }
            None => Err(DbError::ActionFailed {
                action: "drop replication slot",
                target: name.to_string(),
                reason: format!("replication slot \"{}\" does not exist", name),
            }),
        }
    }
}

pub fn test_session() -> Session {
    Session::new("16.2", "postgres@localhost:5432/mydb")
}

pub fn navigator(db: MockDatabase) -> Navigator<MockDatabase> {
    Navigator::new(db, test_session(), 10)
}

pub fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

pub fn code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl_c() -> KeyEvent {
    KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
}

/// Press each character in turn
pub async fn type_keys(nav: &mut Navigator<MockDatabase>, keys: &str) {
    for c in keys.chars() {
        nav.dispatch(key(c)).await;
    }
}

/// Menu position of a diagnostic
pub fn menu_index(diagnostic: Diagnostic) -> usize {
    match diagnostic {
        Diagnostic::SlowQueries => 1,
        Diagnostic::ReplicationSlots => 2,
        Diagnostic::BlockedSessions => 3,
    }
}

/// Walk the menu to a diagnostic and open it
pub async fn open(nav: &mut Navigator<MockDatabase>, diagnostic: Diagnostic) {
    for _ in 0..menu_index(diagnostic) {
        nav.dispatch(key('j')).await;
    }
    nav.dispatch(code(KeyCode::Enter)).await;
}

pub fn table(nav: &Navigator<MockDatabase>) -> &TableScreen {
    match nav.screen() {
        Screen::Table(t) => t,
        other => panic!("expected a table screen, got {:?}", other.kind()),
    }
}

/// First column of every displayed row
pub fn first_column(nav: &Navigator<MockDatabase>) -> Vec<String> {
    table(nav)
        .view()
        .rows()
        .iter()
        .map(|r| r[0].clone())
        .collect()
}

//! The tabular diagnostics and how their result sets become tables
//!
//! Each diagnostic owns its SQL, its column layout, the column an action reads
//! its target from, and the hint shown under the table. Rows are positional:
//! column index is field identity.

use crate::db::{QueryResults, Row, queries};
use crate::format::{CellFormat, format_cell};
use crate::keymap::KeyAction;
use crate::screens::confirm::ActionTarget;
use crate::ui::table_view::ColumnSpec;

/// Most statements the slow-query ranking ever shows
pub const SLOW_QUERY_LIMIT: usize = 10;

/// Column carrying the mean execution time in the slow-query result
const MEAN_EXEC_TIME_COL: usize = 4;
/// Column carrying the slot name in the replication-slot result
const SLOT_NAME_COL: usize = 0;
/// Column carrying the blocking PID in the blocked-session result
const BLOCKING_PID_COL: usize = 2;

/// One column: header, advisory width, and formatting rule
struct Field {
    title: &'static str,
    width: u16,
    format: CellFormat,
}

const fn field(title: &'static str, width: u16, format: CellFormat) -> Field {
    Field {
        title,
        width,
        format,
    }
}

const SLOW_QUERY_FIELDS: &[Field] = &[
    field("Query ID", 10, CellFormat::Plain),
    field("Query", 50, CellFormat::FreeText),
    field("Calls", 10, CellFormat::Plain),
    field("Total Exec Time (ms)", 20, CellFormat::Stat),
    field("Mean Exec Time (ms)", 20, CellFormat::Stat),
    field("Stddev Exec Time (ms)", 20, CellFormat::Stat),
    field("Rows", 10, CellFormat::Plain),
];

const REPLICATION_SLOT_FIELDS: &[Field] = &[
    field("Slot Name", 20, CellFormat::Plain),
    field("Size", 10, CellFormat::Plain),
    field("Active", 10, CellFormat::Plain),
];

const BLOCKED_SESSION_FIELDS: &[Field] = &[
    field("Blocked PID", 15, CellFormat::Plain),
    field("Blocked User", 15, CellFormat::Plain),
    field("Blocking PID", 15, CellFormat::Plain),
    field("Blocking User", 15, CellFormat::Plain),
    field("Blocked Statement", 50, CellFormat::FreeText),
    field("Blocking Statement", 50, CellFormat::FreeText),
    field("Blocked Application", 20, CellFormat::Plain),
    field("Blocking Application", 20, CellFormat::Plain),
];

/// A diagnostic rendered as a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    SlowQueries,
    ReplicationSlots,
    BlockedSessions,
}

impl Diagnostic {
    pub fn title(self) -> &'static str {
        match self {
            Diagnostic::SlowQueries => "Slow Queries",
            Diagnostic::ReplicationSlots => "Replication Slots",
            Diagnostic::BlockedSessions => "Blocked Queries",
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            Diagnostic::SlowQueries => queries::SLOW_QUERIES,
            Diagnostic::ReplicationSlots => queries::REPLICATION_SLOTS,
            Diagnostic::BlockedSessions => queries::BLOCKED_SESSIONS,
        }
    }

    fn fields(self) -> &'static [Field] {
        match self {
            Diagnostic::SlowQueries => SLOW_QUERY_FIELDS,
            Diagnostic::ReplicationSlots => REPLICATION_SLOT_FIELDS,
            Diagnostic::BlockedSessions => BLOCKED_SESSION_FIELDS,
        }
    }

    pub fn columns(self) -> Vec<ColumnSpec> {
        self.fields()
            .iter()
            .map(|f| ColumnSpec::new(f.title, f.width))
            .collect()
    }

    /// Turn a result set into display rows, one string per column.
    ///
    /// Slow queries are re-ranked by mean execution time and capped at
    /// [`SLOW_QUERY_LIMIT`] whatever the server returned.
    pub fn build_rows(self, results: &QueryResults) -> Vec<Vec<String>> {
        let mut rows: Vec<&Row> = results.rows.iter().collect();
        if self == Diagnostic::SlowQueries {
            rows.sort_by(|a, b| mean_exec_time(b).total_cmp(&mean_exec_time(a)));
            rows.truncate(SLOW_QUERY_LIMIT);
        }

        let fields = self.fields();
        rows.into_iter()
            .map(|row| {
                fields
                    .iter()
                    .enumerate()
                    .map(|(idx, f)| format_cell(row.get(idx), f.format))
                    .collect()
            })
            .collect()
    }

    /// Whether `action` means anything on this diagnostic's table
    pub fn supports(self, action: KeyAction) -> bool {
        matches!(
            (self, action),
            (Diagnostic::BlockedSessions, KeyAction::Terminate)
                | (Diagnostic::BlockedSessions, KeyAction::TerminateAll)
                | (Diagnostic::ReplicationSlots, KeyAction::DropSlot)
        )
    }

    /// Action target read from a display row, if this diagnostic has one
    pub fn target_of(self, row: &[String]) -> Option<ActionTarget> {
        match self {
            Diagnostic::SlowQueries => None,
            Diagnostic::ReplicationSlots => row
                .get(SLOT_NAME_COL)
                .filter(|name| !name.is_empty())
                .map(|name| ActionTarget::Slot(name.clone())),
            Diagnostic::BlockedSessions => row
                .get(BLOCKING_PID_COL)
                .and_then(|pid| pid.trim().parse().ok())
                .map(ActionTarget::Session),
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Diagnostic::SlowQueries => "Press 'q' to return to the menu.",
            Diagnostic::ReplicationSlots => {
                "Press 'd' to drop the selected replication slot. Press 'q' to return to the menu."
            }
            Diagnostic::BlockedSessions => {
                "Press 't' to terminate the selected session. Press 'a' to terminate all sessions. Press 'q' to return to the menu."
            }
        }
    }
}

/// Ranking key; rows without a usable mean sink to the bottom
fn mean_exec_time(row: &Row) -> f64 {
    row.get(MEAN_EXEC_TIME_COL)
        .as_f64()
        .filter(|v| !v.is_nan())
        .unwrap_or(f64::NEG_INFINITY)
}

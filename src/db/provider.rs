//! Database provider trait
//!
//! Defines the interface the screens talk to. This abstraction allows for:
//! - Testing screens and navigation against an in-memory implementation
//! - Keeping every SQL round trip behind one seam
//!
//! Methods take `&self`: a single connection is shared by every screen and
//! the event loop never issues two calls at once.

use crate::db::queries;
use crate::db::types::QueryResults;
use crate::error::{DbError, DbResult};

/// Query and action collaborator used by every screen
#[allow(async_fn_in_trait)]
pub trait Database {
    /// Execute a SQL query and return results
    ///
    /// # Errors
    /// Returns `DbError::QueryFailed` if query execution fails
    async fn execute_query(&self, sql: &str) -> DbResult<QueryResults>;

    /// Terminate exactly one backend
    ///
    /// # Errors
    /// Returns `DbError::SessionNotFound` when the server reports no such PID,
    /// `DbError::ActionFailed` when the statement itself fails
    async fn terminate_session(&self, pid: i32) -> DbResult<()>;

    /// Drop exactly one replication slot
    ///
    /// # Errors
    /// Returns `DbError::ActionFailed` when the slot is active or missing
    async fn drop_replication_slot(&self, name: &str) -> DbResult<()>;

    /// Look up the server version string
    async fn server_version(&self) -> DbResult<String> {
        let results = self.execute_query(queries::SERVER_VERSION).await?;
        results
            .first_text()
            .ok_or_else(|| DbError::QueryFailed("SHOW server_version returned no rows".into()))
    }
}

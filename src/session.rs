//! Immutable connection facts shown on every screen

use crate::config::ConnectionConfig;
use crate::db::Database;
use crate::error::DbResult;

/// Server version and connection summary, fetched once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    server_version: String,
    summary: String,
}

impl Session {
    pub fn new(server_version: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            server_version: server_version.into(),
            summary: summary.into(),
        }
    }

    /// Ask the server for its version and pair it with the connection summary
    pub async fn establish<D: Database>(db: &D, config: &ConnectionConfig) -> DbResult<Self> {
        let version = db.server_version().await?;
        tracing::info!(version = %version, "server version");
        Ok(Self::new(version, config.summary()))
    }

    pub fn server_version(&self) -> &str {
        &self.server_version
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn version_line(&self) -> String {
        format!("PostgreSQL Version: {}", self.server_version)
    }

    pub fn connection_line(&self) -> String {
        format!("Connected to: {}", self.summary)
    }
}

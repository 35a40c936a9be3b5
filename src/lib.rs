//! pgdba - an interactive PostgreSQL administration dashboard for the terminal
//!
//! pgdba runs a fixed menu of diagnostics against one server and shows the
//! results as navigable tables. Two destructive actions, terminating a backend
//! and dropping a replication slot, only run after an explicit y/n.
//!
//! # Features
//!
//! - **Version**: the server version captured at startup
//! - **Slow Queries**: top 10 statements by mean execution time (pg_stat_statements)
//! - **Replication Slots**: slots with retained WAL size; drop the selected one
//! - **Blocked Queries**: sessions waiting on locks; terminate one blocker or all
//!
//! # Architecture
//!
//! - [`navigator`]: owns the live screen, routes keys, applies transitions
//! - [`screens`]: menu, info and table screens plus the shared confirmation state
//! - [`diagnostics`]: SQL, columns, and row formatting per diagnostic
//! - [`format`]: pure display formatting for cell values
//! - [`keymap`]: data-driven key bindings
//! - [`db`]: the `Database` trait and its PostgreSQL implementation
//! - [`config`], [`cli`]: connection parameters and user settings
//! - [`logging`]: tracing output to a log file
//! - [`ui`], [`terminal`]: ratatui rendering and the crossterm event loop
//!
//! # Example
//!
//! ```no_run
//! use pgdba::config::ConnectionConfig;
//! use pgdba::db::postgres::PostgresProvider;
//! use pgdba::navigator::Navigator;
//! use pgdba::session::Session;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConnectionConfig::from_url("postgres://postgres@localhost/mydb")?;
//! let (db, _conn_err_rx) = PostgresProvider::connect(&config).await?;
//! let session = Session::establish(&db, &config).await?;
//!
//! let navigator = Navigator::new(db, session, 10);
//! assert!(navigator.is_running());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod db;
pub mod diagnostics;
pub mod error;
pub mod format;
pub mod keymap;
pub mod logging;
pub mod navigator;
pub mod screens;
pub mod session;
pub mod terminal;
pub mod ui;

pub use error::{ConfigError, DbError, PgdbaError, Result};

//! Integration tests for PostgresProvider and the dashboard on a live server
//!
//! Each test skips itself when the database is not reachable.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pgdba::config::{ConnectionConfig, SslMode};
use pgdba::db::postgres::PostgresProvider;
use pgdba::db::{Database, queries};
use pgdba::diagnostics::Diagnostic;
use pgdba::error::DbError;
use pgdba::navigator::Navigator;
use pgdba::screens::{Screen, ScreenKind};
use pgdba::session::Session;

const TEST_SLOT: &str = "pgdba_integration_slot";

/// Get test database connection config
fn test_config() -> ConnectionConfig {
    ConnectionConfig {
        host: std::env::var("TEST_DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
        port: std::env::var("TEST_DB_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5432),
        database: std::env::var("TEST_DB_NAME").unwrap_or_else(|_| "postgres".to_string()),
        username: std::env::var("TEST_DB_USER").unwrap_or_else(|_| "postgres".to_string()),
        password: Some(
            std::env::var("TEST_DB_PASSWORD").unwrap_or_else(|_| "postgres".to_string()),
        ),
        ssl_mode: SslMode::Disable,
    }
}

async fn connect() -> Option<PostgresProvider> {
    let config = test_config();
    match PostgresProvider::connect(&config).await {
        Ok((provider, _)) => Some(provider),
        Err(e) => {
            eprintln!(
                "Skipping test: Database not available at {}:{} - {}",
                config.host, config.port, e
            );
            None
        }
    }
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

#[tokio::test]
async fn test_server_version() {
    let Some(provider) = connect().await else {
        return;
    };

    let session = Session::establish(&provider, &test_config()).await;
    assert!(session.is_ok(), "version lookup failed: {:?}", session.err());
    let session = session.unwrap();
    assert!(!session.server_version().is_empty());
    assert!(session.version_line().starts_with("PostgreSQL Version: "));
}

#[tokio::test]
async fn test_diagnostic_queries_shape() {
    let Some(provider) = connect().await else {
        return;
    };

    for diagnostic in [Diagnostic::ReplicationSlots, Diagnostic::BlockedSessions] {
        let results = provider.execute_query(diagnostic.sql()).await;
        assert!(results.is_ok(), "{:?} failed: {:?}", diagnostic, results.err());
        let results = results.unwrap();
        assert_eq!(results.columns.len(), diagnostic.columns().len());
        let rows = diagnostic.build_rows(&results);
        assert!(rows.iter().all(|r| r.len() == diagnostic.columns().len()));
    }
}

#[tokio::test]
async fn test_slow_queries_table_or_reported_failure() {
    let Some(provider) = connect().await else {
        return;
    };

    // pg_stat_statements may not be installed; either outcome keeps the screen usable
    let mut nav = Navigator::new(provider, Session::new("?", "test"), 10);
    nav.open(ScreenKind::Table(Diagnostic::SlowQueries)).await;
    let Screen::Table(table) = nav.screen() else {
        panic!("expected table screen");
    };
    if table.view().columns().is_empty() {
        assert!(nav.status().is_some());
    } else {
        assert!(table.view().rows().len() <= 10);
    }
    nav.dispatch(key('q')).await;
    assert_eq!(nav.screen().kind(), ScreenKind::Menu);
}

#[tokio::test]
async fn test_terminate_missing_backend() {
    let Some(provider) = connect().await else {
        return;
    };

    match provider.terminate_session(i32::MAX).await {
        Err(DbError::SessionNotFound(pid)) => assert_eq!(pid, i32::MAX),
        other => panic!("Expected SessionNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_drop_missing_slot_fails() {
    let Some(provider) = connect().await else {
        return;
    };

    let result = provider
        .drop_replication_slot("pgdba_slot_that_does_not_exist")
        .await;
    assert!(matches!(result, Err(DbError::ActionFailed { .. })));
}

#[tokio::test]
async fn test_drop_slot_through_dashboard() {
    let Some(provider) = connect().await else {
        return;
    };

    let created = provider
        .execute_query(&format!(
            "SELECT pg_create_physical_replication_slot('{}')",
            TEST_SLOT
        ))
        .await;
    if let Err(e) = created {
        eprintln!("Skipping test: cannot create replication slot - {}", e);
        return;
    }

    let mut nav = Navigator::new(provider, Session::new("?", "test"), 10);
    nav.open(ScreenKind::Table(Diagnostic::ReplicationSlots)).await;
    let Screen::Table(table) = nav.screen() else {
        panic!("expected table screen");
    };
    let position = table
        .view()
        .rows()
        .iter()
        .position(|r| r[0] == TEST_SLOT)
        .expect("created slot is listed");

    for _ in 0..position {
        nav.dispatch(key('j')).await;
    }
    nav.dispatch(key('d')).await;
    nav.dispatch(key('y')).await;

    let Screen::Table(table) = nav.screen() else {
        panic!("expected table screen");
    };
    assert!(table.view().rows().iter().all(|r| r[0] != TEST_SLOT));

    let check = nav
        .db()
        .execute_query(queries::REPLICATION_SLOTS)
        .await
        .unwrap();
    assert!(check.rows.iter().all(|r| r.get(0).as_text() != TEST_SLOT));
}

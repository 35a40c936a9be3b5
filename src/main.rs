//! pgdba - an interactive PostgreSQL administration dashboard for the terminal
//!
//! The actual logic is in the library modules for better testability.

use anyhow::{Context, Result};
use clap::Parser;
use pgdba::cli::Cli;
use pgdba::config::settings::{load_settings, load_settings_from};
use pgdba::db::postgres::PostgresProvider;
use pgdba::navigator::Navigator;
use pgdba::session::Session;
use pgdba::{logging, terminal};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => load_settings_from(path),
        None => load_settings(),
    }
    .context("failed to load settings")?;

    match cli.log_file.clone().or_else(|| settings.log_path()) {
        Some(log_path) => logging::init(&log_path, &settings.log_level),
        None => eprintln!("Logging disabled: no home directory for the default log file"),
    }

    let config = cli
        .connection_config()
        .context("invalid connection parameters")?;

    let (db, connection_errors) = match PostgresProvider::connect(&config).await {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, "connection failed");
            eprintln!("Error connecting to database: {}", e);
            std::process::exit(1);
        }
    };
    let session = match Session::establish(&db, &config).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "server version lookup failed");
            eprintln!("Error fetching PostgreSQL version: {}", e);
            std::process::exit(1);
        }
    };

    let mut navigator = Navigator::new(db, session, settings.page_size);

    let mut tui =
        terminal::init_terminal().context("failed to initialize terminal; is this a real TTY?")?;
    let outcome = terminal::run(&mut tui, &mut navigator, connection_errors).await;
    terminal::restore_terminal(&mut tui).context("failed to restore terminal")?;

    outcome.context("event loop failed")
}

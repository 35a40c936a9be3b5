//! Error types for pgdba
//!
//! This module defines the error hierarchy used throughout the application.
//! We use `thiserror` for library-style errors with clear error chains.

use std::io;

/// Main error type for the pgdba application
#[derive(Debug, thiserror::Error)]
pub enum PgdbaError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Terminal setup, drawing or input errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Database operation errors
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Failed to establish connection
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    /// A terminate/drop statement failed on the server
    #[error("{action} '{target}' failed: {reason}")]
    ActionFailed {
        action: &'static str,
        target: String,
        reason: String,
    },

    /// pg_terminate_backend reported no such backend
    #[error("No backend with PID {0} (already gone?)")]
    SessionNotFound(i32),

    /// Type conversion error
    #[error("Type conversion error: {0}")]
    TypeConversion(String),
}

/// Configuration loading/parsing errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Home directory not found
    #[error("Could not determine home directory")]
    NoHomeDir,

    /// Config file not found or unreadable
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    /// Failed to parse TOML
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Specialized Result type for pgdba operations
pub type Result<T> = std::result::Result<T, PgdbaError>;

/// Specialized Result type for database operations
pub type DbResult<T> = std::result::Result<T, DbError>;

/// Specialized Result type for config operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

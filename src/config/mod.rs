//! Configuration management
//!
//! Handles startup connection parameters and user settings.

pub mod connections;
pub mod settings;

pub use connections::{ConnectionConfig, SslMode};
pub use settings::Settings;

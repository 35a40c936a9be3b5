//! Database abstraction layer
//!
//! A trait-based seam over the single PostgreSQL connection, so screens can be
//! exercised against in-memory implementations.

pub mod postgres;
pub mod provider;
pub mod queries;
pub mod types;

// Re-export main types
pub use provider::Database;
pub use types::{CellValue, ColumnDef, DataType, QueryResults, Row};

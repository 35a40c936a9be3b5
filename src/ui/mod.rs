//! Terminal UI
//!
//! All rendering logic using ratatui. Screens own their state; this module
//! only draws it.

pub mod layout;
pub mod render;
pub mod table_view;
pub mod theme;

pub use render::render;
pub use theme::Theme;

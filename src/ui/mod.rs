//! UI rendering module for the neowatch dashboard
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod help_overlay;
pub mod neo_table;

pub use help_overlay::render as render_help_overlay;
pub use neo_table::render as render_neo_table;

//! Rendering of analysis reports.
//!
//! - [`json`]: machine-readable output via `serde_json`
//! - [`terminal`]: human-readable tables with ANSI colors

pub mod json;
pub mod terminal;

//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a clinical-themed interface for:
//! - Symptom intake with categorical and numeric fields
//! - Screening result display

mod app;
mod styles;
mod ui;

pub use app::{App, Screen};
pub use styles::ScreenerTheme;

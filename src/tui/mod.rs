//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides the dashboard pages:
//! - Home with dataset headline metrics
//! - Data overview and descriptive statistics
//! - BMI calculator and profile range check
//! - Range compliance insights

mod app;
mod styles;
mod ui;

pub use app::{App, Page};
pub use styles::Theme;

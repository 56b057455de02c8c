//! TUI module: Terminal User Interface using Ratatui.
//!
//! A single screen that is either the clinical form or the result panel,
//! with a modal popup for errors and export confirmations.

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::MedicalTheme;
pub use worker::{PredictionProgress, PredictionWorker, PredictionWorkerHandle};

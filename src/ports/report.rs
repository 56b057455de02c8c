//! Report port: Trait for exporting an assessment document.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::RiskTier;

/// Error type for report export.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Report I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("Report is only available once a result is shown")]
    NotReady,
}

/// Vitals printed in the report header section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportVitals {
    pub age: String,
    pub sex: String,
    pub resting_bp: String,
    pub cholesterol: String,
    pub max_hr: String,
}

/// Everything an exporter needs. Presentational only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub generated_at: chrono::DateTime<chrono::Local>,
    pub vitals: ReportVitals,
    /// Drives the status colour
    pub tier: RiskTier,
    /// Badge text, e.g. "HIGH RISK"
    pub risk_label: String,
    /// Displayed percentage, e.g. "72%"
    pub probability: String,
    pub factors: Vec<String>,
}

/// Trait for report exporters.
pub trait ReportExporter: Send + Sync {
    /// Write the report and return where it landed.
    ///
    /// # Errors
    /// Returns error if the document cannot be written.
    fn export(&self, report: &Report) -> Result<PathBuf, ReportError>;
}

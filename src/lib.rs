//! # CardioPulse
//!
//! Heart disease risk assessment front end for a remote prediction service.
//!
//! This crate provides:
//! - Encoding of a 12-field clinical form into the model's feature vector
//! - A blocking HTTP client for the prediction endpoint
//! - A terminal UI with an animated result panel and exportable report
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Clinical input, encoding, risk tiers and explanation rules
//! - `ports`: Trait definitions for prediction and report export
//! - `adapters`: Concrete implementations (ureq, printpdf, log sanitizer)
//! - `application`: Form, assessment service and presenter view-model
//! - `config`: Environment-driven settings
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{ClinicalInput, FeatureVector, PredictionResult, RiskTier};

/// Result type for CardioPulse operations
pub type Result<T> = std::result::Result<T, CardioPulseError>;

/// Main error type for CardioPulse
#[derive(Debug, thiserror::Error)]
pub enum CardioPulseError {
    #[error("Prediction failed: {0}")]
    Prediction(#[from] ports::PredictorError),

    #[error("Report export failed: {0}")]
    Report(#[from] ports::ReportError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversions() {
        let err: CardioPulseError = ports::PredictorError::Status(503).into();
        assert!(matches!(err, CardioPulseError::Prediction(_)));
        assert!(err.to_string().starts_with("Prediction failed:"));

        let err: CardioPulseError = ports::ReportError::NotReady.into();
        assert_eq!(
            err.to_string(),
            "Report export failed: Report is only available once a result is shown"
        );

        let err: CardioPulseError = serde_json::from_str::<ClinicalInput>("{")
            .expect_err("Should reject truncated JSON")
            .into();
        assert!(matches!(err, CardioPulseError::Serialization(_)));
    }
}

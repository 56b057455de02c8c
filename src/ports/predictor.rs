//! Predictor port: Trait for the remote risk model.
//!
//! This trait abstracts the HTTP transport from the application logic.

use crate::domain::{FeatureVector, PredictionResult};

/// Errors returned by a predictor.
///
/// All variants are recoverable: the caller may submit again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictorError {
    #[error("Server unreachable: {0}")]
    Transport(String),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Invalid prediction response: {0}")]
    InvalidResponse(String),
}

/// Trait for heart disease prediction.
///
/// Implementations block the calling thread until the model answers.
pub trait Predictor: Send + Sync {
    /// Predict the probability of heart disease for an encoded input.
    ///
    /// # Errors
    /// Returns `PredictorError` on transport failure, a non-success status,
    /// or a body without a numeric `probability`. No retry is attempted.
    fn predict(&self, vector: &FeatureVector) -> Result<PredictionResult, PredictorError>;

    /// Where predictions come from, for logs and the status line.
    fn endpoint(&self) -> &str;
}

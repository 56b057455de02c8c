//! Assessment service: Orchestrates one prediction round-trip.
//!
//! This service coordinates:
//! - Encoding the form snapshot
//! - Calling the predictor
//! - Logging the outcome

use std::sync::Arc;

use crate::domain::{encode, ClinicalInput, PredictionResult};
use crate::ports::{Predictor, PredictorError};

/// Input together with the prediction it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub input: ClinicalInput,
    pub result: PredictionResult,
}

/// Service for running the Encoder → Predictor pipeline.
pub struct AssessmentService<P>
where
    P: Predictor,
{
    predictor: Arc<P>,
}

impl<P> Clone for AssessmentService<P>
where
    P: Predictor,
{
    fn clone(&self) -> Self {
        Self {
            predictor: Arc::clone(&self.predictor),
        }
    }
}

impl<P> AssessmentService<P>
where
    P: Predictor,
{
    /// Create a new assessment service.
    pub fn new(predictor: Arc<P>) -> Self {
        Self { predictor }
    }

    /// Endpoint of the underlying predictor.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.predictor.endpoint()
    }

    /// Encode `input` and ask the predictor for a probability.
    ///
    /// # Errors
    /// Returns the predictor's error unchanged; nothing is retried.
    pub fn assess(&self, input: ClinicalInput) -> Result<Assessment, PredictorError> {
        let vector = encode(&input);

        tracing::info!(
            endpoint = self.predictor.endpoint(),
            missing = vector.missing_count(),
            "Submitting assessment"
        );

        match self.predictor.predict(&vector) {
            Ok(result) => {
                tracing::info!("Assessment complete: {}%", result.percent());
                Ok(Assessment { input, result })
            }
            Err(e) => {
                tracing::error!("Assessment failed: {}", e);
                Err(e)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::FakePredictor;
    use super::*;
    use crate::application::ClinicalForm;

    fn sample_input() -> ClinicalInput {
        let mut form = ClinicalForm::default();
        form.load_sample_data();
        form.snapshot()
    }

    #[test]
    fn test_assess_sends_encoded_vector() {
        let predictor = Arc::new(FakePredictor::ok(0.72));
        let service = AssessmentService::new(predictor.clone());

        let assessment = service.assess(sample_input()).expect("Should assess");
        assert_eq!(assessment.result.percent(), 72);
        assert_eq!(assessment.input, sample_input());

        let seen = predictor.seen.lock().expect("Fake lock");
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].as_slice(),
            &[63.0, 1.0, 1.0, 145.0, 233.0, 1.0, 0.0, 150.0, 0.0, 2.3, 0.0, 0.0]
        );
    }

    #[test]
    fn test_assess_propagates_failure_without_retry() {
        let predictor = Arc::new(FakePredictor::failing(PredictorError::Status(503)));
        let service = AssessmentService::new(predictor.clone());

        let err = service.assess(sample_input()).expect_err("Should fail");
        assert_eq!(err, PredictorError::Status(503));
        assert_eq!(predictor.seen.lock().expect("Fake lock").len(), 1);
    }
}

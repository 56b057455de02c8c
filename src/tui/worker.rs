//! Background prediction worker.
//!
//! The HTTP round-trip blocks, so it runs on its own thread and reports
//! back over a channel the TUI main loop polls between frames.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use crate::application::{Assessment, AssessmentService};
use crate::domain::ClinicalInput;
use crate::ports::{Predictor, PredictorError};

/// Messages from the prediction worker.
#[derive(Debug, Clone)]
pub enum PredictionProgress {
    /// Request handed to the predictor
    Submitted,
    /// Prediction arrived
    Complete(Assessment),
    /// The request failed
    Failed(PredictorError),
}

/// Handle to a running prediction worker.
pub struct PredictionWorkerHandle {
    progress_rx: Receiver<PredictionProgress>,
    _handle: JoinHandle<()>,
}

impl PredictionWorkerHandle {
    /// Try to receive the next progress update (non-blocking).
    ///
    /// # Errors
    /// `Empty` while the request is in flight, `Disconnected` once the
    /// worker has exited and every message was read.
    pub fn try_recv(&self) -> Result<PredictionProgress, TryRecvError> {
        self.progress_rx.try_recv()
    }
}

/// Runs one assessment off the UI thread.
pub struct PredictionWorker;

impl PredictionWorker {
    /// Spawn a background prediction.
    pub fn spawn<P>(service: AssessmentService<P>, input: ClinicalInput) -> PredictionWorkerHandle
    where
        P: Predictor + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::run(&service, input, &tx);
        });

        PredictionWorkerHandle {
            progress_rx: rx,
            _handle: handle,
        }
    }

    fn run<P: Predictor>(
        service: &AssessmentService<P>,
        input: ClinicalInput,
        tx: &Sender<PredictionProgress>,
    ) {
        // The receiver may be gone if the user quit mid-request
        let _ = tx.send(PredictionProgress::Submitted);

        let message = match service.assess(input) {
            Ok(assessment) => PredictionProgress::Complete(assessment),
            Err(e) => PredictionProgress::Failed(e),
        };
        let _ = tx.send(message);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::application::fakes::FakePredictor;
    use crate::application::ClinicalForm;

    fn drain(handle: &PredictionWorkerHandle) -> Vec<PredictionProgress> {
        let mut out = Vec::new();
        while let Ok(msg) = handle.progress_rx.recv_timeout(Duration::from_secs(5)) {
            out.push(msg);
        }
        out
    }

    fn sample() -> ClinicalInput {
        let mut form = ClinicalForm::default();
        form.load_sample_data();
        form.snapshot()
    }

    #[test]
    fn test_worker_reports_completion() {
        let service = AssessmentService::new(Arc::new(FakePredictor::ok(0.72)));
        let handle = PredictionWorker::spawn(service, sample());

        let messages = drain(&handle);
        assert_eq!(messages.len(), 2);
        assert!(matches!(messages[0], PredictionProgress::Submitted));
        match &messages[1] {
            PredictionProgress::Complete(a) => assert_eq!(a.result.percent(), 72),
            other => panic!("Unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_worker_reports_failure() {
        let service = AssessmentService::new(Arc::new(FakePredictor::failing(
            PredictorError::Transport("connection refused".to_string()),
        )));
        let handle = PredictionWorker::spawn(service, sample());

        let messages = drain(&handle);
        assert!(matches!(
            messages.last(),
            Some(PredictionProgress::Failed(PredictorError::Transport(_)))
        ));
    }

    #[test]
    fn test_try_recv_ends_disconnected() {
        let service = AssessmentService::new(Arc::new(FakePredictor::ok(0.3)));
        let handle = PredictionWorker::spawn(service, sample());

        let mut received = Vec::new();
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        loop {
            match handle.try_recv() {
                Ok(msg) => received.push(msg),
                Err(TryRecvError::Empty) if std::time::Instant::now() < deadline => {
                    std::thread::sleep(Duration::from_millis(5));
                }
                Err(e) => {
                    assert_eq!(e, TryRecvError::Disconnected);
                    break;
                }
            }
        }

        assert_eq!(received.len(), 2);
        assert!(matches!(received[1], PredictionProgress::Complete(_)));
    }
}

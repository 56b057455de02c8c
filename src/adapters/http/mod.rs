//! HTTP adapter: Implementation of Predictor.
//!
//! Talks to the prediction service with a single JSON POST:
//!
//! ```text
//! POST /predict   {"input": [age, sex, cp, bp, chol, fbs, ecg, hr, angina, oldpeak, slope, hd]}
//! 200 OK          {"probability": 0.72, "result": 1}
//! ```
//!
//! Any non-2xx status is a failure and its body is ignored.

use std::time::Duration;

use serde::Serialize;

use crate::domain::{FeatureVector, PredictionResult};
use crate::ports::{Predictor, PredictorError};

/// Endpoint used when nothing is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    input: &'a FeatureVector,
}

/// Blocking HTTP predictor.
pub struct HttpPredictor {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpPredictor {
    /// Create a predictor for `endpoint` with an overall request timeout.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            endpoint: endpoint.into(),
            agent,
        }
    }
}

impl Predictor for HttpPredictor {
    fn predict(&self, vector: &FeatureVector) -> Result<PredictionResult, PredictorError> {
        if vector.missing_count() > 0 {
            tracing::warn!(
                missing = vector.missing_count(),
                "Submitting feature vector with blank numeric fields"
            );
        }

        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_json(PredictRequest { input: vector });

        match response {
            Ok(resp) => {
                let result: PredictionResult = resp
                    .into_json()
                    .map_err(|e| PredictorError::InvalidResponse(e.to_string()))?;
                tracing::debug!(probability = result.probability, "Prediction received");
                Ok(result)
            }
            Err(ureq::Error::Status(code, _)) => {
                tracing::warn!(status = code, "Prediction service returned failure status");
                Err(PredictorError::Status(code))
            }
            Err(e) => {
                tracing::warn!("Prediction service unreachable: {}", e);
                Err(PredictorError::Transport(e.to_string()))
            }
        }
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ChestPainType, ClinicalInput, ExerciseAngina, RestingEcg, Sex, StSlope,
    };
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread::{self, JoinHandle};

    fn sample_vector() -> FeatureVector {
        ClinicalInput {
            age: 63.0,
            sex: Sex::Male,
            chest_pain_type: ChestPainType::AtypicalAngina,
            resting_bp: 145.0,
            cholesterol: 233.0,
            fasting_blood_sugar: 1.0,
            resting_ecg: RestingEcg::Normal,
            max_hr: 150.0,
            exercise_angina: ExerciseAngina::No,
            oldpeak: 2.3,
            st_slope: StSlope::Up,
            heart_disease_flag: 0.0,
        }
        .encode()
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).expect("Should read request");
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .filter_map(|l| l.split_once(':'))
                    .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Serve one canned response and hand back the raw request.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Should bind");
        let addr = listener.local_addr().expect("Should have address");

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("Should accept");
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream
                .write_all(response.as_bytes())
                .expect("Should write response");
            request
        });

        (format!("http://{addr}/predict"), handle)
    }

    #[test]
    fn test_predict_success() {
        let (url, server) = serve_once("200 OK", r#"{"result": 1, "probability": 0.72}"#);
        let predictor = HttpPredictor::new(url, Duration::from_secs(5));

        let result = predictor
            .predict(&sample_vector())
            .expect("Should predict");
        assert!((result.probability - 0.72).abs() < f64::EPSILON);
        assert_eq!(result.predicted_class, Some(1));

        let request = server.join().expect("Server thread should finish");
        assert!(request.starts_with("POST /predict "));
        let body = request
            .split("\r\n\r\n")
            .nth(1)
            .expect("Request should have a body");
        let json: serde_json::Value = serde_json::from_str(body).expect("Body should be JSON");
        assert_eq!(
            json,
            serde_json::json!({
                "input": [63.0, 1.0, 1.0, 145.0, 233.0, 1.0, 0.0, 150.0, 0.0, 2.3, 0.0, 0.0]
            })
        );
    }

    #[test]
    fn test_predict_failure_status() {
        let (url, server) = serve_once("500 Internal Server Error", r#"{"error": "boom"}"#);
        let predictor = HttpPredictor::new(url, Duration::from_secs(5));

        let err = predictor
            .predict(&sample_vector())
            .expect_err("Should fail on 500");
        assert_eq!(err, PredictorError::Status(500));
        server.join().expect("Server thread should finish");
    }

    #[test]
    fn test_predict_missing_probability() {
        let (url, server) = serve_once("200 OK", r#"{"result": 1}"#);
        let predictor = HttpPredictor::new(url, Duration::from_secs(5));

        let err = predictor
            .predict(&sample_vector())
            .expect_err("Should reject body without probability");
        assert!(matches!(err, PredictorError::InvalidResponse(_)));
        server.join().expect("Server thread should finish");
    }

    #[test]
    fn test_predict_unreachable() {
        // Grab a free port, then close it so nothing is listening.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("Should bind");
            listener.local_addr().expect("Should have address").port()
        };
        let predictor = HttpPredictor::new(
            format!("http://127.0.0.1:{port}/predict"),
            Duration::from_secs(2),
        );

        let err = predictor
            .predict(&sample_vector())
            .expect_err("Should fail without a server");
        assert!(matches!(err, PredictorError::Transport(_)));
        assert!(err.to_string().starts_with("Server unreachable"));
    }
}

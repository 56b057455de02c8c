//! Prediction result and risk tier.
//!
//! Represents the output of the remote heart disease predictor.

use serde::{Deserialize, Serialize};

/// Risk tier shown on the result badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    /// Below the high-risk threshold
    Low,
    /// At or above the high-risk threshold
    High,
}

impl RiskTier {
    /// Badge text.
    #[must_use]
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Low => "LOW RISK",
            Self::High => "HIGH RISK",
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Metrics are within healthy ranges.",
            Self::High => "Model suggests significant indicators of heart disease.",
        }
    }

    /// Get the associated color for display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (16, 185, 129), // Emerald (#10B981)
            Self::High => (239, 68, 68), // Red (#EF4444)
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Percentage at which a prediction counts as high risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskThreshold {
    pub high_percent: u8,
}

impl Default for RiskThreshold {
    fn default() -> Self {
        Self { high_percent: 50 }
    }
}

impl RiskThreshold {
    /// Classify a rounded percentage.
    #[must_use]
    pub fn tier_for_percent(&self, percent: u8) -> RiskTier {
        if percent >= self.high_percent {
            RiskTier::High
        } else {
            RiskTier::Low
        }
    }

    /// Classify a probability.
    #[must_use]
    pub fn tier(&self, probability: f64) -> RiskTier {
        self.tier_for_percent(percent(probability))
    }
}

/// Rounded percentage for a probability, clamped to `0..=100`.
///
/// `NaN` maps to 0.
#[must_use]
pub fn percent(probability: f64) -> u8 {
    let p = (probability * 100.0).round();
    if p.is_nan() {
        0
    } else {
        p.clamp(0.0, 100.0) as u8
    }
}

/// Result of the remote prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Probability of heart disease (0.0 to 1.0)
    pub probability: f64,

    /// Binary class reported by the predictor, when present
    #[serde(default, rename = "result", skip_serializing_if = "Option::is_none")]
    pub predicted_class: Option<u8>,
}

impl PredictionResult {
    /// Create a new prediction result.
    #[must_use]
    pub fn new(probability: f64) -> Self {
        Self {
            probability,
            predicted_class: None,
        }
    }

    /// Rounded percentage used by the counter and the badge.
    #[must_use]
    pub fn percent(&self) -> u8 {
        percent(self.probability)
    }

    /// Risk tier under the given threshold.
    #[must_use]
    pub fn tier(&self, threshold: RiskThreshold) -> RiskTier {
        threshold.tier(self.probability)
    }
}

//! Rule-based explanation of clinical inputs.
//!
//! The rules are a fixed heuristic over the form values. They do not look at
//! the predictor's output.

use serde::{Deserialize, Serialize};

use super::clinical::{ClinicalInput, ExerciseAngina};

/// Shown when no rule fires.
pub const NO_INDICATORS: &str = "No major risk indicators detected in clinical inputs.";

/// Thresholds for the explanation rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplanationThresholds {
    /// mg/dl, strictly above
    pub cholesterol: f64,
    /// mm Hg, strictly above
    pub resting_bp: f64,
    /// bpm, strictly below
    pub max_hr: f64,
    /// mm, strictly above
    pub oldpeak: f64,
    /// years, strictly above
    pub age: f64,
}

impl Default for ExplanationThresholds {
    fn default() -> Self {
        Self {
            cholesterol: 240.0,
            resting_bp: 140.0,
            max_hr: 120.0,
            oldpeak: 2.0,
            age: 55.0,
        }
    }
}

/// A factor flagged by one of the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFactor {
    HighCholesterol,
    HighRestingBp,
    LowMaxHeartRate,
    StDepression,
    ExerciseAngina,
    Age,
}

impl RiskFactor {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::HighCholesterol => "High cholesterol detected",
            Self::HighRestingBp => "Resting blood pressure above normal range",
            Self::LowMaxHeartRate => "Low maximum heart rate detected",
            Self::StDepression => "ST depression indicates ischemia risk",
            Self::ExerciseAngina => "Exercise-induced angina present",
            Self::Age => "Age above average cardiac risk threshold",
        }
    }
}

/// Evaluate the rules in their fixed order.
///
/// `NaN` inputs never cross a threshold.
#[must_use]
pub fn risk_factors(input: &ClinicalInput, t: &ExplanationThresholds) -> Vec<RiskFactor> {
    let rules = [
        (input.cholesterol > t.cholesterol, RiskFactor::HighCholesterol),
        (input.resting_bp > t.resting_bp, RiskFactor::HighRestingBp),
        (input.max_hr < t.max_hr, RiskFactor::LowMaxHeartRate),
        (input.oldpeak > t.oldpeak, RiskFactor::StDepression),
        (
            input.exercise_angina == ExerciseAngina::Yes,
            RiskFactor::ExerciseAngina,
        ),
        (input.age > t.age, RiskFactor::Age),
    ];

    rules
        .into_iter()
        .filter_map(|(fired, factor)| fired.then_some(factor))
        .collect()
}

/// Explanation lines for display, with the fallback when nothing fires.
#[must_use]
pub fn explain(input: &ClinicalInput, thresholds: &ExplanationThresholds) -> Vec<String> {
    let factors = risk_factors(input, thresholds);
    if factors.is_empty() {
        return vec![NO_INDICATORS.to_string()];
    }
    factors.iter().map(|f| f.message().to_string()).collect()
}

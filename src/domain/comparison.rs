//! Comparison of the patient's vitals against a healthy baseline.

use serde::Serialize;

use super::clinical::ClinicalInput;

/// Number of compared dimensions.
pub const DIMENSIONS: usize = 5;

/// Long labels (profile chart).
pub const LABELS: [&str; DIMENSIONS] = ["Age", "Resting BP", "Cholesterol", "Max HR", "Oldpeak"];

/// Short labels (bar chart).
pub const SHORT_LABELS: [&str; DIMENSIONS] = ["Age", "BP", "Chol", "HR", "Oldpeak"];

/// Reference values for a healthy adult.
pub const HEALTHY_BASELINE: [f64; DIMENSIONS] = [45.0, 120.0, 190.0, 160.0, 0.2];

/// Two labeled series over the same dimensions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub user: [f64; DIMENSIONS],
    pub baseline: [f64; DIMENSIONS],
}

impl Comparison {
    #[must_use]
    pub fn from_input(input: &ClinicalInput) -> Self {
        Self {
            user: [
                input.age,
                input.resting_bp,
                input.cholesterol,
                input.max_hr,
                input.oldpeak,
            ],
            baseline: HEALTHY_BASELINE,
        }
    }

    /// Each user value divided by its baseline.
    ///
    /// `NaN` user values yield `NaN`.
    #[must_use]
    pub fn ratios(&self) -> [f64; DIMENSIONS] {
        let mut out = [0.0; DIMENSIONS];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.user[i] / self.baseline[i];
        }
        out
    }

    /// Rows of `(long label, short label, user, baseline)`.
    pub fn rows(&self) -> impl Iterator<Item = (&'static str, &'static str, f64, f64)> + '_ {
        (0..DIMENSIONS).map(move |i| (LABELS[i], SHORT_LABELS[i], self.user[i], self.baseline[i]))
    }
}

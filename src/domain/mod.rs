//! Domain layer: Core business types and logic.
//!
//! Pure types with no I/O: clinical inputs and their encoding, prediction
//! results, the explanation rules and the baseline comparison.

pub mod clinical;
mod comparison;
mod explain;
mod prediction;

pub use clinical::{
    encode, parse_numeric, Category, ChestPainType, ClinicalInput, ExerciseAngina, FeatureVector,
    RestingEcg, Sex, StSlope, UnknownCategory, FEATURE_COUNT, FEATURE_NAMES,
};
pub use comparison::{Comparison, DIMENSIONS, HEALTHY_BASELINE, LABELS, SHORT_LABELS};
pub use explain::{explain, risk_factors, ExplanationThresholds, RiskFactor, NO_INDICATORS};
pub use prediction::{percent, PredictionResult, RiskThreshold, RiskTier};

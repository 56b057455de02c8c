//! Clinical input types and the feature encoder.
//!
//! The remote predictor was trained on a fixed 12-column layout. The encoder
//! below is the only place that layout is spelled out.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of values in a [`FeatureVector`].
pub const FEATURE_COUNT: usize = 12;

/// Feature names in the order the predictor expects them.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "sex",
    "chest_pain_type",
    "resting_bp",
    "cholesterol",
    "fasting_blood_sugar",
    "resting_ecg",
    "max_hr",
    "exercise_angina",
    "oldpeak",
    "st_slope",
    "heart_disease_flag",
];

/// A categorical value was not one of the documented codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {field} value: {value:?}")]
pub struct UnknownCategory {
    pub field: &'static str,
    pub value: String,
}

/// Closed set of codes for a categorical form field.
pub trait Category: Copy + Sized + 'static {
    /// Field name used in error messages.
    const FIELD: &'static str;

    /// Every value, in selector order.
    const ALL: &'static [Self];

    /// Integer the predictor was trained with.
    fn code(self) -> u8;

    /// Short code as submitted by the form (`"M"`, `"ASY"`, ...).
    fn as_str(self) -> &'static str;

    /// Human readable label.
    fn label(self) -> &'static str;

    /// Parse a short code.
    ///
    /// # Errors
    /// Returns [`UnknownCategory`] for anything outside [`Category::ALL`].
    fn parse_code(value: &str) -> Result<Self, UnknownCategory> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == value)
            .ok_or_else(|| UnknownCategory {
                field: Self::FIELD,
                value: value.to_string(),
            })
    }
}

macro_rules! category {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => ($code:literal, $short:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $short)]
                $variant,
            )+
        }

        impl Category for $name {
            const FIELD: &'static str = $field;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn code(self) -> u8 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $short,)+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownCategory;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_code(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

category! {
    /// Biological sex.
    Sex, "sex" {
        Male => (1, "M", "Male"),
        Female => (0, "F", "Female"),
    }
}

category! {
    /// Chest pain type.
    ChestPainType, "chest pain type" {
        TypicalAngina => (0, "TA", "Typical Angina"),
        AtypicalAngina => (1, "ATA", "Atypical Angina"),
        NonAnginalPain => (2, "NAP", "Non-Anginal Pain"),
        Asymptomatic => (3, "ASY", "Asymptomatic"),
    }
}

category! {
    /// Resting electrocardiogram result.
    RestingEcg, "resting ECG" {
        Normal => (0, "Normal", "Normal"),
        StAbnormality => (1, "ST", "ST-T Wave Abnormality"),
        LeftVentricularHypertrophy => (2, "LVH", "Left Ventricular Hypertrophy"),
    }
}

category! {
    /// Exercise-induced angina.
    ExerciseAngina, "exercise angina" {
        No => (0, "N", "No"),
        Yes => (1, "Y", "Yes"),
    }
}

category! {
    /// Slope of the peak exercise ST segment.
    StSlope, "ST slope" {
        Up => (0, "Up", "Upsloping"),
        Flat => (1, "Flat", "Flat"),
        Down => (2, "Down", "Downsloping"),
    }
}

/// Clinical inputs captured from the form at submission time.
///
/// Numeric fields are not range checked. A blank or unparsable form value is
/// carried as `NaN` and reaches the predictor as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalInput {
    #[serde(deserialize_with = "nan_if_null")]
    pub age: f64,
    pub sex: Sex,
    #[serde(alias = "chestPain")]
    pub chest_pain_type: ChestPainType,
    #[serde(rename = "restingBP", deserialize_with = "nan_if_null")]
    pub resting_bp: f64,
    #[serde(deserialize_with = "nan_if_null")]
    pub cholesterol: f64,
    /// Fasting blood sugar > 120 mg/dl, 0 or 1.
    #[serde(alias = "fastingBS", deserialize_with = "nan_if_null")]
    pub fasting_blood_sugar: f64,
    #[serde(rename = "restingECG")]
    pub resting_ecg: RestingEcg,
    #[serde(rename = "maxHR", deserialize_with = "nan_if_null")]
    pub max_hr: f64,
    #[serde(alias = "angina")]
    pub exercise_angina: ExerciseAngina,
    #[serde(deserialize_with = "nan_if_null")]
    pub oldpeak: f64,
    #[serde(alias = "slope")]
    pub st_slope: StSlope,
    #[serde(alias = "heartDisease", deserialize_with = "nan_if_null")]
    pub heart_disease_flag: f64,
}

/// JSON `null` stands for a blank numeric field.
fn nan_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl ClinicalInput {
    /// Encode into the predictor's feature layout.
    #[must_use]
    pub fn encode(&self) -> FeatureVector {
        encode(self)
    }
}

/// Fixed-order numeric encoding of a [`ClinicalInput`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Values in schema order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Schema names paired with values.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }

    /// Number of slots holding `NaN` (blank or malformed numeric input).
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.0.iter().filter(|v| v.is_nan()).count()
    }
}

/// Encode clinical inputs into the predictor's feature layout.
#[must_use]
pub fn encode(input: &ClinicalInput) -> FeatureVector {
    FeatureVector([
        input.age,
        f64::from(input.sex.code()),
        f64::from(input.chest_pain_type.code()),
        input.resting_bp,
        input.cholesterol,
        input.fasting_blood_sugar,
        f64::from(input.resting_ecg.code()),
        input.max_hr,
        f64::from(input.exercise_angina.code()),
        input.oldpeak,
        f64::from(input.st_slope.code()),
        input.heart_disease_flag,
    ])
}

/// Parse numeric form text, yielding `NaN` for blank or malformed values.
#[must_use]
pub fn parse_numeric(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(f64::NAN)
}

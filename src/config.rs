//! Runtime settings sourced from the environment.
//!
//! | Variable                        | Default                         |
//! |---------------------------------|---------------------------------|
//! | `CARDIOPULSE_PREDICT_URL`       | `http://127.0.0.1:5000/predict` |
//! | `CARDIOPULSE_TIMEOUT_SECS`      | `30`                            |
//! | `CARDIOPULSE_HIGH_RISK_PERCENT` | `50`                            |
//! | `CARDIOPULSE_TICK_MS`           | `20`                            |
//! | `CARDIOPULSE_REPORT_DIR`        | `.`                             |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::adapters::http::DEFAULT_ENDPOINT;
use crate::domain::{ExplanationThresholds, RiskThreshold};

pub const PREDICT_URL_ENV: &str = "CARDIOPULSE_PREDICT_URL";
pub const TIMEOUT_ENV: &str = "CARDIOPULSE_TIMEOUT_SECS";
pub const HIGH_RISK_ENV: &str = "CARDIOPULSE_HIGH_RISK_PERCENT";
pub const TICK_ENV: &str = "CARDIOPULSE_TICK_MS";
pub const REPORT_DIR_ENV: &str = "CARDIOPULSE_REPORT_DIR";

/// A setting could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid value {value:?} for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Application settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Prediction endpoint
    pub predict_url: String,
    /// Overall request timeout
    pub timeout: Duration,
    /// Percentage at which the badge turns HIGH
    pub risk_threshold: RiskThreshold,
    /// Thresholds of the explanation rules
    pub explanation: ExplanationThresholds,
    /// Interval between probability counter steps
    pub tick: Duration,
    /// Where exported reports are written
    pub report_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            predict_url: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
            risk_threshold: RiskThreshold::default(),
            explanation: ExplanationThresholds::default(),
            tick: Duration::from_millis(20),
            report_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError` naming the first malformed variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary lookup (tests, config files).
    ///
    /// # Errors
    /// Returns `ConfigError` naming the first malformed variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(url) = lookup(PREDICT_URL_ENV).filter(|v| !v.trim().is_empty()) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError {
                    var: PREDICT_URL_ENV,
                    value: url,
                    reason: "expected an http:// or https:// URL".to_string(),
                });
            }
            settings.predict_url = url;
        }

        if let Some(secs) = parse_var::<u64, _>(&lookup, TIMEOUT_ENV)? {
            if secs == 0 {
                return Err(ConfigError {
                    var: TIMEOUT_ENV,
                    value: secs.to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
            settings.timeout = Duration::from_secs(secs);
        }

        if let Some(percent) = parse_var::<u8, _>(&lookup, HIGH_RISK_ENV)? {
            if percent > 100 {
                return Err(ConfigError {
                    var: HIGH_RISK_ENV,
                    value: percent.to_string(),
                    reason: "must be between 0 and 100".to_string(),
                });
            }
            settings.risk_threshold = RiskThreshold {
                high_percent: percent,
            };
        }

        if let Some(ms) = parse_var::<u64, _>(&lookup, TICK_ENV)? {
            settings.tick = Duration::from_millis(ms.max(1));
        }

        if let Some(dir) = lookup(REPORT_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            settings.report_dir = PathBuf::from(dir);
        }

        Ok(settings)
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| ConfigError {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).expect("Should load defaults");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.predict_url, "http://127.0.0.1:5000/predict");
        assert_eq!(settings.risk_threshold.high_percent, 50);
        assert_eq!(settings.tick, Duration::from_millis(20));
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            (PREDICT_URL_ENV, "http://model.local:8080/predict"),
            (TIMEOUT_ENV, "5"),
            (HIGH_RISK_ENV, "65"),
            (TICK_ENV, "0"),
            (REPORT_DIR_ENV, "/tmp/reports"),
        ]))
        .expect("Should load overrides");

        assert_eq!(settings.predict_url, "http://model.local:8080/predict");
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.risk_threshold.high_percent, 65);
        assert_eq!(settings.tick, Duration::from_millis(1));
        assert_eq!(settings.report_dir, PathBuf::from("/tmp/reports"));
    }

    #[test]
    fn test_malformed_values() {
        let err = Settings::from_lookup(lookup(&[(HIGH_RISK_ENV, "high")]))
            .expect_err("Should reject non-numeric threshold");
        assert_eq!(err.var, HIGH_RISK_ENV);

        let err = Settings::from_lookup(lookup(&[(HIGH_RISK_ENV, "150")]))
            .expect_err("Should reject threshold above 100");
        assert_eq!(err.var, HIGH_RISK_ENV);

        let err = Settings::from_lookup(lookup(&[(PREDICT_URL_ENV, "127.0.0.1:5000")]))
            .expect_err("Should reject URL without scheme");
        assert_eq!(err.var, PREDICT_URL_ENV);

        let err = Settings::from_lookup(lookup(&[(TIMEOUT_ENV, "0")]))
            .expect_err("Should reject zero timeout");
        assert_eq!(err.var, TIMEOUT_ENV);
    }
}

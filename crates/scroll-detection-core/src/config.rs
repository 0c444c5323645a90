#![forbid(unsafe_code)]

//! Scroll class configuration.
//!
//! A [`ScrollConfig`] holds one [`AxisConfig`] per metric: absolute pixels
//! scrolled and percentage of the scrollable track. Each axis names a ceiling
//! for single-value classes and a list of sticky thresholds.
//!
//! The JSON shape matches the browser-facing object:
//!
//! ```json
//! {
//!   "pixel":   { "singleClassesUntil": 200, "stickyDistances": [50, 100, 150, 200, 300] },
//!   "percent": { "singleClassesUntil": 100, "stickyDistances": [25, 50, 75] }
//! }
//! ```
//!
//! Parsing is permissive by default: a missing `singleClassesUntil` becomes
//! `NaN`, a missing `stickyDistances` becomes empty, and negative or
//! non-finite values are kept as-is. [`ValidationMode::Strict`] rejects them.

use serde::{Deserialize, Deserializer, Serialize};

/// Thresholds for one scroll metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisConfig {
    /// Largest metric value that still produces a single-value class.
    #[serde(default = "missing_number", deserialize_with = "number_or_nan")]
    pub single_classes_until: f64,

    /// Thresholds that earn a sticky class once crossed, in configured order.
    #[serde(default, deserialize_with = "numbers_or_nan")]
    pub sticky_distances: Vec<f64>,
}

fn missing_number() -> f64 {
    f64::NAN
}

// JSON has no NaN; `null` (what serializers emit for it) reads back as NaN.
fn number_or_nan<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

fn numbers_or_nan<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    let values = Vec::<Option<f64>>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect())
}

impl AxisConfig {
    /// Create an axis configuration.
    #[must_use]
    pub fn new(single_classes_until: f64, sticky_distances: &[f64]) -> Self {
        Self {
            single_classes_until,
            sticky_distances: sticky_distances.to_vec(),
        }
    }

    fn missing() -> Self {
        Self::new(f64::NAN, &[])
    }

    fn check(&self, axis: &'static str) -> Result<(), ConfigError> {
        let values = std::iter::once(("singleClassesUntil", self.single_classes_until)).chain(
            self.sticky_distances
                .iter()
                .map(|&value| ("stickyDistances", value)),
        );
        for (field, value) in values {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteValue { axis, field });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeValue { axis, field, value });
            }
        }
        Ok(())
    }
}

/// Full configuration: one axis for pixels, one for percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default = "AxisConfig::missing")]
    pub pixel: AxisConfig,
    #[serde(default = "AxisConfig::missing")]
    pub percent: AxisConfig,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            pixel: AxisConfig::new(200.0, &[50.0, 100.0, 150.0, 200.0, 300.0]),
            percent: AxisConfig::new(100.0, &[25.0, 50.0, 75.0]),
        }
    }
}

/// How strictly an incoming configuration is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Accept any shape serde can read; odd values flow into the arithmetic.
    #[default]
    Permissive,
    /// Reject negative and non-finite thresholds.
    Strict,
}

impl ScrollConfig {
    /// Parse a configuration from JSON, then check it under `mode`.
    pub fn from_json(json: &str, mode: ValidationMode) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Json(err.to_string()))?;
        config.validate(mode)?;
        Ok(config)
    }

    /// Render the configuration as JSON.
    ///
    /// Non-finite numbers have no JSON form and are written as `null`, which
    /// [`ScrollConfig::from_json`] reads back as `NaN`.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|err| ConfigError::Json(err.to_string()))
    }

    /// Check value ranges. Always succeeds in permissive mode.
    pub fn validate(&self, mode: ValidationMode) -> Result<(), ConfigError> {
        match mode {
            ValidationMode::Permissive => Ok(()),
            ValidationMode::Strict => {
                self.pixel.check("pixel")?;
                self.percent.check("percent")
            }
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The input could not be read as a configuration object.
    Json(String),
    /// A threshold is below zero.
    NegativeValue {
        axis: &'static str,
        field: &'static str,
        value: f64,
    },
    /// A threshold is `NaN` or infinite.
    NonFiniteValue {
        axis: &'static str,
        field: &'static str,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "invalid config json: {msg}"),
            Self::NegativeValue { axis, field, value } => {
                write!(f, "{axis}.{field} must be non-negative, got {value}")
            }
            Self::NonFiniteValue { axis, field } => {
                write!(f, "{axis}.{field} must be a finite number")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

//! Severity thresholds and vibration levels

use serde::{Deserialize, Serialize};

use crate::config::defaults;

// ============================================================================
// Vibration Level
// ============================================================================

/// Qualitative severity of a velocity magnitude.
///
/// Variant order is band order, so `Ord` compares severity.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum VibrationLevel {
    #[default]
    Normal,
    Warning,
    Concern,
    Critical,
}

impl VibrationLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            VibrationLevel::Normal => "normal",
            VibrationLevel::Warning => "warning",
            VibrationLevel::Concern => "concern",
            VibrationLevel::Critical => "critical",
        }
    }
}

impl std::fmt::Display for VibrationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Threshold Bands
// ============================================================================

/// Three ascending velocity limits (mm/s) defining four severity bands.
///
/// `medium` is optional; when absent the midpoint of `min` and `max` is used.
/// Ordering is the caller's responsibility and is not checked here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ThresholdConfig {
    pub min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<f64>,
    pub max: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            min: defaults::THRESHOLD_MIN_MM_S,
            medium: None,
            max: defaults::THRESHOLD_MAX_MM_S,
        }
    }
}

impl ThresholdConfig {
    pub const fn new(min: f64, medium: Option<f64>, max: f64) -> Self {
        Self { min, medium, max }
    }

    /// Effective medium limit.
    pub fn medium(&self) -> f64 {
        self.medium.unwrap_or((self.min + self.max) / 2.0)
    }
}

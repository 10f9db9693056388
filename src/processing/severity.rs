//! Severity classification of velocity magnitudes
//!
//! Bands over velocity `v` (mm/s):
//! - `v < min` → normal
//! - `min ≤ v < medium` → warning
//! - `medium ≤ v < max` → concern
//! - `v ≥ max` → critical
//!
//! Stateless: there is no hysteresis, so values hovering at a boundary
//! alternate between adjacent levels.

use crate::types::{ThresholdConfig, VibrationLevel};

/// Classify a velocity magnitude.
///
/// `thresholds` are the sensor-specific bands; `None` uses the system
/// defaults. NaN is classified as normal; infinities fall into the outer bands.
pub fn get_vibration_level(velocity: f64, thresholds: Option<&ThresholdConfig>) -> VibrationLevel {
    if velocity.is_nan() {
        return VibrationLevel::Normal;
    }

    let bands = thresholds.copied().unwrap_or_default();
    let medium = bands.medium();

    if velocity < bands.min {
        VibrationLevel::Normal
    } else if velocity < medium {
        VibrationLevel::Warning
    } else if velocity < bands.max {
        VibrationLevel::Concern
    } else {
        VibrationLevel::Critical
    }
}

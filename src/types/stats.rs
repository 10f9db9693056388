//! Per-axis summary types: AxisMetrics, AxisStats, AxisReport

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Axis, DisplayUnit, TopPeaks, VibrationLevel};

// ============================================================================
// Numeric Summary
// ============================================================================

/// Numeric per-axis summary, before display formatting.
///
/// `peak` equals `rms` and `peak_to_peak` is `2 × peak`; severity thresholds
/// are calibrated against this convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisMetrics {
    /// Velocity RMS (mm/s)
    pub rms: f64,
    /// Velocity "peak" (mm/s), equal to RMS
    pub peak: f64,
    /// Velocity peak-to-peak (mm/s)
    pub peak_to_peak: f64,
    /// Frequency of the top velocity-spectrum peak (Hz)
    pub dominant_frequency: f64,
    /// Magnitude of the top acceleration-spectrum peak (mm/s²)
    pub accel_top_peak: f64,
    /// Magnitude of the top velocity-spectrum peak (mm/s)
    pub velocity_top_peak: f64,
}

impl AxisMetrics {
    /// All-zero sentinel, returned when a buffer cannot be analysed.
    pub const ZERO: AxisMetrics = AxisMetrics {
        rms: 0.0,
        peak: 0.0,
        peak_to_peak: 0.0,
        dominant_frequency: 0.0,
        accel_top_peak: 0.0,
        velocity_top_peak: 0.0,
    };
}

// ============================================================================
// Display Summary
// ============================================================================

/// Display form of [`AxisMetrics`], consumed by cards, dots and detail charts.
///
/// Time-domain fields carry 3 decimals, frequency-domain fields 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisStats {
    pub rms: String,
    pub peak: String,
    pub peak_to_peak: String,
    pub dominant_freq: String,
    pub accel_top_peak: String,
    pub velocity_top_peak: String,
}

impl AxisStats {
    /// Zeroed sentinel: `"0.000"` time-domain and `"0.00"` frequency-domain.
    pub fn zero() -> Self {
        Self::from(&AxisMetrics::ZERO)
    }
}

impl Default for AxisStats {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<&AxisMetrics> for AxisStats {
    fn from(m: &AxisMetrics) -> Self {
        Self {
            rms: format!("{:.3}", m.rms),
            peak: format!("{:.3}", m.peak),
            peak_to_peak: format!("{:.3}", m.peak_to_peak),
            dominant_freq: format!("{:.2}", m.dominant_frequency),
            accel_top_peak: format!("{:.2}", m.accel_top_peak),
            velocity_top_peak: format!("{:.2}", m.velocity_top_peak),
        }
    }
}

// ============================================================================
// Axis Report
// ============================================================================

/// Everything the dashboard reads for one axis of one acquisition.
#[derive(Debug, Clone, Serialize)]
pub struct AxisReport {
    pub axis: Axis,
    pub sample_count: usize,
    pub metrics: AxisMetrics,
    pub stats: AxisStats,
    pub level: VibrationLevel,
    pub unit: DisplayUnit,
    pub peaks: TopPeaks,
    pub analyzed_at: DateTime<Utc>,
}

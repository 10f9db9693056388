//! Acquisition types: Axis, GScale, AcquisitionConfig

use serde::{Deserialize, Serialize};

use crate::config::defaults;

// ============================================================================
// Sensor Axis
// ============================================================================

/// Measurement axis of a tri-axial accelerometer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// Horizontal
    #[serde(alias = "h")]
    H,
    /// Vertical
    #[serde(alias = "v")]
    V,
    /// Axial
    #[serde(alias = "a")]
    A,
}

impl Axis {
    /// All axes in display order.
    pub const ALL: [Axis; 3] = [Axis::H, Axis::V, Axis::A];

    /// Single-letter label used by cards and charts.
    pub const fn label(self) -> &'static str {
        match self {
            Axis::H => "H",
            Axis::V => "V",
            Axis::A => "A",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "H" => Ok(Axis::H),
            "V" => Ok(Axis::V),
            "A" => Ok(Axis::A),
            other => Err(format!("unknown axis '{other}' (expected H, V or A)")),
        }
    }
}

// ============================================================================
// Full-Scale Range
// ============================================================================

/// Accelerometer full-scale range selector.
///
/// Each range maps to a fixed ADC sensitivity: `divisor = 32768 / range`
/// counts per g.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum GScale {
    /// ±2 g, 16384 counts/g
    #[default]
    G2,
    /// ±4 g, 8192 counts/g
    G4,
    /// ±8 g, 4096 counts/g
    G8,
    /// ±16 g, 2048 counts/g
    G16,
}

impl GScale {
    /// Map a configured range (2/4/8/16) to a scale.
    ///
    /// Unknown values degrade to ±2 g rather than failing.
    pub const fn from_range(range: u32) -> Self {
        match range {
            4 => GScale::G4,
            8 => GScale::G8,
            16 => GScale::G16,
            _ => GScale::G2,
        }
    }

    /// Whether `range` is one of the supported selectors.
    pub const fn is_supported(range: u32) -> bool {
        matches!(range, 2 | 4 | 8 | 16)
    }

    /// Full-scale range in g.
    pub const fn range(self) -> u32 {
        match self {
            GScale::G2 => 2,
            GScale::G4 => 4,
            GScale::G8 => 8,
            GScale::G16 => 16,
        }
    }

    /// ADC counts per g.
    pub const fn sensitivity(self) -> f64 {
        match self {
            GScale::G2 => 16384.0,
            GScale::G4 => 8192.0,
            GScale::G8 => 4096.0,
            GScale::G16 => 2048.0,
        }
    }
}

// ============================================================================
// Acquisition Parameters
// ============================================================================

/// Scalar parameters accompanying one acquisition event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AcquisitionConfig {
    /// Maximum analysis frequency (Hz)
    pub fmax: f64,
    /// Lines of resolution: sample-count basis for the time span
    pub lor: u32,
    /// Full-scale range selector (2/4/8/16 g)
    pub g_scale: u32,
    /// Reporting cadence in seconds. Not used by per-buffer math.
    pub time_interval: u64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            fmax: defaults::ACQUISITION_FMAX_HZ,
            lor: defaults::ACQUISITION_LOR,
            g_scale: defaults::ACQUISITION_G_SCALE,
            time_interval: defaults::ACQUISITION_TIME_INTERVAL_SECS,
        }
    }
}

impl AcquisitionConfig {
    /// Total acquisition time span in seconds: `lor / fmax`.
    ///
    /// Returns 0.0 when either parameter is out of range.
    pub fn time_span(&self) -> f64 {
        if !self.fmax.is_finite() || self.fmax <= 0.0 || self.lor == 0 {
            return 0.0;
        }
        f64::from(self.lor) / self.fmax
    }

    /// Per-sample time delta for a buffer of `n` samples: `span / (n - 1)`.
    pub fn sample_interval(&self, n: usize) -> f64 {
        if n < 2 {
            return 0.0;
        }
        self.time_span() / (n - 1) as f64
    }

    /// Resolved full-scale range.
    pub const fn scale(&self) -> GScale {
        GScale::from_range(self.g_scale)
    }
}

//! Frequency-domain types: SpectrumResult, PeakRecord, TopPeaks, DisplayUnit

use serde::{Deserialize, Serialize};

// ============================================================================
// Spectrum
// ============================================================================

/// Magnitude spectrum with an index-aligned frequency axis.
///
/// `magnitude[i]` is the spectral amplitude at `frequency[i]` Hz. Index 0 is
/// the DC component. An empty result means "no FFT available".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectrumResult {
    pub magnitude: Vec<f64>,
    pub frequency: Vec<f64>,
}

impl SpectrumResult {
    /// Empty spectrum, returned for degenerate input.
    pub const fn empty() -> Self {
        Self {
            magnitude: Vec::new(),
            frequency: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.magnitude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitude.is_empty()
    }

    /// Copy of the spectrum with the DC bin sliced off both sequences.
    pub fn without_dc(&self) -> Self {
        Self {
            magnitude: self.magnitude.iter().skip(1).copied().collect(),
            frequency: self.frequency.iter().skip(1).copied().collect(),
        }
    }
}

// ============================================================================
// Peaks
// ============================================================================

/// One local maximum of a magnitude spectrum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakRecord {
    /// Raw spectral amplitude at the peak
    pub magnitude: f64,
    /// Frequency label of the peak bin, 2 decimals
    pub frequency: String,
    /// Index of the peak in the searched spectrum
    pub index: usize,
    /// RMS-equivalent display value (`magnitude × 0.707`), 2 decimals
    pub rms: String,
}

/// Top-K peaks in rank order with a parallel highlight-color tag per peak.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopPeaks {
    pub peaks: Vec<PeakRecord>,
    pub colors: Vec<&'static str>,
}

impl TopPeaks {
    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    /// Highest-ranked peak, if any.
    pub fn first(&self) -> Option<&PeakRecord> {
        self.peaks.first()
    }
}

// ============================================================================
// Display Unit
// ============================================================================

/// Unit branch selected for spectrum display.
///
/// - `AccelerationG`: raw g, no window
/// - `AccelerationMmS2`: mm/s², Hann-windowed
/// - `Velocity`: mm/s, derived from the windowed mm/s² spectrum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayUnit {
    #[serde(alias = "g")]
    AccelerationG,
    #[serde(alias = "mms2")]
    AccelerationMmS2,
    #[default]
    Velocity,
}

impl DisplayUnit {
    /// Unit suffix for labels.
    pub const fn suffix(self) -> &'static str {
        match self {
            DisplayUnit::AccelerationG => "g",
            DisplayUnit::AccelerationMmS2 => "mm/s²",
            DisplayUnit::Velocity => "mm/s",
        }
    }

    /// Whether a Hann window is applied before the FFT for this unit.
    pub const fn windowed(self) -> bool {
        !matches!(self, DisplayUnit::AccelerationG)
    }
}

impl std::str::FromStr for DisplayUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "g" | "acceleration_g" => Ok(DisplayUnit::AccelerationG),
            "mms2" | "mm/s2" | "acceleration_mm_s2" => Ok(DisplayUnit::AccelerationMmS2),
            "velocity" | "mm/s" => Ok(DisplayUnit::Velocity),
            other => Err(format!(
                "unknown unit '{other}' (expected g, mms2 or velocity)"
            )),
        }
    }
}

impl std::fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}

//! Shared data structures for the vibration analysis pipeline
//!
//! - Acquisition: Axis, GScale, AcquisitionConfig (caller-supplied inputs)
//! - Spectrum: SpectrumResult, PeakRecord, TopPeaks, DisplayUnit
//! - Thresholds: ThresholdConfig, VibrationLevel
//! - Stats: AxisMetrics, AxisStats, AxisReport (per-axis outputs)

mod acquisition;
mod spectrum;
mod stats;
mod thresholds;

pub use acquisition::*;
pub use spectrum::*;
pub use stats::*;
pub use thresholds::*;

//! Signal processing module - vibration analysis pipeline
//!
//! One axis buffer at a time, batch only:
//!
//! 1. `conversion` - ADC counts → g → mm/s²
//! 2. `integration` - trapezoidal velocity
//! 3. `window` - Hann window before the FFT
//! 4. `fft` - calibrated magnitude spectrum
//! 5. `peaks` - top-K local maxima
//! 6. `stats` - per-axis RMS and spectral top peaks
//! 7. `severity` - normal / warning / concern / critical
//!
//! `analysis` wires the steps together per display unit. Public functions
//! never fail: degenerate input yields empty spectra or zeroed stats.

mod analysis;
mod conversion;
mod fft;
mod integration;
mod peaks;
mod severity;
mod stats;
mod window;

pub use analysis::{analyze_axis, compute_unit_spectrum, AnalysisRequest};
pub use conversion::*;
pub use fft::*;
pub use integration::*;
pub use peaks::*;
pub use severity::*;
pub use stats::*;
pub use window::*;

use thiserror::Error;

/// Errors in signal processing
///
/// These never cross the public boundary of the pipeline; they are logged and
/// converted to empty or zeroed results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessingError {
    #[error("Insufficient data: need {needed}, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("Non-finite sample at index {0}")]
    NonFiniteSample(usize),

    #[error("Invalid maximum frequency: {0}")]
    InvalidMaxFrequency(f64),

    #[error("Invalid sample interval: {0}")]
    InvalidSampleInterval(f64),
}

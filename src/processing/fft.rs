//! FFT computation using rustfft
//!
//! Calibrated magnitude spectrum for accelerometer buffers.
//!
//! # Scaling conventions
//!
//! Both constants come from the acquisition chain of the sensor family and
//! must be reproduced exactly for output compatibility:
//!
//! - magnitude: `(2.56 / n) · |X[i]|`, with `n` the un-padded buffer length
//! - frequency: `i · fmax / (1600 · 2.56)` Hz, rounded to 2 decimals
//!
//! The `1600` is fixed and does not follow the acquisition's `lor`.
//!
//! # Example
//!
//! ```ignore
//! use vibration_monitor::processing::compute_spectrum;
//!
//! let spectrum = compute_spectrum(&acceleration_mm_s2, 1000.0);
//! assert_eq!(spectrum.magnitude.len(), acceleration_mm_s2.len());
//! ```

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

use super::ProcessingError;
use crate::types::SpectrumResult;

// ============================================================================
// Calibration Constants
// ============================================================================

/// Bin-scaling calibration factor; also the sampling-rate / fmax ratio.
pub const SPECTRUM_SCALE_FACTOR: f64 = 2.56;

/// Lines-of-resolution basis baked into the frequency axis.
pub const FREQUENCY_AXIS_LINES: f64 = 1600.0;

/// Frequency resolution (Hz per bin) for a given `max_freq`.
pub fn frequency_resolution(max_freq: f64) -> f64 {
    max_freq / (FREQUENCY_AXIS_LINES * SPECTRUM_SCALE_FACTOR)
}

/// Round to 2 decimals, the precision of frequency labels.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// Standalone FFT Functions
// ============================================================================

/// Compute the calibrated magnitude spectrum of a time series.
///
/// The input is zero-padded to the next power of two, but only the first
/// `n = time_data.len()` bins are returned. Degenerate input (empty buffer,
/// non-finite samples, non-positive `max_freq`) yields an empty spectrum.
pub fn compute_spectrum(time_data: &[f64], max_freq: f64) -> SpectrumResult {
    match try_compute_spectrum(time_data, max_freq) {
        Ok(spectrum) => spectrum,
        Err(e) => {
            tracing::debug!(error = %e, samples = time_data.len(), "FFT unavailable");
            SpectrumResult::empty()
        }
    }
}

/// Same as [`compute_spectrum`] but reports why no spectrum was produced.
pub fn try_compute_spectrum(
    time_data: &[f64],
    max_freq: f64,
) -> Result<SpectrumResult, ProcessingError> {
    if time_data.is_empty() {
        return Err(ProcessingError::InsufficientData {
            needed: 1,
            available: 0,
        });
    }

    if !max_freq.is_finite() || max_freq <= 0.0 {
        return Err(ProcessingError::InvalidMaxFrequency(max_freq));
    }

    if let Some(idx) = time_data.iter().position(|x| !x.is_finite()) {
        return Err(ProcessingError::NonFiniteSample(idx));
    }

    let processor = FftProcessor::new(time_data.len());
    let bins = processor.transform(time_data);

    let n = time_data.len();
    let scale = SPECTRUM_SCALE_FACTOR / n as f64;

    let magnitude: Vec<f64> = bins.iter().take(n).map(|c| scale * c.norm()).collect();
    let frequency: Vec<f64> = (0..n)
        .map(|i| {
            round_to_hundredths(
                i as f64 * max_freq / (FREQUENCY_AXIS_LINES * SPECTRUM_SCALE_FACTOR),
            )
        })
        .collect();

    Ok(SpectrumResult {
        magnitude,
        frequency,
    })
}

// ============================================================================
// FFT Processor
// ============================================================================

/// Forward FFT planned for the padded size of one buffer length.
pub struct FftProcessor {
    fft: Arc<dyn Fft<f64>>,
    size: usize,
}

impl FftProcessor {
    /// Plan a forward FFT for buffers of `len` samples.
    ///
    /// The transform size is `len.next_power_of_two()`.
    pub fn new(len: usize) -> Self {
        let size = len.max(1).next_power_of_two();
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self { fft, size }
    }

    /// Zero-pad `signal` to the planned size and transform it.
    ///
    /// Samples beyond the planned size are ignored.
    pub fn transform(&self, signal: &[f64]) -> Vec<Complex<f64>> {
        let mut buffer: Vec<Complex<f64>> = signal
            .iter()
            .take(self.size)
            .map(|&x| Complex::new(x, 0.0))
            .collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);
        buffer
    }

    /// Padded transform size.
    pub fn size(&self) -> usize {
        self.size
    }
}

// ============================================================================
// Tests
// ============================================================================

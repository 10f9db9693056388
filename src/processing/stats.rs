//! Per-axis statistic aggregation
//!
//! Time domain: velocity RMS, with `peak = RMS` and `peak_to_peak = 2 × peak`.
//! Frequency domain: top-1 peak of the acceleration and velocity spectra
//! (DC bin removed); the velocity peak's frequency is the dominant frequency.

use super::{
    acceleration_to_velocity, adc_buffer_to_mm_per_sec_squared, find_top_peaks,
    try_compute_spectrum, ProcessingError,
};
use crate::types::{AxisMetrics, AxisStats, GScale, SpectrumResult};

/// Root mean square of a series. 0.0 for an empty series.
pub fn rms(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum_squares: f64 = values.iter().map(|v| v * v).sum();
    (sum_squares / values.len() as f64).sqrt()
}

/// Display-formatted axis statistics for one ADC buffer.
///
/// Never fails; see [`axis_top_peak_metrics`].
pub fn get_axis_top_peak_stats(axis_data: &[i32], dt: f64, g_scale: u32, max_freq: f64) -> AxisStats {
    AxisStats::from(&axis_top_peak_metrics(axis_data, dt, g_scale, max_freq))
}

/// Numeric axis statistics for one ADC buffer.
///
/// Any degenerate input or internal failure yields [`AxisMetrics::ZERO`];
/// a dashboard tile must never crash on a bad buffer.
pub fn axis_top_peak_metrics(axis_data: &[i32], dt: f64, g_scale: u32, max_freq: f64) -> AxisMetrics {
    match try_axis_top_peak_metrics(axis_data, dt, g_scale, max_freq) {
        Ok(metrics) => metrics,
        Err(e) => {
            tracing::debug!(
                error = %e,
                samples = axis_data.len(),
                dt = dt,
                g_scale = g_scale,
                "Axis statistics unavailable, returning zeroed stats"
            );
            AxisMetrics::ZERO
        }
    }
}

/// Fallible core of [`axis_top_peak_metrics`].
pub fn try_axis_top_peak_metrics(
    axis_data: &[i32],
    dt: f64,
    g_scale: u32,
    max_freq: f64,
) -> Result<AxisMetrics, ProcessingError> {
    if axis_data.is_empty() {
        return Err(ProcessingError::InsufficientData {
            needed: 1,
            available: 0,
        });
    }

    if !dt.is_finite() || dt < 0.0 {
        return Err(ProcessingError::InvalidSampleInterval(dt));
    }

    let acceleration = adc_buffer_to_mm_per_sec_squared(axis_data, GScale::from_range(g_scale));
    let velocity = acceleration_to_velocity(&acceleration, dt);

    let velocity_rms = rms(&velocity);
    let peak = velocity_rms;

    let accel_spectrum = try_compute_spectrum(&acceleration, max_freq)?.without_dc();
    let velocity_spectrum = try_compute_spectrum(&velocity, max_freq)?.without_dc();

    let (accel_top_peak, _) = top_peak(&accel_spectrum);
    let (velocity_top_peak, dominant_frequency) = top_peak(&velocity_spectrum);

    tracing::trace!(
        samples = axis_data.len(),
        rms = velocity_rms,
        accel_top_peak = accel_top_peak,
        velocity_top_peak = velocity_top_peak,
        dominant_frequency = dominant_frequency,
        "Axis statistics computed"
    );

    Ok(AxisMetrics {
        rms: velocity_rms,
        peak,
        peak_to_peak: 2.0 * peak,
        dominant_frequency,
        accel_top_peak,
        velocity_top_peak,
    })
}

/// (magnitude, frequency) of the highest local maximum, or zeros.
fn top_peak(spectrum: &SpectrumResult) -> (f64, f64) {
    find_top_peaks(&spectrum.magnitude, &spectrum.frequency, 1)
        .first()
        .map_or((0.0, 0.0), |p| {
            (p.magnitude, spectrum.frequency.get(p.index).copied().unwrap_or(0.0))
        })
}

//! Per-axis analysis: unit spectra and the full axis report

use std::f64::consts::PI;

use chrono::Utc;

use super::{
    adc_buffer_to_g, adc_buffer_to_mm_per_sec_squared, apply_hann_window, axis_top_peak_metrics,
    compute_spectrum, find_top_peaks, frequency_resolution, get_vibration_level,
};
use crate::types::{
    AcquisitionConfig, Axis, AxisReport, AxisStats, DisplayUnit, SpectrumResult, ThresholdConfig,
};

/// Inputs for one axis analysis.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisRequest<'a> {
    pub axis: Axis,
    pub samples: &'a [i32],
    pub acquisition: AcquisitionConfig,
    /// Sensor-specific bands; `None` uses the system defaults
    pub thresholds: Option<ThresholdConfig>,
    pub unit: DisplayUnit,
    pub max_peaks: usize,
}

/// Spectrum of an ADC buffer in the requested display unit.
///
/// - `AccelerationG`: g, no window
/// - `AccelerationMmS2`: mm/s², Hann window
/// - `Velocity`: the windowed mm/s² spectrum divided by `2π·i·Δf` per bin,
///   giving mm/s; the DC bin is set to 0
///
/// The velocity spectrum here is derived analytically and is independent of
/// the time-domain integration used for [`axis_top_peak_metrics`].
pub fn compute_unit_spectrum(
    samples: &[i32],
    acquisition: &AcquisitionConfig,
    unit: DisplayUnit,
) -> SpectrumResult {
    let scale = acquisition.scale();
    let fmax = acquisition.fmax;

    let data = match unit {
        DisplayUnit::AccelerationG => adc_buffer_to_g(samples, scale),
        DisplayUnit::AccelerationMmS2 | DisplayUnit::Velocity => {
            adc_buffer_to_mm_per_sec_squared(samples, scale)
        }
    };
    let mut spectrum = if unit.windowed() {
        compute_spectrum(&apply_hann_window(&data), fmax)
    } else {
        compute_spectrum(&data, fmax)
    };

    if unit == DisplayUnit::Velocity {
        let delta_f = frequency_resolution(fmax);
        for (i, m) in spectrum.magnitude.iter_mut().enumerate() {
            *m = if i == 0 {
                0.0
            } else {
                *m / (2.0 * PI * i as f64 * delta_f)
            };
        }
    }
    spectrum
}

/// Analyse one axis buffer: stats, severity and top peaks.
///
/// Severity is classified from the velocity top peak. Peaks are searched in
/// the DC-stripped unit spectrum, so `PeakRecord::index` refers to that
/// stripped sequence.
pub fn analyze_axis(request: &AnalysisRequest<'_>) -> AxisReport {
    let samples = request.samples;
    let dt = request.acquisition.sample_interval(samples.len());

    let metrics = axis_top_peak_metrics(
        samples,
        dt,
        request.acquisition.g_scale,
        request.acquisition.fmax,
    );
    let level = get_vibration_level(metrics.velocity_top_peak, request.thresholds.as_ref());

    let spectrum = compute_unit_spectrum(samples, &request.acquisition, request.unit).without_dc();
    let peaks = find_top_peaks(&spectrum.magnitude, &spectrum.frequency, request.max_peaks);

    tracing::debug!(
        axis = %request.axis,
        samples = samples.len(),
        unit = %request.unit,
        level = %level,
        velocity_top_peak = metrics.velocity_top_peak,
        dominant_frequency = metrics.dominant_frequency,
        peaks = peaks.len(),
        "Axis analysed"
    );

    AxisReport {
        axis: request.axis,
        sample_count: samples.len(),
        metrics,
        stats: AxisStats::from(&metrics),
        level,
        unit: request.unit,
        peaks,
        analyzed_at: Utc::now(),
    }
}

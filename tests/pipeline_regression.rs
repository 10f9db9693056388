//! Pipeline Regression Tests
//!
//! Exercises the full per-axis pipeline (ADC conversion, integration, FFT,
//! peak search, severity) through the public API with synthetic buffers
//! whose answers are known analytically.

use std::f64::consts::PI;

use vibration_monitor::processing::{
    acceleration_to_velocity, adc_buffer_to_mm_per_sec_squared, analyze_axis,
    axis_top_peak_metrics, get_axis_top_peak_stats, AnalysisRequest,
};
use vibration_monitor::types::{
    AcquisitionConfig, Axis, AxisStats, DisplayUnit, GScale, ThresholdConfig, VibrationLevel,
};
use vibration_monitor::{AcquisitionRecord, AnalysisCache};

/// fs = n_span / span = 4096 Hz and 1 Hz bins once padded to 4096.
fn one_hz_acquisition() -> AcquisitionConfig {
    AcquisitionConfig {
        fmax: 4096.0,
        lor: 3200,
        g_scale: 2,
        time_interval: 60,
    }
}

/// `n` ADC samples of a cosine at `freq` Hz sampled at 4096 Hz.
fn cosine_adc(n: usize, freq: f64, amplitude: f64) -> Vec<i32> {
    (0..n)
        .map(|i| (amplitude * (2.0 * PI * freq * i as f64 / 4096.0).cos()).round() as i32)
        .collect()
}

fn parse(label: &str) -> f64 {
    label.parse().unwrap()
}

// ============================================================================
// Zero Buffer
// ============================================================================

#[test]
fn zero_buffer_reports_zero_stats() {
    let acquisition = AcquisitionConfig {
        fmax: 10_000.0,
        lor: 6400,
        g_scale: 16,
        time_interval: 60,
    };
    let samples = vec![0i32; 1600];
    let dt = acquisition.sample_interval(samples.len());

    let stats = get_axis_top_peak_stats(&samples, dt, acquisition.g_scale, acquisition.fmax);
    assert_eq!(stats.accel_top_peak, "0.00");
    assert_eq!(stats.velocity_top_peak, "0.00");
    assert_eq!(stats.dominant_freq, "0.00");
    assert_eq!(stats.rms, "0.000");
    assert_eq!(stats.peak_to_peak, "0.000");
}

#[test]
fn zero_buffer_report_is_normal_without_peaks() {
    let samples = vec![0i32; 1600];
    let report = analyze_axis(&AnalysisRequest {
        axis: Axis::V,
        samples: &samples,
        acquisition: AcquisitionConfig {
            fmax: 10_000.0,
            lor: 6400,
            g_scale: 16,
            time_interval: 60,
        },
        thresholds: None,
        unit: DisplayUnit::Velocity,
        max_peaks: 5,
    });

    assert_eq!(report.level, VibrationLevel::Normal);
    assert_eq!(report.sample_count, 1600);
    // A flat spectrum has no strict local maxima
    assert!(report.peaks.is_empty());
    assert!(report.metrics.rms.is_finite());
}

#[test]
fn empty_buffer_returns_sentinel() {
    let stats = get_axis_top_peak_stats(&[], 0.0, 2, 1000.0);
    assert_eq!(stats, AxisStats::zero());
}

// ============================================================================
// Single Tone
// ============================================================================

#[test]
fn cosine_dominant_frequency_within_one_bin() {
    let acquisition = one_hz_acquisition();
    let samples = cosine_adc(3201, 100.0, 8000.0);
    let dt = acquisition.sample_interval(samples.len());
    assert!((dt - 1.0 / 4096.0).abs() < 1e-15);

    let metrics = axis_top_peak_metrics(&samples, dt, acquisition.g_scale, acquisition.fmax);
    assert!(
        (metrics.dominant_frequency - 100.0).abs() <= 1.0,
        "dominant frequency {} should be within one bin of 100 Hz",
        metrics.dominant_frequency
    );

    // Spectrum magnitude of a bin-centred tone is 1.28 × amplitude
    let accel_amplitude = 8000.0 / GScale::G2.sensitivity() * 9806.65;
    let expected = 1.28 * accel_amplitude;
    assert!(
        (metrics.accel_top_peak - expected).abs() / expected < 0.05,
        "accel_top_peak {} vs expected {expected}",
        metrics.accel_top_peak
    );
    assert_eq!(metrics.peak, metrics.rms);
    assert!((metrics.peak_to_peak - 2.0 * metrics.rms).abs() < 1e-12);
}

#[test]
fn cosine_report_classifies_and_ranks_peaks() {
    let samples = cosine_adc(3201, 100.0, 8000.0);
    let request = AnalysisRequest {
        axis: Axis::H,
        samples: &samples,
        acquisition: one_hz_acquisition(),
        thresholds: None,
        unit: DisplayUnit::Velocity,
        max_peaks: 3,
    };
    let report = analyze_axis(&request);

    // ~7.6 mm/s amplitude reads ~9.7 on the spectral scale, above the 7.1 default
    assert_eq!(report.level, VibrationLevel::Critical);
    let top = report.peaks.first().unwrap();
    assert!((parse(&top.frequency) - 100.0).abs() <= 1.0);
    assert!(report.peaks.len() <= 3);
    for pair in report.peaks.peaks.windows(2) {
        assert!(pair[0].magnitude >= pair[1].magnitude);
    }

    // Relaxed bands for the same buffer
    let relaxed = analyze_axis(&AnalysisRequest {
        thresholds: Some(ThresholdConfig::new(1000.0, None, 2000.0)),
        ..request
    });
    assert_eq!(relaxed.level, VibrationLevel::Normal);
}

#[test]
fn raw_g_spectrum_peaks_at_tone() {
    // 3201 samples keep the mirror image (4032 Hz) outside the reported bins
    let samples = cosine_adc(3201, 64.0, 4096.0);
    let report = analyze_axis(&AnalysisRequest {
        axis: Axis::A,
        samples: &samples,
        acquisition: one_hz_acquisition(),
        thresholds: None,
        unit: DisplayUnit::AccelerationG,
        max_peaks: 1,
    });
    let top = report.peaks.first().unwrap();
    assert_eq!(top.frequency, "64.00");
    // 0.25 g amplitude on the 1.28 spectral scale
    assert!((top.magnitude - 0.32).abs() < 0.01);
}

// ============================================================================
// Integration Round Trip
// ============================================================================

#[test]
fn integration_round_trip_recovers_acceleration() {
    let dt = 1.0 / 4096.0;
    let samples = cosine_adc(512, 50.0, 2000.0);
    let accel = adc_buffer_to_mm_per_sec_squared(&samples, GScale::G4);
    let velocity = acceleration_to_velocity(&accel, dt);

    assert_eq!(velocity.len(), accel.len());
    assert_eq!(velocity[0], 0.0);

    // Forward difference of the trapezoid sum is the midpoint acceleration
    for i in 0..velocity.len() - 1 {
        let derivative = (velocity[i + 1] - velocity[i]) / dt;
        let midpoint = 0.5 * (accel[i] + accel[i + 1]);
        assert!(
            (derivative - midpoint).abs() <= 1e-6 * accel[0].abs().max(1.0),
            "sample {i}: {derivative} vs {midpoint}"
        );
    }
}

// ============================================================================
// Record → Cache → Report
// ============================================================================

#[test]
fn record_file_through_cache() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("acquisition.json");

    let record = AcquisitionRecord {
        sensor_id: Some("VS-0042".to_string()),
        acquisition: Some(one_hz_acquisition()),
        h: cosine_adc(3201, 100.0, 8000.0),
        v: vec![0; 3201],
        a: Vec::new(),
    };
    std::fs::write(&path, serde_json::to_string(&record).unwrap()).unwrap();

    let loaded = AcquisitionRecord::load_from_file(&path).unwrap();
    assert_eq!(loaded, record);

    let acquisition = loaded.acquisition_or(AcquisitionConfig::default());
    let mut cache = AnalysisCache::new(8);
    let reports: Vec<_> = Axis::ALL
        .iter()
        .map(|&axis| {
            cache.get_or_compute(&AnalysisRequest {
                axis,
                samples: loaded.axis(axis),
                acquisition,
                thresholds: None,
                unit: DisplayUnit::Velocity,
                max_peaks: 5,
            })
        })
        .collect();

    assert_eq!(reports[0].level, VibrationLevel::Critical);
    assert_eq!(reports[1].level, VibrationLevel::Normal);
    assert_eq!(reports[2].stats, AxisStats::zero());
    assert_eq!(cache.len(), 3);

    // Serialized report uses the dashboard field names
    let json = serde_json::to_value(&reports[0]).unwrap();
    assert!(json["stats"]["dominantFreq"].is_string());
    assert!(json["stats"]["velocityTopPeak"].is_string());
}

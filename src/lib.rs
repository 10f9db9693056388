//! Vibration Monitor: signal-processing core for tri-axial accelerometers
//!
//! Turns raw ADC buffers into calibrated velocity statistics, spectra,
//! spectral peaks and a severity level per axis.
//!
//! ## Architecture
//!
//! - **Processing**: conversion, integration, windowing, FFT, peaks, stats, severity
//! - **Cache**: bounded memoization of axis analyses
//! - **Refresh**: explicit channel for re-analysis requests and file watching
//! - **Acquisition**: JSON acquisition records as delivered upstream
//! - **Config**: TOML acquisition defaults, thresholds and tuning

pub mod acquisition;
pub mod cache;
pub mod config;
pub mod processing;
pub mod refresh;
pub mod types;

// Re-export configuration
pub use config::MonitorConfig;

// Re-export commonly used types
pub use types::{
    AcquisitionConfig, Axis, AxisMetrics, AxisReport, AxisStats, DisplayUnit, GScale, PeakRecord,
    SpectrumResult, ThresholdConfig, TopPeaks, VibrationLevel,
};

// Re-export the pipeline entry points
pub use processing::{
    analyze_axis, compute_spectrum, compute_unit_spectrum, get_axis_top_peak_stats,
    get_vibration_level, AnalysisRequest, ProcessingError,
};

pub use acquisition::{AcquisitionError, AcquisitionRecord};
pub use cache::AnalysisCache;
pub use refresh::{
    refresh_channel, run_buffer_watcher, spawn_line_trigger, RefreshEvent, RefreshTrigger,
};

//! System-wide default constants.
//!
//! Values used when no `monitor_config.toml` is present or a key is omitted.
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Severity Thresholds
// ============================================================================

/// Velocity below this is normal (mm/s). ISO 10816-3 zone A/B boundary.
pub const THRESHOLD_MIN_MM_S: f64 = 2.8;

/// Velocity at or above this is critical (mm/s). ISO 10816-3 zone B/C boundary.
pub const THRESHOLD_MAX_MM_S: f64 = 7.1;

// ============================================================================
// Acquisition
// ============================================================================

/// Default maximum analysis frequency (Hz).
pub const ACQUISITION_FMAX_HZ: f64 = 1000.0;

/// Default lines of resolution.
pub const ACQUISITION_LOR: u32 = 1600;

/// Default full-scale range (g).
pub const ACQUISITION_G_SCALE: u32 = 2;

/// Default reporting cadence (seconds).
pub const ACQUISITION_TIME_INTERVAL_SECS: u64 = 60;

/// Maximum analysis frequency above which a config value is flagged as suspicious (Hz).
pub const ACQUISITION_FMAX_SUSPICIOUS_HZ: f64 = 100_000.0;

// ============================================================================
// Analysis
// ============================================================================

/// Number of spectral peaks reported per axis.
pub const ANALYSIS_MAX_PEAKS: usize = 5;

/// Analysis cache capacity (entries). 0 disables caching.
pub const ANALYSIS_CACHE_CAPACITY: usize = 64;

// ============================================================================
// Watch Mode
// ============================================================================

/// Interval between acquisition-file mtime checks (ms).
pub const WATCH_POLL_INTERVAL_MS: u64 = 2_000;

/// Debounce after a detected change, for editors and uploaders that write in stages (ms).
pub const WATCH_DEBOUNCE_MS: u64 = 500;

/// Capacity of the refresh request channel.
pub const REFRESH_CHANNEL_CAPACITY: usize = 16;

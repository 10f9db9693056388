//! Monitor Configuration Module
//!
//! Acquisition defaults, severity thresholds (system-wide and per sensor)
//! and analysis tuning, loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `VIBRATION_CONFIG` environment variable (path to TOML file)
//! 2. `monitor_config.toml` in the current working directory
//! 3. Built-in defaults (`config::defaults`)
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::get()` anywhere:
//!
//! ```ignore
//! // In main():
//! config::init(MonitorConfig::load());
//!
//! // Anywhere in the codebase:
//! let bands = config::get().thresholds.for_sensor(Some("VS-0042"));
//! ```

mod monitor_config;
pub mod defaults;
pub mod validation;

pub use monitor_config::*;

use std::sync::OnceLock;

/// Global monitor configuration, initialized once at startup.
static MONITOR_CONFIG: OnceLock<MonitorConfig> = OnceLock::new();

/// Initialize the global monitor configuration.
///
/// Later calls are ignored with a warning.
pub fn init(config: MonitorConfig) {
    if MONITOR_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once — ignoring");
    }
}

/// Get a reference to the global monitor configuration.
///
/// Falls back to built-in defaults if `init()` has not been called.
pub fn get() -> &'static MonitorConfig {
    MONITOR_CONFIG.get_or_init(MonitorConfig::default)
}

//! Monitor Configuration - acquisition defaults, severity bands and analysis tuning
//!
//! Every section implements `Default` with the values in `config::defaults`,
//! so an empty or missing config file behaves exactly like the built-ins.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;
use crate::types::{AcquisitionConfig, DisplayUnit, ThresholdConfig};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "VIBRATION_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "monitor_config.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `MonitorConfig::load()` which searches:
/// 1. `$VIBRATION_CONFIG` env var
/// 2. `./monitor_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonitorConfig {
    /// Acquisition parameters used when a record does not carry its own
    #[serde(default)]
    pub acquisition: AcquisitionConfig,

    /// Severity bands, system-wide and per sensor
    #[serde(default)]
    pub thresholds: ThresholdSettings,

    /// Spectrum and peak reporting
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Watch-mode polling
    #[serde(default)]
    pub watch: WatchConfig,
}

impl MonitorConfig {
    /// Load configuration using the standard search order:
    /// 1. `$VIBRATION_CONFIG` environment variable
    /// 2. `./monitor_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded monitor config from {CONFIG_ENV_VAR}");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {CONFIG_ENV_VAR}, falling back");
                    }
                }
            } else {
                warn!(path = %path, "{CONFIG_ENV_VAR} points to non-existent file, falling back");
            }
        }

        // 2. Check ./monitor_config.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded monitor config from ./{LOCAL_CONFIG_FILE}");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{LOCAL_CONFIG_FILE}, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No {LOCAL_CONFIG_FILE} found — using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys and suspicious values are logged as warnings; impossible
    /// values are returned as [`ConfigError::Validation`].
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        // Two-pass: check for unknown keys first (warnings only)
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Run range validation, logging warnings and failing on errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_physical_ranges(self);
        for w in &warnings {
            warn!(field = %w.field, "{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Serialize back to TOML, e.g. to print the effective configuration.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ============================================================================
// Thresholds
// ============================================================================

/// System-wide severity bands plus per-sensor overrides.
///
/// ```toml
/// [thresholds]
/// min = 2.8
/// max = 7.1
///
/// [thresholds.sensors.VS-0042]
/// min = 1.8
/// medium = 3.0
/// max = 4.5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThresholdSettings {
    /// Lower limit of the warning band (mm/s)
    pub min: f64,
    /// Lower limit of the concern band (mm/s); midpoint of min/max when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<f64>,
    /// Lower limit of the critical band (mm/s)
    pub max: f64,
    /// Sensor-specific bands keyed by sensor id
    pub sensors: BTreeMap<String, ThresholdConfig>,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            min: defaults::THRESHOLD_MIN_MM_S,
            medium: None,
            max: defaults::THRESHOLD_MAX_MM_S,
            sensors: BTreeMap::new(),
        }
    }
}

impl ThresholdSettings {
    /// System-wide bands.
    pub const fn system(&self) -> ThresholdConfig {
        ThresholdConfig::new(self.min, self.medium, self.max)
    }

    /// Bands for `sensor_id`, falling back to the system-wide bands.
    pub fn for_sensor(&self, sensor_id: Option<&str>) -> ThresholdConfig {
        sensor_id
            .and_then(|id| self.sensors.get(id))
            .copied()
            .unwrap_or_else(|| self.system())
    }
}

// ============================================================================
// Analysis
// ============================================================================

/// Spectrum and peak reporting settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Peaks reported per axis
    pub max_peaks: usize,
    /// Unit branch for the reported spectrum and peaks
    pub display_unit: DisplayUnit,
    /// Analysis cache entries, 0 disables caching
    pub cache_capacity: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_peaks: defaults::ANALYSIS_MAX_PEAKS,
            display_unit: DisplayUnit::default(),
            cache_capacity: defaults::ANALYSIS_CACHE_CAPACITY,
        }
    }
}

// ============================================================================
// Watch Mode
// ============================================================================

/// Polling settings for the acquisition-file watcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WatchConfig {
    pub poll_interval_ms: u64,
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: defaults::WATCH_POLL_INTERVAL_MS,
            debounce_ms: defaults::WATCH_DEBOUNCE_MS,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

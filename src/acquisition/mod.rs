//! Acquisition input
//!
//! Loads one acquisition event (per-axis ADC buffers plus the scalar
//! parameters they were captured with) from the JSON document delivered by
//! the REST layer.
//!
//! ```json
//! {
//!   "sensor_id": "VS-0042",
//!   "acquisition": { "fmax": 10000.0, "lor": 6400, "g_scale": 16 },
//!   "h": [12, -8, 31],
//!   "v": [4, 2, -1],
//!   "a": [0, 0, 1]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{AcquisitionConfig, Axis};

/// Errors raised while loading an acquisition record.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("Acquisition I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Acquisition parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] serde_json::Error),
}

/// One acquisition event: optional sensor id, parameters and three axis buffers.
///
/// Missing axes deserialize as empty buffers, which analyse to the zero
/// sentinel rather than failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AcquisitionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_id: Option<String>,

    /// Parameters the buffers were captured with; `None` uses the configured defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquisition: Option<AcquisitionConfig>,

    #[serde(default, alias = "H")]
    pub h: Vec<i32>,
    #[serde(default, alias = "V")]
    pub v: Vec<i32>,
    #[serde(default, alias = "A")]
    pub a: Vec<i32>,
}

impl AcquisitionRecord {
    /// Read and parse a JSON acquisition file.
    pub fn load_from_file(path: &Path) -> Result<Self, AcquisitionError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AcquisitionError::Io(path.to_path_buf(), e))?;
        let record = Self::from_json_str(&contents)
            .map_err(|e| AcquisitionError::Parse(path.to_path_buf(), e))?;

        tracing::debug!(
            path = %path.display(),
            sensor = record.sensor_id.as_deref().unwrap_or("-"),
            h = record.h.len(),
            v = record.v.len(),
            a = record.a.len(),
            "Acquisition record loaded"
        );
        Ok(record)
    }

    /// Parse a JSON acquisition document.
    pub fn from_json_str(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Buffer for `axis`.
    pub fn axis(&self, axis: Axis) -> &[i32] {
        match axis {
            Axis::H => &self.h,
            Axis::V => &self.v,
            Axis::A => &self.a,
        }
    }

    /// Record parameters, or `fallback` when the record carries none.
    pub fn acquisition_or(&self, fallback: AcquisitionConfig) -> AcquisitionConfig {
        self.acquisition.unwrap_or(fallback)
    }
}

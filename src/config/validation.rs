//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use crate::types::GScale;

/// Prefix of the per-sensor threshold tables, whose keys are sensor ids.
const SENSOR_THRESHOLDS_PREFIX: &str = "thresholds.sensors.";

/// Fields allowed inside a `[thresholds.sensors.<id>]` table.
const SENSOR_THRESHOLD_FIELDS: [&str; 3] = ["min", "medium", "max"];

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " — did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the set of valid dotted key paths for MonitorConfig.
///
/// Maintained manually to match the struct hierarchy in monitor_config.rs.
/// Per-sensor tables under `thresholds.sensors` are checked separately.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [acquisition]
        "acquisition",
        "acquisition.fmax",
        "acquisition.lor",
        "acquisition.g_scale",
        "acquisition.time_interval",
        // [thresholds]
        "thresholds",
        "thresholds.min",
        "thresholds.medium",
        "thresholds.max",
        "thresholds.sensors",
        // [analysis]
        "analysis",
        "analysis.max_peaks",
        "analysis.display_unit",
        "analysis.cache_capacity",
        // [watch]
        "watch",
        "watch.poll_interval_ms",
        "watch.debounce_ms",
    ];
    keys.iter().copied().collect()
}

/// Recursively walk a TOML value tree and collect all dotted key paths.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist > 3 {
            continue;
        }
        // Ties resolve alphabetically so suggestions are deterministic.
        let better = match best {
            None => true,
            Some((best_key, best_dist)) => dist < best_dist || (dist == best_dist && k < best_key),
        };
        if better {
            best = Some((k, dist));
        }
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys — it only warns. Existing configs
/// always continue to work.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    let found = walk_toml_keys(&value, "");
    let mut warnings = Vec::new();

    for key in &found {
        if let Some(rest) = key.strip_prefix(SENSOR_THRESHOLDS_PREFIX) {
            if let Some(w) = check_sensor_key(key, rest) {
                warnings.push(w);
            }
            continue;
        }

        if !known.contains(key.as_str()) {
            let suggestion = suggest_correction(key, &known);
            let message = format!("Unknown config key '{key}'");
            warnings.push(ValidationWarning {
                field: key.clone(),
                message,
                suggestion,
            });
        }
    }

    warnings
}

/// Check a key below `thresholds.sensors.`; `rest` is the part after the prefix.
///
/// The first segment is a sensor id and is always accepted.
fn check_sensor_key(key: &str, rest: &str) -> Option<ValidationWarning> {
    let (sensor_id, field) = rest.rsplit_once('.')?;
    if SENSOR_THRESHOLD_FIELDS.contains(&field) {
        return None;
    }

    let fields: HashSet<&str> = SENSOR_THRESHOLD_FIELDS.iter().copied().collect();
    let suggestion = suggest_correction(field, &fields)
        .map(|f| format!("{SENSOR_THRESHOLDS_PREFIX}{sensor_id}.{f}"));
    Some(ValidationWarning {
        field: key.to_string(),
        message: format!("Unknown config key '{key}'"),
        suggestion,
    })
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on a parsed MonitorConfig.
///
/// Returns (errors, warnings) — errors are impossible values that must
/// prevent startup; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(
    config: &super::MonitorConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let acq = &config.acquisition;

    // fmax: divisor of the time span, must be positive
    if !acq.fmax.is_finite() || acq.fmax <= 0.0 {
        errors.push(format!(
            "acquisition.fmax = {} must be a positive number of Hz",
            acq.fmax
        ));
    } else if acq.fmax > super::defaults::ACQUISITION_FMAX_SUSPICIOUS_HZ {
        warnings.push(ValidationWarning {
            field: "acquisition.fmax".to_string(),
            message: format!(
                "acquisition.fmax = {:.0} Hz is above the typical accelerometer range",
                acq.fmax
            ),
            suggestion: None,
        });
    }

    if acq.lor == 0 {
        errors.push("acquisition.lor must be > 0".to_string());
    }

    // Unsupported ranges degrade to ±2 g at analysis time
    if !GScale::is_supported(acq.g_scale) {
        warnings.push(ValidationWarning {
            field: "acquisition.g_scale".to_string(),
            message: format!(
                "acquisition.g_scale = {} is not one of 2/4/8/16; ±2 g sensitivity will be used",
                acq.g_scale
            ),
            suggestion: None,
        });
    }

    check_bands(
        "thresholds",
        config.thresholds.min,
        config.thresholds.medium,
        config.thresholds.max,
        &mut errors,
        &mut warnings,
    );
    for (sensor_id, t) in &config.thresholds.sensors {
        check_bands(
            &format!("thresholds.sensors.{sensor_id}"),
            t.min,
            t.medium,
            t.max,
            &mut errors,
            &mut warnings,
        );
    }

    if config.analysis.max_peaks == 0 {
        warnings.push(ValidationWarning {
            field: "analysis.max_peaks".to_string(),
            message: "analysis.max_peaks = 0 reports no spectral peaks".to_string(),
            suggestion: None,
        });
    }

    if config.watch.poll_interval_ms == 0 {
        errors.push("watch.poll_interval_ms must be > 0".to_string());
    }

    (errors, warnings)
}

/// Thresholds must be finite; out-of-order bands only warn, since the
/// classifier accepts any ordering.
fn check_bands(
    name: &str,
    min: f64,
    medium: Option<f64>,
    max: f64,
    errors: &mut Vec<String>,
    warnings: &mut Vec<ValidationWarning>,
) {
    // NaN/Inf comparisons silently pass — catch them explicitly
    let medium_finite = medium.map_or(true, f64::is_finite);
    if !min.is_finite() || !max.is_finite() || !medium_finite {
        errors.push(format!(
            "{name}: values must be finite (got min={min}, medium={medium:?}, max={max})"
        ));
        return;
    }

    let mid = medium.unwrap_or((min + max) / 2.0);
    if min > mid || mid > max {
        warnings.push(ValidationWarning {
            field: name.to_string(),
            message: format!(
                "{name}: bands are not ascending (min={min:.3}, medium={mid:.3}, max={max:.3})"
            ),
            suggestion: None,
        });
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("max_peeks", "max_peaks"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [thresholds]
            min = 2.0
            [thresholds.sensors.S1]
            max = 4.0
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"thresholds".to_string()));
        assert!(keys.contains(&"thresholds.min".to_string()));
        assert!(keys.contains(&"thresholds.sensors.S1".to_string()));
        assert!(keys.contains(&"thresholds.sensors.S1.max".to_string()));
    }

    #[test]
    fn test_all_known_keys_resolve_to_themselves() {
        let known = known_config_keys();
        for key in &known {
            assert_eq!(suggest_correction(key, &known).as_deref(), Some(*key));
        }
    }

    #[test]
    fn test_sensor_field_typo() {
        let warnings = validate_unknown_keys("[thresholds.sensors.S1]\nmaxx = 4.0\n");
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("thresholds.sensors.S1.max")
        );
    }

    #[test]
    fn test_sensor_tables_accepted() {
        let raw = "[thresholds.sensors.S1]\nmin = 1.0\nmedium = 2.0\nmax = 3.0\n";
        assert!(validate_unknown_keys(raw).is_empty());
    }

    #[test]
    fn test_inverted_bands_warn_only() {
        let mut config = super::super::MonitorConfig::default();
        config.thresholds.min = 8.0;
        config.thresholds.max = 2.0;
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.is_empty());
        assert!(warnings.iter().any(|w| w.field == "thresholds"));
    }
}

//! vibration-monitor - batch vibration analysis from the command line
//!
//! # Usage
//!
//! ```bash
//! # Analyse every axis of an acquisition and print the reports as JSON
//! vibration-monitor analyze --input acquisition.json
//!
//! # Raw-g spectrum of the horizontal axis
//! vibration-monitor spectrum --input acquisition.json --axis H --unit g
//!
//! # Re-analyse whenever the file changes (press Enter to refresh manually)
//! vibration-monitor watch --input acquisition.json
//!
//! # Validate a config file
//! vibration-monitor check-config --config monitor_config.toml
//! ```
//!
//! # Environment Variables
//!
//! - `VIBRATION_CONFIG`: Path to the monitor config TOML
//! - `RUST_LOG`: Logging level (default: info)
//! - `VIBRATION_LOG_JSON`: Set to "true" for JSON log lines on stderr

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use vibration_monitor::config::{self, defaults, MonitorConfig};
use vibration_monitor::processing::{compute_unit_spectrum, AnalysisRequest};
use vibration_monitor::refresh::{
    refresh_channel, run_buffer_watcher, spawn_line_trigger, RefreshEvent,
};
use vibration_monitor::types::{AcquisitionConfig, Axis, AxisReport, DisplayUnit, SpectrumResult};
use vibration_monitor::{AcquisitionRecord, AnalysisCache};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "vibration-monitor")]
#[command(about = "Vibration signal analysis for tri-axial accelerometers")]
#[command(version)]
struct CliArgs {
    /// Path to monitor config TOML (default: $VIBRATION_CONFIG, then ./monitor_config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the record's maximum analysis frequency (Hz)
    #[arg(long, global = true)]
    fmax: Option<f64>,

    /// Override the record's lines of resolution
    #[arg(long, global = true)]
    lor: Option<u32>,

    /// Override the record's full-scale range (2/4/8/16 g)
    #[arg(long, global = true)]
    g_scale: Option<u32>,

    /// Emit logs as JSON lines (for log shippers)
    #[arg(long, global = true, env = "VIBRATION_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Analyse axes of an acquisition record and print the reports as JSON
    Analyze {
        /// Acquisition record (JSON)
        #[arg(long)]
        input: PathBuf,
        /// Axis to analyse: H, V, A or all
        #[arg(long, default_value = "all")]
        axis: AxisSelection,
        /// Spectrum unit for peaks: g, mms2 or velocity (default: from config)
        #[arg(long)]
        unit: Option<DisplayUnit>,
        /// Number of spectral peaks per axis (default: from config)
        #[arg(long)]
        peaks: Option<usize>,
        /// Sensor id for threshold lookup (default: the record's sensor_id)
        #[arg(long)]
        sensor: Option<String>,
    },

    /// Print the magnitude spectrum of one axis as JSON
    Spectrum {
        /// Acquisition record (JSON)
        #[arg(long)]
        input: PathBuf,
        /// Axis: H, V or A
        #[arg(long)]
        axis: Axis,
        /// Spectrum unit: g, mms2 or velocity (default: from config)
        #[arg(long)]
        unit: Option<DisplayUnit>,
    },

    /// Re-analyse an acquisition record whenever it changes
    Watch {
        /// Acquisition record (JSON)
        #[arg(long)]
        input: PathBuf,
        /// Sensor id for threshold lookup (default: the record's sensor_id)
        #[arg(long)]
        sensor: Option<String>,
    },

    /// Validate a config file and print the effective configuration
    CheckConfig,
}

/// `--axis` value: a single axis or all three.
#[derive(Debug, Clone)]
struct AxisSelection(Vec<Axis>);

impl std::str::FromStr for AxisSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self(Axis::ALL.to_vec()));
        }
        s.parse::<Axis>().map(|axis| Self(vec![axis]))
    }
}

/// Command-line overrides of the acquisition parameters.
#[derive(Debug, Clone, Copy)]
struct AcquisitionOverrides {
    fmax: Option<f64>,
    lor: Option<u32>,
    g_scale: Option<u32>,
}

impl AcquisitionOverrides {
    fn apply(self, mut acquisition: AcquisitionConfig) -> AcquisitionConfig {
        if let Some(fmax) = self.fmax {
            acquisition.fmax = fmax;
        }
        if let Some(lor) = self.lor {
            acquisition.lor = lor;
        }
        if let Some(g_scale) = self.g_scale {
            acquisition.g_scale = g_scale;
        }
        acquisition
    }
}

/// JSON document printed by `analyze` and `watch`.
#[derive(Debug, Serialize)]
struct AnalysisOutput<'a> {
    sensor_id: Option<&'a str>,
    acquisition: AcquisitionConfig,
    reports: Vec<AxisReport>,
}

#[derive(Debug, Serialize)]
struct SpectrumOutput<'a> {
    sensor_id: Option<&'a str>,
    axis: Axis,
    unit: DisplayUnit,
    acquisition: AcquisitionConfig,
    spectrum: SpectrumResult,
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Initialize logging on stderr so stdout carries only JSON
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if args.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let overrides = AcquisitionOverrides {
        fmax: args.fmax,
        lor: args.lor,
        g_scale: args.g_scale,
    };

    if matches!(args.command, SubCommand::CheckConfig) {
        return check_config(args.config.as_deref());
    }

    let monitor_config = match args.config.as_deref() {
        Some(path) => MonitorConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => MonitorConfig::load(),
    };
    config::init(monitor_config);

    match args.command {
        SubCommand::Analyze {
            input,
            axis,
            unit,
            peaks,
            sensor,
        } => {
            let record = load_record(&input)?;
            let unit = unit.unwrap_or(config::get().analysis.display_unit);
            let max_peaks = peaks.unwrap_or(config::get().analysis.max_peaks);
            let mut cache = AnalysisCache::new(config::get().analysis.cache_capacity);
            let output = analyze_record(
                &record,
                &axis.0,
                overrides,
                unit,
                max_peaks,
                sensor.as_deref(),
                &mut cache,
            );
            print_json(&output)
        }
        SubCommand::Spectrum { input, axis, unit } => {
            let record = load_record(&input)?;
            let acquisition = overrides.apply(record.acquisition_or(config::get().acquisition));
            let unit = unit.unwrap_or(config::get().analysis.display_unit);
            let spectrum = compute_unit_spectrum(record.axis(axis), &acquisition, unit);
            info!(axis = %axis, bins = spectrum.len(), unit = %unit, "Spectrum computed");
            print_json(&SpectrumOutput {
                sensor_id: record.sensor_id.as_deref(),
                axis,
                unit,
                acquisition,
                spectrum,
            })
        }
        SubCommand::Watch { input, sensor } => watch(input, overrides, sensor).await,
        SubCommand::CheckConfig => Ok(()),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn load_record(path: &Path) -> Result<AcquisitionRecord> {
    AcquisitionRecord::load_from_file(path)
        .with_context(|| format!("Failed to load acquisition record {}", path.display()))
}

/// Analyse `axes` of `record` through the cache.
fn analyze_record<'a>(
    record: &'a AcquisitionRecord,
    axes: &[Axis],
    overrides: AcquisitionOverrides,
    unit: DisplayUnit,
    max_peaks: usize,
    sensor: Option<&'a str>,
    cache: &mut AnalysisCache,
) -> AnalysisOutput<'a> {
    let cfg = config::get();
    let acquisition = overrides.apply(record.acquisition_or(cfg.acquisition));
    let sensor_id = sensor.or(record.sensor_id.as_deref());
    let thresholds = cfg.thresholds.for_sensor(sensor_id);

    let reports = axes
        .iter()
        .map(|&axis| {
            cache.get_or_compute(&AnalysisRequest {
                axis,
                samples: record.axis(axis),
                acquisition,
                thresholds: Some(thresholds),
                unit,
                max_peaks,
            })
        })
        .collect::<Vec<_>>();

    for report in &reports {
        info!(
            sensor = sensor_id.unwrap_or("-"),
            axis = %report.axis,
            level = %report.level,
            velocity_top_peak = %report.stats.velocity_top_peak,
            dominant_freq = %report.stats.dominant_freq,
            "Axis analysed"
        );
    }

    AnalysisOutput {
        sensor_id,
        acquisition,
        reports,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{text}");
    Ok(())
}

fn check_config(path: Option<&Path>) -> Result<()> {
    let monitor_config = match path {
        Some(path) => MonitorConfig::load_from_file(path)
            .with_context(|| format!("Invalid config {}", path.display()))?,
        None => MonitorConfig::load(),
    };
    info!(
        sensors = monitor_config.thresholds.sensors.len(),
        "Config is valid"
    );
    println!("{}", monitor_config.to_toml_string()?);
    Ok(())
}

async fn watch(
    input: PathBuf,
    overrides: AcquisitionOverrides,
    sensor: Option<String>,
) -> Result<()> {
    let cfg = config::get();
    let mut cache = AnalysisCache::new(cfg.analysis.cache_capacity);

    let (trigger, mut rx) = refresh_channel(defaults::REFRESH_CHANNEL_CAPACITY);

    let watcher = tokio::spawn(run_buffer_watcher(
        input.clone(),
        cfg.watch.clone(),
        trigger.clone(),
    ));

    // Enter on stdin requests a manual refresh; the reader thread is left
    // detached so a pending read cannot delay exit
    spawn_line_trigger(std::io::BufReader::new(std::io::stdin()), trigger);

    info!(path = %input.display(), "Watching acquisition record (Ctrl+C to stop)");
    analyze_once(&input, overrides, sensor.as_deref(), &mut cache);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, stopping watch");
                break;
            }
            event = rx.recv() => {
                match event {
                    Some(RefreshEvent::Manual) => info!("Manual refresh requested"),
                    Some(RefreshEvent::BufferChanged(path)) => {
                        info!(path = %path.display(), "Acquisition record changed");
                    }
                    None => break,
                }
                analyze_once(&input, overrides, sensor.as_deref(), &mut cache);
            }
        }
    }

    watcher.abort();
    let (hits, misses) = cache.stats();
    info!(hits, misses, "Watch stopped");
    Ok(())
}

/// Reload and analyse the record; a bad file is reported and skipped.
fn analyze_once(
    input: &Path,
    overrides: AcquisitionOverrides,
    sensor: Option<&str>,
    cache: &mut AnalysisCache,
) {
    let record = match load_record(input) {
        Ok(record) => record,
        Err(e) => {
            warn!(error = %format!("{e:#}"), "Skipping refresh");
            return;
        }
    };

    let cfg = config::get();
    let output = analyze_record(
        &record,
        &Axis::ALL,
        overrides,
        cfg.analysis.display_unit,
        cfg.analysis.max_peaks,
        sensor,
        cache,
    );
    if let Err(e) = print_json(&output) {
        warn!(error = %e, "Failed to print analysis");
    }
}

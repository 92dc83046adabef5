//! Encode restart arrays for a case file and print them as JSON.
//!
//! The case file (JSON or TOML) holds the static case, the schedule and
//! optionally the simulator results for the step:
//!
//! ```text
//! [case.grid]     nx/ny/nz/active cells
//! [case.runspec]  phases, dimensions, switches
//! [schedule]      start date and per-step snapshots
//! [state]         optional well and connection results
//! ```
//!
//! Usage:
//!   rst-dump --case deck.json --report-step 3
//!   rst-dump --case deck.toml --report-step 3 --array IWEL
//!   rst-dump --case deck.json --all-steps --config rst_encoder.toml

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::info;

use rst_encoder::config::EncoderConfig;
use rst_encoder::restart::{encode_restart_step, encode_series, RestartArrays, RestartRequest};
use rst_encoder::types::{EclipseCase, Schedule, SimulationState};

/// Restart-file array encoder.
#[derive(Parser, Debug)]
#[command(name = "rst-dump")]
#[command(version)]
struct Args {
    /// Case file (.json or .toml)
    #[arg(long)]
    case: PathBuf,

    /// Report step to encode
    #[arg(long, default_value_t = 0, conflicts_with = "all_steps")]
    report_step: usize,

    /// Schedule step to read wells and groups from. Defaults to report step - 1.
    #[arg(long)]
    lookup_step: Option<usize>,

    /// Elapsed simulation time in days. Defaults to the schedule date.
    #[arg(long)]
    sim_days: Option<f64>,

    /// Encoder config file. Falls back to RST_ENCODER_CONFIG, then ./rst_encoder.toml.
    #[arg(long, env = "RST_ENCODER_CONFIG")]
    config: Option<PathBuf>,

    /// Print only this array (e.g. INTEHEAD, IWEL)
    #[arg(long)]
    array: Option<String>,

    /// Encode every report step of the schedule
    #[arg(long)]
    all_steps: bool,
}

#[derive(Debug, Deserialize)]
struct CaseFile {
    case: EclipseCase,
    schedule: Schedule,
    #[serde(default)]
    state: Option<SimulationState>,
}

fn load_case(path: &Path) -> Result<CaseFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read case file {}", path.display()))?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let case: CaseFile = if is_toml {
        toml::from_str(&text).with_context(|| format!("Invalid TOML case {}", path.display()))?
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid JSON case {}", path.display()))?
    };
    Ok(case)
}

fn select_array(arrays: &RestartArrays, name: &str) -> Result<serde_json::Value> {
    if !RestartArrays::is_known_array(name) {
        bail!(
            "Unknown array '{name}'; expected one of {}",
            RestartArrays::NAMES.join(", ")
        );
    }
    let mut value = serde_json::to_value(arrays)?;
    value
        .get_mut(name.to_ascii_lowercase())
        .map(serde_json::Value::take)
        .with_context(|| format!("Array '{name}' missing from encoded output"))
}

fn render(arrays: &RestartArrays, array: Option<&str>) -> Result<serde_json::Value> {
    match array {
        Some(name) => select_array(arrays, name),
        None => Ok(serde_json::to_value(arrays)?),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,rst_encoder=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EncoderConfig::load_from_file(path)
            .with_context(|| format!("Failed to load encoder config {}", path.display()))?,
        None => EncoderConfig::load(),
    };

    let input = load_case(&args.case)?;
    info!(
        case = %args.case.display(),
        steps = input.schedule.len(),
        version = %config.format.version,
        "Loaded case"
    );

    let output = if args.all_steps {
        let steps: Vec<_> = (0..input.schedule.len())
            .map(|n| (RestartRequest::for_report_step(n), input.state.as_ref()))
            .collect();
        let series = encode_series(&input.case, &input.schedule, &steps, &config)?;
        let rendered = series
            .iter()
            .map(|arrays| render(arrays, args.array.as_deref()))
            .collect::<Result<Vec<_>>>()?;
        serde_json::Value::Array(rendered)
    } else {
        let mut request = RestartRequest::for_report_step(args.report_step);
        if let Some(lookup) = args.lookup_step {
            request.lookup_step = lookup;
        }
        if let Some(days) = args.sim_days {
            request = request.with_sim_time(days * 86_400.0);
        }
        let arrays = encode_restart_step(
            &input.case,
            &input.schedule,
            input.state.as_ref(),
            &request,
            &config,
        )?;
        render(&arrays, args.array.as_deref())?
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

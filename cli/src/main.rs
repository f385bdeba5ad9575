//! formgate CLI - replays scripted contact-form sessions headlessly.
//!
//! ```text
//! formgate replay <scenario.json> [--config <config.toml>]
//! ```
//!
//! The report is printed to stdout as JSON. Logs go to stderr and follow
//! `RUST_LOG` (default `info`).

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use formgate::{parse_scenario, replay};
use formgate_config::{FormgateConfig, config_path};

/// Headless driver for formgate contact forms.
#[derive(Parser, Debug)]
#[command(name = "formgate")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scripted session and print the report as JSON
    Replay {
        /// Scenario file (JSON)
        scenario: PathBuf,
        /// Config file; defaults to $FORMGATE_CONFIG or ~/.formgate/config.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

/// An explicit path must load. The default location is optional, and a
/// broken default file falls back to built-in settings; `load_optional`
/// has already logged why.
fn load_config(explicit: Option<&Path>, default_path: Option<PathBuf>) -> Result<FormgateConfig> {
    if let Some(path) = explicit {
        return FormgateConfig::load_from(path)
            .with_context(|| format!("loading config {}", path.display()));
    }
    let Some(path) = default_path else {
        return Ok(FormgateConfig::default());
    };
    match FormgateConfig::load_optional(&path) {
        Ok(Some(config)) => {
            tracing::info!("Using config from default location");
            Ok(config)
        }
        Ok(None) | Err(_) => Ok(FormgateConfig::default()),
    }
}

fn run_replay(scenario_path: &Path, config: &FormgateConfig) -> Result<()> {
    let raw = fs::read_to_string(scenario_path)
        .with_context(|| format!("reading scenario {}", scenario_path.display()))?;
    let scenario = parse_scenario(&raw)
        .with_context(|| format!("parsing scenario {}", scenario_path.display()))?;
    tracing::info!(
        fields = scenario.fields.len(),
        steps = scenario.steps.len(),
        "Replaying scenario"
    );

    let report = replay(&scenario, config)?;

    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Replay { scenario, config } => {
            let config = load_config(config.as_deref(), config_path())?;
            run_replay(&scenario, &config)
        }
    }
}

//! Adaptive routing lab (v1)
//!
//! Runs the closed-loop routing simulation and writes the outcome stream as
//! JSON lines.
//!
//! # Architecture Overview
//!
//! ```text
//!        ┌──────────────────────────────────────────────────────────────┐
//!        │                        SIMULATION                            │
//!        │                                                              │
//!        │   ┌──────────┐  select   ┌──────────┐  outcome  ┌─────────┐  │
//!        │   │ decision │──────────▶│  model   │──────────▶│telemetry│  │
//!        │   │  engine  │           │(rng draw)│           │aggregate│  │
//!        │   └────▲─────┘           └──────────┘           └────┬────┘  │
//!        │        │            reads            writes          │       │
//!        │        └────────────┐                  ┌─────────────┘       │
//!        │                     ▼                  ▼                     │
//!        │                  ┌────────────────────────┐                  │
//!        │   brownout ─────▶│   registry (backends)  │                  │
//!        │                  └────────────────────────┘                  │
//!        └───────────────────────────┬──────────────────────────────────┘
//!                                    ▼
//!                         outcome stream (JSON lines)
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use adaptive_router::config::{self, LabConfig, PolicyKind};
use adaptive_router::decision::build_policy;
use adaptive_router::observability::logging;
use adaptive_router::{Registry, Simulation};

#[derive(Parser)]
#[command(name = "adaptive-router")]
#[command(about = "Simulate adaptive backend routing under a scripted brownout", long_about = None)]
struct Cli {
    /// TOML lab configuration (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of steps
    #[arg(long)]
    steps: Option<u64>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the routing policy
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Write outcomes here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Composite,
    RoundRobin,
}

impl From<PolicyArg> for PolicyKind {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Composite => PolicyKind::Composite,
            PolicyArg::RoundRobin => PolicyKind::RoundRobin,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => LabConfig::default(),
    };
    if let Some(steps) = cli.steps {
        config.simulation.steps = steps;
    }
    if let Some(seed) = cli.seed {
        config.simulation.seed = Some(seed);
    }
    if let Some(policy) = cli.policy {
        config.simulation.policy = policy.into();
    }

    logging::init_logging(&config.observability)?;

    tracing::info!("adaptive-router v0.1.0 starting");
    tracing::info!(
        config = ?cli.config,
        steps = config.simulation.steps,
        policy = ?config.simulation.policy,
        window_size = config.telemetry.window_size,
        backends = config.backends.len(),
        "Configuration loaded"
    );

    let policy = build_policy(config.simulation.policy, &config.scoring)?;
    let mut registry = Registry::from_configs(&config.backends)?;
    let mut simulation = Simulation::from_config(policy, &config)?;

    let outcomes = simulation.run(&mut registry, config.simulation.steps);

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    for outcome in &outcomes {
        serde_json::to_writer(&mut writer, outcome)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    tracing::info!(outcomes = outcomes.len(), output = ?cli.output, "Outcome stream written");
    Ok(())
}

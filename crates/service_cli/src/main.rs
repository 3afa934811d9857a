//! Contagion CLI - Systemic Risk and Default Cascade Analysis
//!
//! # Commands
//!
//! - `contagion analyse --dataset <file>` - Snapshot summary and systemic index
//! - `contagion simulate --dataset <file> --start <id>` - Run a default cascade
//! - `contagion rank --dataset <file>` - Systemic-importance rankings
//! - `contagion predict --dataset <file>` - Crisis probability series
//! - `contagion check` - Validate configuration

use anyhow::Context;
use clap::{Parser, Subcommand};
use service_cli::commands;
use service_cli::config::{build_config, CliArgs};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Systemic risk scoring and default-cascade simulation
#[derive(Parser)]
#[command(name = "contagion")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Seed for the noise source
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalise a dataset and print the snapshot summary
    Analyse {
        /// Path to dataset file (JSON)
        #[arg(short, long)]
        dataset: PathBuf,

        /// Number of riskiest institutions to report
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Simulate a default cascade from one institution
    Simulate {
        /// Path to dataset file (JSON)
        #[arg(short, long)]
        dataset: PathBuf,

        /// Institution whose failure triggers the cascade
        #[arg(short, long)]
        start: String,

        /// Loss given default in [0, 1]
        #[arg(short, long)]
        lgd: Option<f64>,
    },

    /// Rank the largest institutions by cascade loss
    Rank {
        /// Path to dataset file (JSON)
        #[arg(short, long)]
        dataset: PathBuf,

        /// Number of largest institutions to evaluate
        #[arg(short, long)]
        top: Option<usize>,

        /// Loss given default in [0, 1]
        #[arg(short, long)]
        lgd: Option<f64>,
    },

    /// Build the monthly crisis probability series
    Predict {
        /// Path to dataset file (JSON)
        #[arg(short, long)]
        dataset: PathBuf,

        /// Number of monthly points
        #[arg(long)]
        horizon: Option<u32>,
    },

    /// Check configuration
    Check,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let args = CliArgs {
        config_file: cli.config.clone(),
        log_level: cli.log_level.clone(),
        seed: cli.seed,
    };
    let config = build_config(&args).context("failed to load configuration")?;

    // Initialise tracing
    init_tracing(config.log_level.as_filter_str());
    tracing::debug!(?config, "Configuration loaded");

    let outcome = match cli.command {
        Commands::Analyse { dataset, top } => commands::analyse::run(&dataset, top, &config),
        Commands::Simulate {
            dataset,
            start,
            lgd,
        } => commands::simulate::run(&dataset, &start, lgd, &config),
        Commands::Rank { dataset, top, lgd } => commands::rank::run(&dataset, top, lgd, &config),
        Commands::Predict { dataset, horizon } => {
            commands::predict::run(&dataset, horizon, &config)
        }
        Commands::Check => commands::check::run(&config),
    };

    outcome.map_err(anyhow::Error::from)
}

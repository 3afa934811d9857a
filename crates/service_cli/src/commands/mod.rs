//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands build a
//! serialisable output value and print it as JSON on stdout.

pub mod analyse;
pub mod check;
pub mod predict;
pub mod rank;
pub mod simulate;

use contagion_core::NoiseRng;
use contagion_risk::{normalise, NormalisedDataset, RawDataset};
use serde::Serialize;
use std::io::Write;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Writes `value` to stdout as pretty JSON.
pub fn emit<T: Serialize>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Noise source for a command run.
pub(crate) fn noise(config: &CliConfig) -> NoiseRng {
    NoiseRng::from_optional_seed(config.seed)
}

/// Normalises a dataset with the configured noise source.
pub(crate) fn snapshot(dataset: &RawDataset, rng: &mut NoiseRng) -> Result<NormalisedDataset> {
    Ok(normalise(dataset, rng)?)
}

/// Command-level override of the configured loss given default.
pub(crate) fn resolve_lgd(cli_lgd: Option<f64>, config: &CliConfig) -> Result<f64> {
    let lgd = cli_lgd.unwrap_or(config.default_lgd);
    if (0.0..=1.0).contains(&lgd) {
        Ok(lgd)
    } else {
        Err(CliError::InvalidArgument(format!(
            "lgd {} must be within [0, 1]",
            lgd
        )))
    }
}

/// Command-level override of a positive count.
pub(crate) fn resolve_count(cli: Option<usize>, configured: usize, name: &str) -> Result<usize> {
    match cli.unwrap_or(configured) {
        0 => Err(CliError::InvalidArgument(format!(
            "{} must be greater than 0",
            name
        ))),
        n => Ok(n),
    }
}

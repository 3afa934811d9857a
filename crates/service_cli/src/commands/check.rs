//! Check command implementation
//!
//! Reports the effective configuration. Reaching this command means the
//! configuration already loaded and validated.

use serde::Serialize;
use tracing::info;

use super::emit;
use crate::config::CliConfig;
use crate::Result;

/// Output of `check`.
#[derive(Debug, Serialize)]
pub struct CheckReport<'a> {
    pub version: &'static str,
    pub valid: bool,
    pub config: &'a CliConfig,
}

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    config.validate()?;
    info!("Configuration OK");

    emit(&CheckReport {
        version: env!("CARGO_PKG_VERSION"),
        valid: true,
        config,
    })
}

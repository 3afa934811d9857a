//! # Contagion CLI (S: Service)
//!
//! Command-line operations over the contagion engine: dataset analysis,
//! cascade simulation, systemic-importance rankings and crisis
//! probability series. Every command prints JSON on stdout; logs go to
//! stderr through `tracing`.

pub mod commands;
pub mod config;
pub mod dataset;
pub mod error;

pub use error::{CliError, Result};

//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables,
//! and command-line flags.

use contagion_risk::cascade::DEFAULT_RANKING_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable for the log level
pub const ENV_LOG_LEVEL: &str = "CONTAGION_LOG_LEVEL";
/// Environment variable for the default loss given default
pub const ENV_LGD: &str = "CONTAGION_LGD";
/// Environment variable for the ranking size
pub const ENV_TOP_N: &str = "CONTAGION_TOP_N";
/// Environment variable for the prediction horizon
pub const ENV_HORIZON_MONTHS: &str = "CONTAGION_HORIZON_MONTHS";
/// Environment variable for the noise seed
pub const ENV_SEED: &str = "CONTAGION_SEED";

/// Upper bound on the prediction horizon (100 years)
const MAX_HORIZON_MONTHS: u32 = 1200;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable {var} has invalid value '{value}'")]
    EnvError { var: &'static str, value: String },

    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level, used when `RUST_LOG` is unset
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Loss given default for cascades and rankings
    pub default_lgd: f64,
    /// Number of largest institutions ranked
    pub ranking_top_n: usize,
    /// Number of riskiest institutions in the narrative context
    pub narrative_top_n: usize,
    /// Prediction series length in months
    pub horizon_months: u32,
    /// Seed for the noise source; entropy when unset
    pub seed: Option<u64>,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            default_lgd: 1.0,
            ranking_top_n: DEFAULT_RANKING_SIZE,
            narrative_top_n: 5,
            horizon_months: 12,
            seed: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(value) = lookup(ENV_LGD) {
            self.default_lgd = parse_env(ENV_LGD, value)?;
        }
        if let Some(value) = lookup(ENV_TOP_N) {
            self.ranking_top_n = parse_env(ENV_TOP_N, value)?;
        }
        if let Some(value) = lookup(ENV_HORIZON_MONTHS) {
            self.horizon_months = parse_env(ENV_HORIZON_MONTHS, value)?;
        }
        if let Some(value) = lookup(ENV_SEED) {
            self.seed = Some(parse_env(ENV_SEED, value)?);
        }
        Ok(self)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        Ok(())
    }

    /// Validate the configuration, reporting every problem at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !(0.0..=1.0).contains(&self.default_lgd) {
            errors.push(format!(
                "default_lgd {} must be within [0, 1]",
                self.default_lgd
            ));
        }

        if self.ranking_top_n == 0 {
            errors.push("ranking_top_n must be greater than 0".to_string());
        }

        if self.narrative_top_n == 0 {
            errors.push("narrative_top_n must be greater than 0".to_string());
        }

        if self.horizon_months == 0 {
            errors.push("horizon_months must be greater than 0".to_string());
        }
        if self.horizon_months > MAX_HORIZON_MONTHS {
            errors.push(format!(
                "horizon_months {} exceeds maximum allowed ({})",
                self.horizon_months, MAX_HORIZON_MONTHS
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn parse_env<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError { var, value })
}

/// Global CLI arguments relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Seed override
    pub seed: Option<u64>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with(cli, |var| std::env::var(var).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    let mut config = config.with_overrides_from(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.default_lgd, 1.0);
        assert_eq!(config.ranking_top_n, 50);
        assert_eq!(config.narrative_top_n, 5);
        assert_eq!(config.horizon_months, 12);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("verbose").is_err());
        assert_eq!(LogLevel::Error.to_string(), "error");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "debug"
            default_lgd = 0.45
            ranking_top_n = 20
            narrative_top_n = 3
            horizon_months = 24
            seed = 7
        "#;

        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.default_lgd, 0.45);
        assert_eq!(config.ranking_top_n, 20);
        assert_eq!(config.narrative_top_n, 3);
        assert_eq!(config.horizon_months, 24);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config: CliConfig = toml::from_str("default_lgd = 0.6").unwrap();
        assert_eq!(config.default_lgd, 0.6);
        assert_eq!(config.ranking_top_n, 50);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_invalid_log_level_in_toml() {
        assert!(toml::from_str::<CliConfig>(r#"log_level = "loud""#).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = CliConfig::default()
            .with_overrides_from(env(&[
                (ENV_LOG_LEVEL, "warn"),
                (ENV_LGD, "0.3"),
                (ENV_TOP_N, "10"),
                (ENV_HORIZON_MONTHS, "6"),
                (ENV_SEED, " 42 "),
            ]))
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.default_lgd, 0.3);
        assert_eq!(config.ranking_top_n, 10);
        assert_eq!(config.horizon_months, 6);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_env_parse_error_names_variable() {
        let err = CliConfig::default()
            .with_overrides_from(env(&[(ENV_TOP_N, "many")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_TOP_N));
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = CliConfig {
            default_lgd: 1.5,
            ranking_top_n: 0,
            narrative_top_n: 0,
            horizon_months: 0,
            ..Default::default()
        };
        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 4);
                assert!(errors.iter().any(|e| e.contains("default_lgd")));
                assert!(errors.iter().any(|e| e.contains("horizon_months")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_nan_lgd() {
        let config = CliConfig {
            default_lgd: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_priority_cli_over_env_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"error\"\ndefault_lgd = 0.2\nseed = 1").unwrap();

        let cli = CliArgs {
            config_file: Some(file.path().to_path_buf()),
            log_level: Some("trace".to_string()),
            seed: None,
        };
        let config = build_config_with(&cli, env(&[(ENV_LGD, "0.8"), (ENV_SEED, "2")])).unwrap();

        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.default_lgd, 0.8);
        assert_eq!(config.seed, Some(2));
        assert_eq!(config.horizon_months, 12);
    }

    #[test]
    fn test_missing_config_file() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/contagion.toml")),
            ..Default::default()
        };
        let err = build_config_with(&cli, env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }
}

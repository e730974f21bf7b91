//! CLI configuration management
//!
//! Handles loading configuration from a TOML file, `OPTISCOPE_*`
//! environment variables, and command-line flags.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable prefix for every configuration key.
pub const ENV_PREFIX: &str = "OPTISCOPE_";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json, csv")]
    InvalidOutputFormat(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
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

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    /// Annualised risk-free rate (decimal)
    pub risk_free_rate: f64,
    /// Annualised continuous dividend yield (decimal)
    pub dividend_yield: f64,
    /// Units per contract
    pub multiplier: f64,
    /// Price sweep half-width as a fraction of spot
    pub price_range: f64,
    /// Heat-map row band around spot, in percent
    pub otm_percentage: f64,
    /// Output format
    #[serde(deserialize_with = "deserialize_from_str")]
    pub output_format: OutputFormat,
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr<Err = ConfigError>,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            risk_free_rate: 0.045,
            dividend_yield: 0.0,
            multiplier: 100.0,
            price_range: 0.5,
            otm_percentage: 10.0,
            output_format: OutputFormat::Table,
        }
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        })
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Override fields from `OPTISCOPE_*` variables supplied by `lookup`.
    ///
    /// `lookup` receives the full variable name.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(&format!("{ENV_PREFIX}{key}"));

        if let Some(level) = var("LOG_LEVEL") {
            self.log_level = level.parse()?;
        }
        if let Some(rate) = var("RISK_FREE_RATE") {
            self.risk_free_rate = parse_number("risk_free_rate", &rate)?;
        }
        if let Some(q) = var("DIVIDEND_YIELD") {
            self.dividend_yield = parse_number("dividend_yield", &q)?;
        }
        if let Some(multiplier) = var("MULTIPLIER") {
            self.multiplier = parse_number("multiplier", &multiplier)?;
        }
        if let Some(range) = var("PRICE_RANGE") {
            self.price_range = parse_number("price_range", &range)?;
        }
        if let Some(otm) = var("OTM_PERCENTAGE") {
            self.otm_percentage = parse_number("otm_percentage", &otm)?;
        }
        if let Some(format) = var("OUTPUT_FORMAT") {
            self.output_format = format.parse()?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = level.parse()?;
        }
        if let Some(rate) = cli.risk_free_rate {
            self.risk_free_rate = rate;
        }
        if let Some(q) = cli.dividend_yield {
            self.dividend_yield = q;
        }
        if let Some(multiplier) = cli.multiplier {
            self.multiplier = multiplier;
        }
        if let Some(range) = cli.price_range {
            self.price_range = range;
        }
        if let Some(otm) = cli.otm_percentage {
            self.otm_percentage = otm;
        }
        if let Some(format) = &cli.output_format {
            self.output_format = format.parse()?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &'static str, value: f64| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        };

        if !self.risk_free_rate.is_finite() {
            return Err(invalid("risk_free_rate", self.risk_free_rate));
        }
        if !self.dividend_yield.is_finite() {
            return Err(invalid("dividend_yield", self.dividend_yield));
        }
        if !(self.multiplier.is_finite() && self.multiplier > 0.0) {
            return Err(invalid("multiplier", self.multiplier));
        }
        if !(self.price_range > 0.0 && self.price_range < 1.0) {
            return Err(invalid("price_range", self.price_range));
        }
        if !(self.otm_percentage.is_finite() && self.otm_percentage > 0.0) {
            return Err(invalid("otm_percentage", self.otm_percentage));
        }
        Ok(())
    }
}

/// Command-line overrides
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Risk-free rate override
    pub risk_free_rate: Option<f64>,
    /// Dividend yield override
    pub dividend_yield: Option<f64>,
    /// Multiplier override
    pub multiplier: Option<f64>,
    /// Price sweep range override
    pub price_range: Option<f64>,
    /// Heat-map band override
    pub otm_percentage: Option<f64>,
    /// Output format override
    pub output_format: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    config.apply_env_with(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.risk_free_rate, 0.045);
        assert_eq!(config.multiplier, 100.0);
        assert_eq!(config.output_format, OutputFormat::Table);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert!(LogLevel::from_str("invalid").is_err());
        assert_eq!(format!("{}", LogLevel::Warn), "warn");
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
        assert!(matches!(
            OutputFormat::from_str("xml"),
            Err(ConfigError::InvalidOutputFormat(_))
        ));
        assert_eq!(OutputFormat::Table.to_string(), "table");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "debug"
            risk_free_rate = 0.05
            dividend_yield = 0.012
            multiplier = 10.0
            price_range = 0.25
            otm_percentage = 15.0
            output_format = "csv"
        "#;

        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.risk_free_rate, 0.05);
        assert_eq!(config.dividend_yield, 0.012);
        assert_eq!(config.multiplier, 10.0);
        assert_eq!(config.price_range, 0.25);
        assert_eq!(config.otm_percentage, 15.0);
        assert_eq!(config.output_format, OutputFormat::Csv);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config: CliConfig = toml::from_str("dividend_yield = 0.02").unwrap();
        assert_eq!(config.dividend_yield, 0.02);
        assert_eq!(config.risk_free_rate, 0.045);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_toml_rejects_bad_format() {
        assert!(toml::from_str::<CliConfig>("output_format = \"xml\"").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CliConfig::default();
        config
            .apply_env_with(env(&[
                ("OPTISCOPE_RISK_FREE_RATE", "0.03"),
                ("OPTISCOPE_OUTPUT_FORMAT", "json"),
                ("OTHER_VAR", "ignored"),
            ]))
            .unwrap();

        assert_eq!(config.risk_free_rate, 0.03);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.multiplier, 100.0);
    }

    #[test]
    fn test_env_rejects_garbage() {
        let mut config = CliConfig::default();
        let err = config
            .apply_env_with(env(&[("OPTISCOPE_MULTIPLIER", "lots")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "multiplier", .. }));
    }

    #[test]
    fn test_cli_args_take_precedence() {
        let cli = CliArgs {
            log_level: Some("debug".to_string()),
            risk_free_rate: Some(0.01),
            output_format: Some("csv".to_string()),
            ..CliArgs::default()
        };

        let config = build_config_with_env(
            &cli,
            env(&[
                ("OPTISCOPE_RISK_FREE_RATE", "0.03"),
                ("OPTISCOPE_DIVIDEND_YIELD", "0.02"),
            ]),
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.risk_free_rate, 0.01);
        assert_eq!(config.dividend_yield, 0.02);
        assert_eq!(config.output_format, OutputFormat::Csv);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        for cli in [
            CliArgs {
                price_range: Some(1.0),
                ..CliArgs::default()
            },
            CliArgs {
                multiplier: Some(0.0),
                ..CliArgs::default()
            },
            CliArgs {
                otm_percentage: Some(-1.0),
                ..CliArgs::default()
            },
        ] {
            assert!(build_config_with_env(&cli, env(&[])).is_err());
        }
    }

    #[test]
    fn test_missing_config_file() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/optiscope.toml")),
            ..CliArgs::default()
        };
        assert!(matches!(
            build_config_with_env(&cli, env(&[])),
            Err(ConfigError::FileError(_))
        ));
    }
}

//! Harness configuration.
//!
//! Settings come from command-line flags with environment fallbacks
//! ([`ConfigArgs`]) or straight from the environment
//! ([`HarnessConfig::from_env`]). The resulting [`HarnessConfig`] is passed
//! explicitly to [`crate::connect`]; nothing is cached process-wide.

use airtable_harness_csv_backend::CsvConfig;
use airtable_harness_remote_backend::{RemoteConfig, DEFAULT_API_URL};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use table_core::{HarnessError, Result};

/// Which backend the harness should run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BackendKind {
    /// Remote if credentials are set, else CSV if a data directory is set, else mock
    #[default]
    Auto,
    Remote,
    Csv,
    Mock,
}

/// Configuration flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Backend to use
    #[arg(long, value_enum, default_value = "auto", env = "HARNESS_BACKEND")]
    pub backend: BackendKind,

    /// Airtable personal access token
    #[arg(long, env = "AIRTABLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Airtable base id (app...)
    #[arg(long, env = "AIRTABLE_BASE_ID")]
    pub base_id: Option<String>,

    /// Airtable API root
    #[arg(long, default_value = DEFAULT_API_URL, env = "AIRTABLE_API_URL")]
    pub api_url: String,

    /// Directory holding one CSV file per table
    #[arg(long, env = "CSV_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Write CSV files after every change (true/false/1/0/yes/no)
    #[arg(
        long,
        default_value = "true",
        env = "CSV_AUTO_SAVE",
        action = clap::ArgAction::Set,
        value_parser = parse_bool_arg
    )]
    pub auto_save: bool,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Default for ConfigArgs {
    fn default() -> Self {
        Self {
            backend: BackendKind::Auto,
            api_key: None,
            base_id: None,
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: None,
            auto_save: true,
            log_level: "info".to_string(),
        }
    }
}

/// Backend-specific settings after auto-detection.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    Remote(RemoteConfig),
    Csv(CsvConfig),
    Mock,
}

impl BackendConfig {
    pub fn kind(&self) -> BackendKind {
        match self {
            BackendConfig::Remote(_) => BackendKind::Remote,
            BackendConfig::Csv(_) => BackendKind::Csv,
            BackendConfig::Mock => BackendKind::Mock,
        }
    }
}

/// Fully resolved harness configuration.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub backend: BackendConfig,
    pub log_level: String,
}

impl HarnessConfig {
    /// Resolve parsed flags into a configuration.
    ///
    /// Fails with [`HarnessError::Config`] when an explicitly chosen backend
    /// lacks its required settings.
    pub fn from_args(args: &ConfigArgs) -> Result<Self> {
        let api_key = non_empty(args.api_key.as_deref());
        let base_id = non_empty(args.base_id.as_deref());
        let data_dir = args
            .data_dir
            .as_ref()
            .filter(|dir| !dir.as_os_str().is_empty());

        let kind = match args.backend {
            BackendKind::Auto if api_key.is_some() && base_id.is_some() => BackendKind::Remote,
            BackendKind::Auto if data_dir.is_some() => BackendKind::Csv,
            BackendKind::Auto => BackendKind::Mock,
            explicit => explicit,
        };

        let backend = match kind {
            BackendKind::Remote => {
                let config = RemoteConfig::new(
                    api_key.unwrap_or_default(),
                    base_id.unwrap_or_default(),
                )
                .with_api_url(args.api_url.trim());
                config.validate()?;
                BackendConfig::Remote(config)
            }
            BackendKind::Csv => {
                let dir = data_dir.ok_or_else(|| {
                    HarnessError::Config("CSV_DATA_DIR is required for the csv backend".to_string())
                })?;
                BackendConfig::Csv(CsvConfig::new(dir).with_auto_save(args.auto_save))
            }
            BackendKind::Mock | BackendKind::Auto => BackendConfig::Mock,
        };

        Ok(Self {
            backend,
            log_level: args.log_level.clone(),
        })
    }

    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ConfigArgs::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match get("HARNESS_BACKEND") {
            Some(value) => BackendKind::from_str(value.trim(), true).map_err(|_| {
                HarnessError::Config(format!(
                    "HARNESS_BACKEND must be one of remote, csv, mock, auto; got '{value}'"
                ))
            })?,
            None => defaults.backend,
        };
        let auto_save = match get("CSV_AUTO_SAVE") {
            Some(value) => parse_bool("CSV_AUTO_SAVE", &value)?,
            None => defaults.auto_save,
        };

        let args = ConfigArgs {
            backend,
            api_key: get("AIRTABLE_API_KEY"),
            base_id: get("AIRTABLE_BASE_ID"),
            api_url: get("AIRTABLE_API_URL").unwrap_or(defaults.api_url),
            data_dir: get("CSV_DATA_DIR").map(PathBuf::from),
            auto_save,
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
        };
        Self::from_args(&args)
    }

    pub fn kind(&self) -> BackendKind {
        self.backend.kind()
    }
}

/// Parse a boolean setting, accepting true/false/1/0/yes/no in any case.
pub fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(HarnessError::Config(format!(
            "{name} must be true/false/1/0/yes/no, got '{value}'"
        ))),
    }
}

fn parse_bool_arg(value: &str) -> std::result::Result<bool, String> {
    parse_bool("CSV_AUTO_SAVE", value).map_err(|e| e.to_string())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

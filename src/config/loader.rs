//! Configuration loading from the environment, a `.env` file and an optional
//! TOML file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::config::schema::WatchdogConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_VAR: &str = "WATCHDOG_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Env file error: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("Invalid value '{value}' for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from the process environment.
///
/// A `.env` file in the working directory (or a parent) fills in variables
/// the process environment does not set.
pub fn load_config() -> Result<WatchdogConfig, ConfigError> {
    let env_file = match dotenvy::dotenv_iter() {
        Ok(iter) => iter.collect::<Result<HashMap<_, _>, _>>()?,
        Err(e) if e.not_found() => HashMap::new(),
        Err(e) => return Err(e.into()),
    };
    load_config_from(with_env_file(|key| std::env::var(key).ok(), env_file))
}

/// Read a `.env` file into a variable map without touching the process
/// environment.
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let vars = dotenvy::from_path_iter(path)?.collect::<Result<HashMap<_, _>, _>>()?;
    Ok(vars)
}

/// Layer `env_file` under `process`: process variables win.
pub fn with_env_file<F>(
    process: F,
    env_file: HashMap<String, String>,
) -> impl Fn(&str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    move |key: &str| process(key).or_else(|| env_file.get(key).cloned())
}

/// Load and validate configuration, reading variables through `lookup`.
///
/// Values from the file named by `WATCHDOG_CONFIG` are applied first, then
/// environment variables override them. Blank variables count as unset.
pub fn load_config_from<F>(lookup: F) -> Result<WatchdogConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let mut config = match lookup(CONFIG_PATH_VAR) {
        Some(path) => load_file(Path::new(&path))?,
        None => WatchdogConfig::default(),
    };

    apply_env(&mut config, &lookup)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse a TOML file without validating it.
pub fn load_file(path: &Path) -> Result<WatchdogConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

fn apply_env<F>(config: &mut WatchdogConfig, lookup: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("SERVICE_URL") {
        config.target.url = url.trim().to_string();
    }
    if let Some(secs) = parse_var(lookup, "PROBE_TIMEOUT_SECS")? {
        config.target.timeout_secs = secs;
    }

    if let Some(secs) = parse_var(lookup, "CHECK_INTERVAL_SECS")? {
        config.schedule.normal_interval_secs = secs;
    }
    if let Some(secs) = parse_var(lookup, "RETRY_INTERVAL_SECS")? {
        config.schedule.retry_interval_secs = secs;
    }
    if let Some(retries) = parse_var(lookup, "MAX_RETRIES")? {
        config.schedule.max_retries = retries;
    }

    if let Some(host) = lookup("SMTP_HOST") {
        config.smtp.host = host.trim().to_string();
    }
    if let Some(port) = parse_var(lookup, "SMTP_PORT")? {
        config.smtp.port = port;
    }
    // Only the literal "true" selects implicit TLS.
    if let Some(secure) = lookup("SMTP_SECURE") {
        config.smtp.secure = secure.trim() == "true";
    }
    if let Some(user) = lookup("SMTP_USER") {
        config.smtp.username = user;
    }
    if let Some(pass) = lookup("SMTP_PASS") {
        config.smtp.password = pass;
    }
    if let Some(from) = lookup("EMAIL_FROM") {
        config.smtp.from = from.trim().to_string();
    }
    if let Some(to) = lookup("ALERT_EMAIL") {
        config.smtp.to = to.trim().to_string();
    }

    if let Some(format) = parse_var(lookup, "LOG_FORMAT")? {
        config.observability.log_format = format;
    }
    if let Some(addr) = lookup("METRICS_ADDRESS") {
        config.observability.metrics_address = addr.trim().to_string();
        config.observability.metrics_enabled = true;
    }

    Ok(())
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                var,
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}

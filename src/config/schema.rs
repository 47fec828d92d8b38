//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the watchdog.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the watchdog.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WatchdogConfig {
    /// The monitored endpoint.
    pub target: TargetConfig,

    /// Polling cadence and retry budget.
    pub schedule: ScheduleConfig,

    /// SMTP transport used for alerts.
    pub smtp: SmtpConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Monitored endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetConfig {
    /// URL probed with a GET request.
    pub url: String,

    /// Per-probe timeout in seconds.
    pub timeout_secs: u64,

    /// Lowest HTTP status counted as a failure.
    pub failure_status: u16,
}

impl TargetConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: 10,
            failure_status: 400,
        }
    }
}

/// Check scheduling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Interval between checks while the target is healthy, in seconds.
    pub normal_interval_secs: u64,

    /// Interval between checks after a failure, in seconds.
    pub retry_interval_secs: u64,

    /// Retries allowed after the first failure before an alert goes out.
    pub max_retries: u32,
}

impl ScheduleConfig {
    pub fn normal_interval(&self) -> Duration {
        Duration::from_secs(self.normal_interval_secs)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_secs)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            normal_interval_secs: 30 * 60,
            retry_interval_secs: 5 * 60,
            max_retries: 3,
        }
    }
}

/// SMTP transport configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SmtpConfig {
    /// SMTP relay host.
    pub host: String,

    /// SMTP relay port.
    pub port: u16,

    /// Use implicit TLS. When false, STARTTLS is used if the server offers it.
    pub secure: bool,

    pub username: String,

    pub password: String,

    /// Sender mailbox (e.g., "Watchdog <watchdog@example.com>").
    pub from: String,

    /// Recipient mailbox.
    pub to: String,

    /// Transport timeout in seconds.
    pub timeout_secs: u64,
}

impl SmtpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 587,
            secure: false,
            username: String::new(),
            password: String::new(),
            from: String::new(),
            to: String::new(),
            timeout_secs: 30,
        }
    }
}

// Keeps the password out of startup logs.
impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines for terminals.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_format: LogFormat,

    /// Expose a Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Bind address for the scrape endpoint.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

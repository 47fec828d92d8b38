//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the optional metrics exporter
//! - Build the prober and notifier from validated configuration
//! - Assemble the scheduler
//!
//! # Design Decisions
//! - Fail fast: any construction error is fatal
//! - A bad metrics address only disables metrics

use thiserror::Error;
use url::Url;

use crate::config::WatchdogConfig;
use crate::health::{EscalationPolicy, HttpProber, Scheduler};
use crate::notify::{EmailNotifier, NotifyError};
use crate::observability::metrics;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid target URL: {0}")]
    Target(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Prober(#[from] reqwest::Error),

    #[error("failed to build notifier: {0}")]
    Notifier(#[from] NotifyError),
}

/// Build the monitor for a validated configuration.
pub fn build(config: &WatchdogConfig) -> Result<Scheduler<HttpProber, EmailNotifier>, StartupError> {
    start_metrics(config);

    let target = Url::parse(&config.target.url)?;
    let prober = HttpProber::from_config(&config.target)?;
    let notifier = EmailNotifier::new(&config.smtp)?;
    let policy = EscalationPolicy::from(&config.schedule);

    tracing::info!(
        target_url = %target,
        timeout_secs = config.target.timeout_secs,
        failure_status = config.target.failure_status,
        smtp_host = %config.smtp.host,
        alert_to = %config.smtp.to,
        "Monitor configured"
    );

    Ok(Scheduler::new(target, policy, prober, notifier))
}

fn start_metrics(config: &WatchdogConfig) {
    if !config.observability.metrics_enabled {
        return;
    }

    match config.observability.metrics_address.parse() {
        Ok(addr) => {
            if let Err(e) = metrics::init_metrics(addr) {
                tracing::error!(error = %e, "Failed to start metrics endpoint");
            }
        }
        Err(e) => {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            );
        }
    }
}

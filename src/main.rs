//! Service Watchdog
//!
//! Probes a single HTTP endpoint, switches to a faster retry cadence after a
//! failure, and emails an alert once the retry budget is exhausted.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                       SERVICE WATCHDOG                       │
//!   │                                                              │
//!   │  ┌───────────┐    ┌──────────┐    ┌─────────────┐            │
//!   │  │ scheduler │───▶│  prober  │───▶│ escalation  │──┐         │
//!   │  │   loop    │    │ (HTTP)   │    │ + state     │  │ alert   │
//!   │  └─────▲─────┘    └──────────┘    └──────┬──────┘  ▼         │
//!   │        │          next delay             │     ┌──────────┐  │
//!   │        └─────────────────────────────────┘     │ notifier │──┼──▶ SMTP
//!   │                                                │ (email)  │  │
//!   │                                                └──────────┘  │
//!   │  ┌────────────────────────────────────────────────────────┐  │
//!   │  │                Cross-Cutting Concerns                  │  │
//!   │  │   config (env + TOML)   observability   lifecycle      │  │
//!   │  └────────────────────────────────────────────────────────┘  │
//!   └──────────────────────────────────────────────────────────────┘
//! ```

use service_watchdog::config::{self, LogFormat};
use service_watchdog::lifecycle::{signals, startup, Shutdown};
use service_watchdog::observability::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            let _ = init_logging(LogFormat::Pretty);
            tracing::error!(error = %e, "Invalid configuration, refusing to start");
            std::process::exit(1);
        }
    };

    init_logging(config.observability.log_format)?;

    tracing::info!("service-watchdog v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        target_url = %config.target.url,
        normal_interval_secs = config.schedule.normal_interval_secs,
        retry_interval_secs = config.schedule.retry_interval_secs,
        max_retries = config.schedule.max_retries,
        "Configuration loaded"
    );

    let scheduler = startup::build(&config)?;

    let shutdown = Shutdown::new();
    let monitor_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown.clone());

    scheduler.run(monitor_shutdown).await;

    tracing::info!("Shutdown complete");
    Ok(())
}

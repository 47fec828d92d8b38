//! Metrics collection and exposition.
//!
//! # Metrics
//! - `watchdog_probes_total` (counter): probes by outcome
//! - `watchdog_consecutive_failures` (gauge): current failure streak
//! - `watchdog_mode` (gauge): 0=normal, 1=retrying
//! - `watchdog_alerts_total` (counter): alert attempts by result

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::health::Mode;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_probe(healthy: bool) {
    let outcome = if healthy { "success" } else { "failure" };
    metrics::counter!("watchdog_probes_total", "outcome" => outcome).increment(1);
}

pub fn record_state(mode: Mode, consecutive_failures: u32) {
    let mode_value = match mode {
        Mode::Normal => 0.0,
        Mode::Retrying => 1.0,
    };
    metrics::gauge!("watchdog_mode").set(mode_value);
    metrics::gauge!("watchdog_consecutive_failures").set(consecutive_failures as f64);
}

pub fn record_alert(delivered: bool) {
    let result = if delivered { "delivered" } else { "failed" };
    metrics::counter!("watchdog_alerts_total", "result" => result).increment(1);
}

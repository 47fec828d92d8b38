//! Active health probing.
//!
//! # Responsibilities
//! - Issue one bounded-timeout GET against the target
//! - Classify the result as healthy or failed
//!
//! # Design Decisions
//! - Statuses below the failure threshold are healthy (default: < 400)
//! - Timeouts, connection errors and error statuses are all failures
//! - Never returns an error: every failure mode becomes `ProbeOutcome::Failed`

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time;
use url::Url;

use crate::config::TargetConfig;

/// Why a probe failed.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("connection error: {0}")]
    Connect(String),

    #[error("unhealthy status {0}")]
    Status(u16),

    #[error("request error: {0}")]
    Request(String),
}

/// Result of a single probe.
#[derive(Debug)]
pub enum ProbeOutcome {
    Healthy { status: u16 },
    Failed(ProbeError),
}

impl ProbeOutcome {
    pub fn is_healthy(&self) -> bool {
        matches!(self, ProbeOutcome::Healthy { .. })
    }
}

/// Performs liveness checks against a target.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, target: &Url) -> ProbeOutcome;
}

/// HTTP GET prober.
pub struct HttpProber {
    client: reqwest::Client,
    timeout: Duration,
    failure_status: u16,
}

impl HttpProber {
    pub fn new(timeout: Duration, failure_status: u16) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("service-watchdog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            timeout,
            failure_status,
        })
    }

    pub fn from_config(config: &TargetConfig) -> Result<Self, reqwest::Error> {
        Self::new(config.timeout(), config.failure_status)
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, target: &Url) -> ProbeOutcome {
        let response_future = self.client.get(target.clone()).send();

        match time::timeout(self.timeout, response_future).await {
            Ok(Ok(response)) => {
                let status = response.status().as_u16();
                if status < self.failure_status {
                    ProbeOutcome::Healthy { status }
                } else {
                    ProbeOutcome::Failed(ProbeError::Status(status))
                }
            }
            Ok(Err(e)) if e.is_connect() => ProbeOutcome::Failed(ProbeError::Connect(e.to_string())),
            Ok(Err(e)) => ProbeOutcome::Failed(ProbeError::Request(e.to_string())),
            Err(_) => ProbeOutcome::Failed(ProbeError::Timeout(self.timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ProbeError::Timeout(Duration::from_secs(10)).to_string(),
            "timed out after 10s"
        );
        assert_eq!(ProbeError::Status(503).to_string(), "unhealthy status 503");
    }

    #[test]
    fn test_outcome_health() {
        assert!(ProbeOutcome::Healthy { status: 204 }.is_healthy());
        assert!(!ProbeOutcome::Failed(ProbeError::Status(500)).is_healthy());
    }
}

//! Check scheduling loop.
//!
//! # Responsibilities
//! - Run one check immediately on start
//! - Wait the delay computed by the last evaluation, then check again
//! - Stop only when the shutdown signal fires
//!
//! # Design Decisions
//! - Strictly sequential: the next wait starts after the probe and any alert
//!   have completed
//! - State is owned by the loop; no locking
//! - Shutdown abandons an in-flight probe or wait immediately

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;
use url::Url;

use crate::health::escalation::Escalator;
use crate::health::prober::Prober;
use crate::health::state::{EscalationPolicy, MonitorState};
use crate::notify::Notifier;

/// Drives the check → evaluate → wait cycle for a single target.
pub struct Scheduler<P, N> {
    target: Url,
    prober: P,
    escalator: Escalator<N>,
    state: MonitorState,
}

impl<P: Prober, N: Notifier> Scheduler<P, N> {
    pub fn new(target: Url, policy: EscalationPolicy, prober: P, notifier: N) -> Self {
        Self {
            escalator: Escalator::new(notifier, target.clone()),
            target,
            prober,
            state: MonitorState::new(policy),
        }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn notifier(&self) -> &N {
        self.escalator.notifier()
    }

    /// Probe once and return the delay before the next probe.
    pub async fn check_once(&mut self) -> Duration {
        let outcome = self.prober.probe(&self.target).await;
        self.escalator.evaluate(&mut self.state, &outcome).await
    }

    /// Run until shutdown, returning the final state.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> MonitorState {
        let policy = *self.state.policy();
        tracing::info!(
            target_url = %self.target,
            normal_interval = ?policy.normal_interval,
            retry_interval = ?policy.retry_interval,
            max_retries = policy.max_retries,
            "Monitoring started"
        );

        loop {
            let delay = tokio::select! {
                delay = self.check_once() => delay,
                _ = shutdown.recv() => {
                    tracing::info!("Monitor received shutdown signal during check");
                    break;
                }
            };

            tracing::debug!(
                delay = ?delay,
                mode = %self.state.mode(),
                failures = self.state.consecutive_failures(),
                "Next check scheduled"
            );

            tokio::select! {
                _ = time::sleep(delay) => {}
                _ = shutdown.recv() => {
                    tracing::info!("Monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }

        self.state
    }
}

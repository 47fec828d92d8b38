//! Failure escalation.
//!
//! # Responsibilities
//! - Feed probe outcomes into the monitor state machine
//! - Log every probe result and mode change
//! - Dispatch the alert once the retry budget is exhausted
//!
//! # Design Decisions
//! - Notifier errors are logged and leave the alert pending for the next
//!   failing cycle
//! - The returned delay is always the state machine's, regardless of whether
//!   the alert went out

use std::time::Duration;

use chrono::Utc;
use url::Url;

use crate::health::prober::ProbeOutcome;
use crate::health::state::{MonitorState, Transition};
use crate::notify::{AlertEpisode, Notifier};
use crate::observability::metrics;

/// Applies probe outcomes to the monitor state and raises alerts.
pub struct Escalator<N> {
    notifier: N,
    target: Url,
}

impl<N: Notifier> Escalator<N> {
    pub fn new(notifier: N, target: Url) -> Self {
        Self { notifier, target }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Process one probe outcome and return the delay before the next probe.
    pub async fn evaluate(&self, state: &mut MonitorState, outcome: &ProbeOutcome) -> Duration {
        let step = match outcome {
            ProbeOutcome::Healthy { status } => {
                tracing::info!(target_url = %self.target, status = *status, "Service OK");
                state.record_success()
            }
            ProbeOutcome::Failed(e) => {
                tracing::warn!(target_url = %self.target, error = %e, "Service check failed");
                state.record_failure()
            }
        };
        metrics::record_probe(outcome.is_healthy());

        match step.transition {
            Transition::EnteredRetry => {
                tracing::warn!(
                    target_url = %self.target,
                    retry_interval = ?state.policy().retry_interval,
                    "First failure detected, entering retry mode"
                );
            }
            Transition::Recovered => {
                tracing::info!(
                    target_url = %self.target,
                    "Service recovered, returning to normal monitoring"
                );
            }
            Transition::Stay if !outcome.is_healthy() => {
                tracing::info!(
                    target_url = %self.target,
                    attempt = state.consecutive_failures(),
                    max_attempts = state.policy().max_retries.saturating_add(1),
                    "Retry attempt failed"
                );
            }
            Transition::Stay => {}
        }

        if step.alert_due {
            self.dispatch_alert(state).await;
        }

        metrics::record_state(state.mode(), state.consecutive_failures());
        step.next_delay
    }

    async fn dispatch_alert(&self, state: &mut MonitorState) {
        let episode = AlertEpisode {
            target: self.target.clone(),
            failures: state.consecutive_failures(),
            max_retries: state.policy().max_retries,
            retry_interval: state.policy().retry_interval,
            detected_at: Utc::now(),
        };

        match self.notifier.notify(&episode).await {
            Ok(()) => {
                let marked = state.mark_alert_sent();
                debug_assert!(marked, "alert delivered while none was due");
                metrics::record_alert(true);
                tracing::info!(
                    target_url = %self.target,
                    notifier = self.notifier.name(),
                    failures = episode.failures,
                    "Alert dispatched"
                );
            }
            Err(e) => {
                metrics::record_alert(false);
                tracing::error!(
                    target_url = %self.target,
                    notifier = self.notifier.name(),
                    failures = episode.failures,
                    error = %e,
                    "Alert dispatch failed, will retry on next failure"
                );
            }
        }
    }
}

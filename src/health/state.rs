//! Monitor state machine.
//!
//! # States
//! - Normal: target healthy, polled at the normal interval
//! - Retrying: at least one failure since the last success, polled at the
//!   retry interval
//!
//! # State Transitions
//! ```text
//! Normal   → Retrying: first failure
//! Retrying → Retrying: further failures (alert due once failures > max_retries)
//! Retrying → Normal:   any success (count and alert flag reset together)
//! ```
//!
//! # Design Decisions
//! - Pure and synchronous: the caller performs the alert and reports back
//! - One alert per failure episode; the flag only clears on recovery

use std::time::Duration;

use crate::config::ScheduleConfig;

/// Polling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Retrying,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Retrying => "retrying",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed cadence and retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscalationPolicy {
    /// Retries allowed after the first failure before alerting.
    pub max_retries: u32,
    pub normal_interval: Duration,
    pub retry_interval: Duration,
}

impl From<&ScheduleConfig> for EscalationPolicy {
    fn from(config: &ScheduleConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            normal_interval: config.normal_interval(),
            retry_interval: config.retry_interval(),
        }
    }
}

/// Mode change caused by a single probe result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Mode unchanged.
    Stay,
    /// Normal → Retrying on the first failure of an episode.
    EnteredRetry,
    /// Retrying → Normal on the first success after an episode.
    Recovered,
}

/// Outcome of feeding one probe result into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Delay before the next probe.
    pub next_delay: Duration,
    pub transition: Transition,
    /// The retry budget is exhausted and no alert has gone out yet.
    pub alert_due: bool,
}

/// Failure-streak bookkeeping for the monitored target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorState {
    mode: Mode,
    consecutive_failures: u32,
    alert_sent: bool,
    policy: EscalationPolicy,
}

impl MonitorState {
    pub fn new(policy: EscalationPolicy) -> Self {
        Self {
            mode: Mode::Normal,
            consecutive_failures: 0,
            alert_sent: false,
            policy,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn alert_sent(&self) -> bool {
        self.alert_sent
    }

    pub fn policy(&self) -> &EscalationPolicy {
        &self.policy
    }

    /// Apply a successful probe.
    pub fn record_success(&mut self) -> Step {
        let transition = match self.mode {
            Mode::Normal => Transition::Stay,
            Mode::Retrying => {
                self.mode = Mode::Normal;
                self.consecutive_failures = 0;
                self.alert_sent = false;
                Transition::Recovered
            }
        };

        Step {
            next_delay: self.policy.normal_interval,
            transition,
            alert_due: false,
        }
    }

    /// Apply a failed probe.
    pub fn record_failure(&mut self) -> Step {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);

        let (transition, alert_due) = match self.mode {
            Mode::Normal => {
                self.mode = Mode::Retrying;
                (Transition::EnteredRetry, false)
            }
            Mode::Retrying => (Transition::Stay, self.budget_exhausted() && !self.alert_sent),
        };

        Step {
            next_delay: self.policy.retry_interval,
            transition,
            alert_due,
        }
    }

    /// Record a delivered alert. Returns false if no alert was due.
    #[must_use]
    pub fn mark_alert_sent(&mut self) -> bool {
        if self.mode != Mode::Retrying || self.alert_sent || !self.budget_exhausted() {
            return false;
        }
        self.alert_sent = true;
        true
    }

    fn budget_exhausted(&self) -> bool {
        self.consecutive_failures > self.policy.max_retries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NORMAL: Duration = Duration::from_secs(1800);
    const RETRY: Duration = Duration::from_secs(300);

    fn state(max_retries: u32) -> MonitorState {
        MonitorState::new(EscalationPolicy {
            max_retries,
            normal_interval: NORMAL,
            retry_interval: RETRY,
        })
    }

    fn assert_consistent(state: &MonitorState) {
        assert_eq!(
            state.mode() == Mode::Retrying,
            state.consecutive_failures() > 0,
            "mode/count mismatch: {:?}",
            state
        );
        if state.mode() == Mode::Normal {
            assert!(!state.alert_sent(), "alert flag set while normal: {:?}", state);
        }
        if state.alert_sent() {
            assert!(state.consecutive_failures() > state.policy().max_retries);
        }
    }

    #[test]
    fn test_initial_state() {
        let s = state(3);
        assert_eq!(s.mode(), Mode::Normal);
        assert_eq!(s.consecutive_failures(), 0);
        assert!(!s.alert_sent());
    }

    #[test]
    fn test_success_while_normal_keeps_cadence() {
        let mut s = state(3);
        let step = s.record_success();

        assert_eq!(step.transition, Transition::Stay);
        assert_eq!(step.next_delay, NORMAL);
        assert!(!step.alert_due);
        assert_eq!(s, state(3));
    }

    #[test]
    fn test_first_failure_enters_retry_without_alert() {
        let mut s = state(0);
        let step = s.record_failure();

        assert_eq!(step.transition, Transition::EnteredRetry);
        assert_eq!(step.next_delay, RETRY);
        assert!(!step.alert_due);
        assert_eq!(s.mode(), Mode::Retrying);
        assert_eq!(s.consecutive_failures(), 1);
    }

    #[test]
    fn test_alert_due_once_budget_exceeded() {
        let mut s = state(3);
        let due: Vec<bool> = (0..4).map(|_| s.record_failure().alert_due).collect();
        assert_eq!(due, vec![false, false, false, true]);
    }

    #[test]
    fn test_alert_not_due_after_it_was_sent() {
        let mut s = state(1);
        s.record_failure();
        assert!(s.record_failure().alert_due);
        assert!(s.mark_alert_sent());

        for _ in 0..5 {
            let step = s.record_failure();
            assert!(!step.alert_due);
            assert_eq!(step.next_delay, RETRY);
        }
        assert!(s.alert_sent());
    }

    #[test]
    fn test_undelivered_alert_stays_due() {
        let mut s = state(1);
        s.record_failure();
        assert!(s.record_failure().alert_due);
        // delivery failed, flag untouched
        assert!(s.record_failure().alert_due);
        assert!(!s.alert_sent());
    }

    #[test]
    fn test_mark_alert_sent_rejected_when_not_due() {
        let mut s = state(3);
        assert!(!s.mark_alert_sent());

        s.record_failure();
        s.record_failure();
        assert!(!s.mark_alert_sent());
        assert!(!s.alert_sent());
    }

    #[test]
    fn test_recovery_resets_everything_at_once() {
        let mut s = state(1);
        s.record_failure();
        s.record_failure();
        s.record_failure();
        assert!(s.mark_alert_sent());

        let step = s.record_success();
        assert_eq!(step.transition, Transition::Recovered);
        assert_eq!(step.next_delay, NORMAL);
        assert_eq!(s, state(1));
    }

    #[test]
    fn test_new_episode_can_alert_again() {
        let mut s = state(0);
        s.record_failure();
        assert!(s.record_failure().alert_due);
        assert!(s.mark_alert_sent());
        s.record_success();

        s.record_failure();
        assert!(s.record_failure().alert_due);
    }

    #[test]
    fn test_failure_count_saturates() {
        let mut s = state(3);
        s.consecutive_failures = u32::MAX - 1;
        s.mode = Mode::Retrying;
        s.record_failure();
        s.record_failure();
        assert_eq!(s.consecutive_failures(), u32::MAX);
    }

    #[test]
    fn test_invariants_hold_for_every_outcome_sequence() {
        const LEN: u32 = 10;

        for max_retries in 0..4 {
            for bits in 0u32..(1 << LEN) {
                let mut s = state(max_retries);
                let mut alerts_in_episode = 0;
                let mut previous_failures = 0;

                for i in 0..LEN {
                    let success = bits & (1 << i) != 0;
                    let step = if success {
                        s.record_success()
                    } else {
                        s.record_failure()
                    };

                    if success {
                        assert_eq!(step.next_delay, NORMAL);
                        assert_eq!(s.consecutive_failures(), 0);
                        alerts_in_episode = 0;
                    } else {
                        assert_eq!(step.next_delay, RETRY);
                        assert_eq!(s.consecutive_failures(), previous_failures + 1);
                    }

                    // Deliveries on odd steps fail so re-alerting is covered too.
                    if step.alert_due && i % 2 == 0 {
                        assert!(s.mark_alert_sent());
                        alerts_in_episode += 1;
                    }

                    assert!(alerts_in_episode <= 1);
                    assert_consistent(&s);
                    previous_failures = s.consecutive_failures();
                }
            }
        }
    }
}

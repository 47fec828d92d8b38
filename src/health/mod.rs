//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Scheduler (scheduler.rs):
//!     Immediate first check
//!     → Probe the target (prober.rs)
//!     → Evaluate outcome (escalation.rs)
//!     → Wait the returned delay, repeat until shutdown
//!
//! Escalation (escalation.rs):
//!     Probe outcome
//!     → Update state.rs
//!     → Alert through the notifier once the retry budget is exhausted
//!
//! State machine (state.rs):
//!     Normal ←→ Retrying
//!     One alert per failure episode
//! ```
//!
//! # Design Decisions
//! - Two fixed intervals, no backoff curve
//! - Monitoring never stops on its own, even after alerting
//! - All per-cycle errors are absorbed into outcomes and logs

pub mod escalation;
pub mod prober;
pub mod scheduler;
pub mod state;

pub use escalation::Escalator;
pub use prober::{HttpProber, ProbeError, ProbeOutcome, Prober};
pub use scheduler::Scheduler;
pub use state::{EscalationPolicy, Mode, MonitorState, Step, Transition};

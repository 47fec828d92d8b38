//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → Metrics exporter → Prober + Notifier → Scheduler
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Broadcast → Scheduler loop exits → Process exits 0
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: configuration and construction errors abort before monitoring
//! - Shutdown does not wait for an in-flight probe or alert

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Scheduler and escalation produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters and gauges)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Every probe result, mode change and alert attempt is a log event
//! - Metrics are in-memory only; nothing is persisted
//! - Metric updates are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;

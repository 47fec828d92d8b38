//! Alert notification subsystem.
//!
//! # Data Flow
//! ```text
//! Escalation decides an alert is due
//!     → AlertEpisode (target, failure count, timestamp)
//!     → message.rs (subject, HTML and plain-text bodies)
//!     → email.rs (SMTP delivery with transport timeout)
//!     → Ok(()) or NotifyError back to the escalation step
//! ```
//!
//! # Design Decisions
//! - A single notifier per process
//! - Delivery failures are returned, never swallowed, so the caller can retry
//!   on the next failing cycle

pub mod email;
pub mod message;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use url::Url;

pub use email::EmailNotifier;

/// A failure episode that exhausted its retry budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEpisode {
    pub target: Url,
    /// Consecutive failures observed when the alert was raised.
    pub failures: u32,
    pub max_retries: u32,
    pub retry_interval: Duration,
    pub detected_at: DateTime<Utc>,
}

/// Errors that can occur while delivering an alert.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Sender or recipient could not be parsed.
    #[error("Invalid address: {0}")]
    Address(String),

    /// The message could not be assembled.
    #[error("Message error: {0}")]
    Message(#[from] lettre::error::Error),

    /// The transport rejected or failed to deliver the message.
    #[error("Transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Delivers alerts for failure episodes.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one alert.
    async fn notify(&self, episode: &AlertEpisode) -> Result<(), NotifyError>;

    /// Notifier name for logs and metrics.
    fn name(&self) -> &str;
}

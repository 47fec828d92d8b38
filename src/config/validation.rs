//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the target URL is probeable
//! - Validate value ranges (intervals > 0, ports valid, status codes valid)
//! - Check the alert transport is fully configured
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WatchdogConfig → Result<(), Vec<ValidationError>>
//! - Runs before the scheduler loop starts; any error is fatal

use lettre::message::Mailbox;
use thiserror::Error;
use url::Url;

use crate::config::schema::WatchdogConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("{field} is not a valid URL: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    #[error("{field} must use http or https, got '{scheme}'")]
    UnsupportedScheme { field: &'static str, scheme: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{field} must be a valid HTTP status code, got {value}")]
    InvalidStatus { field: &'static str, value: u16 },

    #[error("{field} is not a valid mailbox: {reason}")]
    InvalidMailbox { field: &'static str, reason: String },
}

/// Validate a fully assembled configuration.
pub fn validate_config(config: &WatchdogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let target = &config.target;
    if target.url.trim().is_empty() {
        errors.push(ValidationError::Missing("SERVICE_URL"));
    } else {
        match Url::parse(&target.url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(ValidationError::UnsupportedScheme {
                field: "SERVICE_URL",
                scheme: url.scheme().to_string(),
            }),
            Err(e) => errors.push(ValidationError::InvalidUrl {
                field: "SERVICE_URL",
                reason: e.to_string(),
            }),
        }
    }
    if target.timeout_secs == 0 {
        errors.push(ValidationError::Zero("target.timeout_secs"));
    }
    if !(100..=599).contains(&target.failure_status) {
        errors.push(ValidationError::InvalidStatus {
            field: "target.failure_status",
            value: target.failure_status,
        });
    }

    let schedule = &config.schedule;
    if schedule.normal_interval_secs == 0 {
        errors.push(ValidationError::Zero("schedule.normal_interval_secs"));
    }
    if schedule.retry_interval_secs == 0 {
        errors.push(ValidationError::Zero("schedule.retry_interval_secs"));
    }

    let smtp = &config.smtp;
    if smtp.host.trim().is_empty() {
        errors.push(ValidationError::Missing("SMTP_HOST"));
    }
    if smtp.port == 0 {
        errors.push(ValidationError::Zero("SMTP_PORT"));
    }
    if smtp.username.is_empty() {
        errors.push(ValidationError::Missing("SMTP_USER"));
    }
    if smtp.password.is_empty() {
        errors.push(ValidationError::Missing("SMTP_PASS"));
    }
    if smtp.timeout_secs == 0 {
        errors.push(ValidationError::Zero("smtp.timeout_secs"));
    }
    check_mailbox(&mut errors, "EMAIL_FROM", &smtp.from);
    check_mailbox(&mut errors, "ALERT_EMAIL", &smtp.to);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_mailbox(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Missing(field));
        return;
    }
    if let Err(e) = value.parse::<Mailbox>() {
        errors.push(ValidationError::InvalidMailbox {
            field,
            reason: e.to_string(),
        });
    }
}

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML, path in WATCHDOG_CONFIG)
//!     → loader.rs (parse & deserialize)
//!     → environment variables override file values
//!       (process environment first, then a `.env` file)
//!     → validation.rs (semantic checks)
//!     → WatchdogConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload
//! - All fields have defaults so only the required variables must be set
//! - Validation separates syntactic (serde) from semantic checks
//! - Any configuration error is fatal before monitoring starts

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_from, read_env_file, with_env_file, ConfigError};
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::ScheduleConfig;
pub use schema::SmtpConfig;
pub use schema::TargetConfig;
pub use schema::WatchdogConfig;

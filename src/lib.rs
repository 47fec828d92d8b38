//! Single-endpoint service watchdog library.

pub mod config;
pub mod health;
pub mod lifecycle;
pub mod notify;
pub mod observability;

pub use config::schema::WatchdogConfig;
pub use health::Scheduler;
pub use lifecycle::Shutdown;

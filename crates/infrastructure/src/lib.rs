//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and owns process-wide
//! setup: configuration loading and tracing.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ErrorStatusPolicy, LogFormat};
pub use telemetry::{DEFAULT_LOG_FILTER, TelemetryError, init_tracing};

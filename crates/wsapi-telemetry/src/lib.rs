//! Structured logging for wsapi services.
//!
//! Parameter accessors emit `tracing` events (undeclared parameters at
//! `warn`, deprecated-key and default fallbacks at `debug`). This crate
//! installs the subscriber that renders them, as JSON or human-readable
//! output.
//!
//! # Example
//!
//! ```rust,ignore
//! use wsapi_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::production())?;
//! tracing::info!(action = "api/issues/search", "Serving request");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

//! Layered configuration for wsapi services.
//!
//! This crate loads a [`WsConfig`] with support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides for logging
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! Besides logging settings, a configuration may declare controllers,
//! actions and parameters. [`WsConfig::register`] feeds them through the
//! same builders as code-declared definitions.
//!
//! # Configuration File Format
//!
//! ```toml
//! [logging]
//! enabled = true
//! level = "info,wsapi_request=debug"
//! format = "json"
//! include_location = false
//!
//! [[controllers]]
//! path = "api/issues"
//! since = "3.6"
//!
//! [[controllers.actions]]
//! key = "search"
//!
//! [[controllers.actions.params]]
//! key = "componentKey"
//! deprecated_key = "component"
//!
//! [[controllers.actions.params]]
//! key = "statuses"
//! possible_values = ["OPEN", "CLOSED"]
//! ```
//!
//! # Environment Variable Overrides
//!
//! Logging settings can be overridden with `PREFIX__LOGGING__KEY`:
//!
//! - `WSAPI__LOGGING__LEVEL=debug`
//! - `WSAPI__LOGGING__FORMAT=pretty`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::WsConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{ActionConfig, ControllerConfig, LogFormat, LoggingConfig, ParamConfig};

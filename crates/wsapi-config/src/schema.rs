//! Configuration section types.

use serde::{Deserialize, Serialize};
use wsapi_telemetry::LogConfig;

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive (trace, debug, info, warn, error or per-target directives).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Converts this section into the settings [`wsapi_telemetry::init_logging`] expects.
    ///
    /// ```
    /// use wsapi_config::{LogFormat, LoggingConfig};
    ///
    /// let section = LoggingConfig {
    ///     format: LogFormat::Pretty,
    ///     ..LoggingConfig::default()
    /// };
    /// assert!(!section.to_log_config().json_format);
    /// ```
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        let preset = match self.format {
            LogFormat::Json => LogConfig::production(),
            LogFormat::Pretty => LogConfig::development(),
        };
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            file_line_info: self.include_location,
            ..preset
        }
    }
}

/// A controller declared in configuration.
///
/// ```toml
/// [[controllers]]
/// path = "api/issues"
///
/// [[controllers.actions]]
/// key = "search"
///
/// [[controllers.actions.params]]
/// key = "ps"
/// default_value = "100"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ControllerConfig {
    /// Controller path, e.g. `api/issues`.
    pub path: String,

    /// Description.
    #[serde(default)]
    pub description: Option<String>,

    /// Version that introduced the controller.
    #[serde(default)]
    pub since: Option<String>,

    /// Actions, in declaration order.
    #[serde(default)]
    pub actions: Vec<ActionConfig>,
}

/// An action declared in configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ActionConfig {
    /// Action key, unique within its controller.
    pub key: String,

    /// Description.
    #[serde(default)]
    pub description: Option<String>,

    /// Version that introduced the action.
    #[serde(default)]
    pub since: Option<String>,

    /// POST-only action.
    #[serde(default)]
    pub post: bool,

    /// Hidden from public documentation.
    #[serde(default)]
    pub internal: bool,

    /// Parameters, in declaration order.
    #[serde(default)]
    pub params: Vec<ParamConfig>,
}

/// A parameter declared in configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ParamConfig {
    /// Parameter key, unique within its action.
    pub key: String,

    /// Description.
    #[serde(default)]
    pub description: Option<String>,

    /// Example value for documentation.
    #[serde(default)]
    pub example_value: Option<String>,

    /// Documented as required.
    #[serde(default)]
    pub required: bool,

    /// Value used when the request carries none.
    #[serde(default)]
    pub default_value: Option<String>,

    /// Legacy key still accepted.
    #[serde(default)]
    pub deprecated_key: Option<String>,

    /// Version that deprecated the legacy key.
    #[serde(default)]
    pub deprecated_since: Option<String>,

    /// Version that introduced the parameter.
    #[serde(default)]
    pub since: Option<String>,

    /// Hidden from public documentation.
    #[serde(default)]
    pub internal: bool,

    /// Allowed values. Absent or empty means unrestricted.
    #[serde(default)]
    pub possible_values: Option<Vec<String>>,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

//! Root configuration type.

use serde::{Deserialize, Serialize};
use wsapi_core::{Context, NewAction, NewParam};

use crate::{ActionConfig, ConfigError, ControllerConfig, LogFormat, LoggingConfig, ParamConfig};

/// Complete wsapi service configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use wsapi_config::WsConfig;
/// use wsapi_core::Context;
///
/// let config: WsConfig = toml::from_str(r#"
///     [[controllers]]
///     path = "api/issues"
///
///     [[controllers.actions]]
///     key = "search"
///     params = [{ key = "ps", default_value = "100" }]
/// "#).unwrap();
///
/// let mut context = Context::new();
/// config.register(&mut context).unwrap();
///
/// let search = context.action("api/issues", "search").unwrap();
/// assert_eq!(search.param("ps").unwrap().default_value(), Some("100"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct WsConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Declared controllers, in registration order.
    #[serde(default)]
    pub controllers: Vec<ControllerConfig>,
}

impl WsConfig {
    /// Creates a development preset: pretty debug logs with source locations.
    #[must_use]
    pub fn development() -> Self {
        Self {
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
                include_location: true,
                ..LoggingConfig::default()
            },
            controllers: Vec::new(),
        }
    }

    /// Creates a production preset: JSON info logs.
    #[must_use]
    pub fn production() -> Self {
        Self {
            logging: LoggingConfig {
                format: LogFormat::Json,
                ..LoggingConfig::default()
            },
            controllers: Vec::new(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a malformed log filter and
    /// `ConfigError::Definition` for any controller the builders would reject.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logging.enabled {
            wsapi_telemetry::create_env_filter(&self.logging.level)
                .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))?;
        }

        self.register(&mut Context::new())
    }

    /// Declares every configured controller in `context`.
    ///
    /// Controllers go through the same builders as code-declared ones, so
    /// they are validated identically. Controllers registered before a
    /// failing one stay registered.
    pub fn register(&self, context: &mut Context) -> Result<(), ConfigError> {
        for controller in &self.controllers {
            let mut new_controller = context.create_controller(controller.path.as_str());
            if let Some(description) = &controller.description {
                new_controller.set_description(description.as_str());
            }
            if let Some(since) = &controller.since {
                new_controller.set_since(since.as_str());
            }
            for action in &controller.actions {
                declare_action(new_controller.create_action(action.key.as_str()), action);
            }
            new_controller.done()?;
        }
        Ok(())
    }
}

fn declare_action(new_action: &mut NewAction, action: &ActionConfig) {
    new_action
        .set_post(action.post)
        .set_internal(action.internal);
    if let Some(description) = &action.description {
        new_action.set_description(description.as_str());
    }
    if let Some(since) = &action.since {
        new_action.set_since(since.as_str());
    }
    for param in &action.params {
        declare_param(new_action.create_param(param.key.as_str()), param);
    }
}

fn declare_param(new_param: &mut NewParam, param: &ParamConfig) {
    new_param
        .set_required(param.required)
        .set_internal(param.internal);
    if let Some(description) = &param.description {
        new_param.set_description(description.as_str());
    }
    if let Some(example) = &param.example_value {
        new_param.set_example_value(example.as_str());
    }
    if let Some(default) = &param.default_value {
        new_param.set_default_value(default.as_str());
    }
    if let Some(deprecated_key) = &param.deprecated_key {
        new_param.set_deprecated_key(deprecated_key.as_str());
    }
    if let Some(version) = &param.deprecated_since {
        new_param.set_deprecated_since(version.as_str());
    }
    if let Some(since) = &param.since {
        new_param.set_since(since.as_str());
    }
    if let Some(values) = &param.possible_values {
        new_param.set_possible_values(values.iter().map(String::as_str));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wsapi_core::DefinitionError;

    fn issues_controller() -> ControllerConfig {
        ControllerConfig {
            path: "api/issues".to_string(),
            description: Some("Issues".to_string()),
            since: Some("3.6".to_string()),
            actions: vec![ActionConfig {
                key: "search".to_string(),
                post: false,
                params: vec![
                    ParamConfig {
                        key: "statuses".to_string(),
                        possible_values: Some(vec!["OPEN".to_string(), "CLOSED".to_string()]),
                        ..ParamConfig::default()
                    },
                    ParamConfig {
                        key: "componentKey".to_string(),
                        deprecated_key: Some("component".to_string()),
                        deprecated_since: Some("6.0".to_string()),
                        ..ParamConfig::default()
                    },
                ],
                ..ActionConfig::default()
            }],
        }
    }

    #[test]
    fn test_default_config() {
        let config = WsConfig::default();
        assert!(config.controllers.is_empty());
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let dev = WsConfig::development();
        assert_eq!(dev.logging.level, "debug");
        assert_eq!(dev.logging.format, LogFormat::Pretty);
        assert!(dev.logging.include_location);

        let prod = WsConfig::production();
        assert_eq!(prod.logging.format, LogFormat::Json);
        assert!(!prod.logging.include_location);
    }

    #[test]
    fn test_register_declares_controllers() {
        let config = WsConfig {
            controllers: vec![issues_controller()],
            ..WsConfig::default()
        };
        let mut context = Context::new();
        config.register(&mut context).unwrap();

        let controller = context.controller("api/issues").unwrap();
        assert_eq!(controller.description(), Some("Issues"));
        assert_eq!(controller.since(), Some("3.6"));

        let search = context.action("api/issues", "search").unwrap();
        let statuses = search.param("statuses").unwrap();
        let values: Vec<&str> = statuses.possible_values().unwrap().iter().map(String::as_str).collect();
        assert_eq!(values, vec!["OPEN", "CLOSED"]);

        let component = search.resolve_param("component").unwrap();
        assert_eq!(component.key(), "componentKey");
        assert_eq!(component.deprecated_since(), Some("6.0"));
    }

    #[test]
    fn test_validate_rejects_bad_definitions() {
        let mut controller = issues_controller();
        controller.actions[0].params.push(ParamConfig {
            key: "statuses".to_string(),
            ..ParamConfig::default()
        });
        let config = WsConfig {
            controllers: vec![controller],
            ..WsConfig::default()
        };

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Definition(DefinitionError::DuplicateParam { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_controller_without_actions() {
        let config = WsConfig {
            controllers: vec![ControllerConfig {
                path: "api/empty".to_string(),
                ..ControllerConfig::default()
            }],
            ..WsConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Definition(DefinitionError::NoActions { .. }))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_log_level() {
        let config = WsConfig {
            logging: LoggingConfig {
                level: "wsapi=loud".to_string(),
                ..LoggingConfig::default()
            },
            ..WsConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_deserialize_rejects_unknown_sections() {
        let result: Result<WsConfig, _> = toml::from_str("[server]\nhttp_addr = \"0.0.0.0:80\"");
        assert!(result.is_err());
    }
}

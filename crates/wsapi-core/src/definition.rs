//! Web-service definitions: controllers, actions and their parameters.
//!
//! Definitions are declared through builders and become read-only once the
//! controller is finalized with [`NewController::done`]. Finalized actions are
//! shared as `Arc<Action>` so request accessors can hold them cheaply.
//!
//! # Example
//!
//! ```
//! use wsapi_core::definition::Context;
//!
//! let mut context = Context::new();
//! let mut controller = context.create_controller("api/issues");
//! let action = controller.create_action("search").set_since("5.2");
//! action.create_param("ps").set_default_value("100");
//! action
//!     .create_param("statuses")
//!     .set_possible_values(["OPEN", "CLOSED"]);
//! action.create_param("componentKey").set_deprecated_key("component");
//! controller.done().unwrap();
//!
//! let search = context.controller("api/issues").unwrap().action("search").unwrap();
//! assert_eq!(search.path(), "api/issues/search");
//! assert_eq!(search.param("ps").unwrap().default_value(), Some("100"));
//! assert_eq!(search.resolve_param("component").unwrap().key(), "componentKey");
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::{DefinitionError, ParamEnum};

/// Possible values declared by [`NewParam::set_boolean_possible_values`].
pub const BOOLEAN_POSSIBLE_VALUES: [&str; 4] = ["true", "false", "yes", "no"];

/// Registry of all finalized controllers.
#[derive(Debug, Default)]
pub struct Context {
    controllers: IndexMap<String, Controller>,
}

impl Context {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts declaring a controller. Call [`NewController::done`] to register it.
    pub fn create_controller(&mut self, path: impl Into<String>) -> NewController<'_> {
        NewController {
            context: self,
            path: path.into(),
            description: None,
            since: None,
            actions: Vec::new(),
        }
    }

    /// Looks up a controller by path.
    #[must_use]
    pub fn controller(&self, path: &str) -> Option<&Controller> {
        self.controllers.get(path)
    }

    /// Returns all controllers in registration order.
    pub fn controllers(&self) -> impl Iterator<Item = &Controller> {
        self.controllers.values()
    }

    /// Looks up an action by controller path and action key.
    #[must_use]
    pub fn action(&self, controller: &str, action: &str) -> Option<Arc<Action>> {
        self.controller(controller)
            .and_then(|c| c.action(action))
            .cloned()
    }

    fn register(&mut self, controller: Controller) -> Result<(), DefinitionError> {
        if self.controllers.contains_key(&controller.path) {
            return Err(DefinitionError::DuplicateController {
                path: controller.path,
            });
        }
        tracing::debug!(
            controller = %controller.path,
            actions = controller.actions.len(),
            "Controller registered"
        );
        self.controllers.insert(controller.path.clone(), controller);
        Ok(())
    }
}

/// A finalized group of actions sharing a path prefix.
#[derive(Debug, Clone)]
pub struct Controller {
    path: String,
    description: Option<String>,
    since: Option<String>,
    actions: IndexMap<String, Arc<Action>>,
}

impl Controller {
    /// Returns the controller path (e.g. `api/issues`).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the version that introduced the controller.
    #[must_use]
    pub fn since(&self) -> Option<&str> {
        self.since.as_deref()
    }

    /// Looks up an action by key.
    #[must_use]
    pub fn action(&self, key: &str) -> Option<&Arc<Action>> {
        self.actions.get(key)
    }

    /// Returns all actions in declaration order.
    pub fn actions(&self) -> impl Iterator<Item = &Arc<Action>> {
        self.actions.values()
    }
}

/// A finalized web-service action and its parameter definitions.
#[derive(Debug, Clone)]
pub struct Action {
    key: String,
    path: String,
    description: Option<String>,
    since: Option<String>,
    post: bool,
    internal: bool,
    params: IndexMap<String, Param>,
    deprecated_keys: HashMap<String, String>,
}

impl Action {
    /// Returns the action key (e.g. `search`).
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the full path (`controller/key`).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the version that introduced the action.
    #[must_use]
    pub fn since(&self) -> Option<&str> {
        self.since.as_deref()
    }

    /// Returns true if the action must be called with POST.
    #[must_use]
    pub fn is_post(&self) -> bool {
        self.post
    }

    /// Returns true if the action is not part of the public API.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.internal
    }

    /// Looks up a parameter by its exact key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&Param> {
        self.params.get(key)
    }

    /// Looks up a parameter by its deprecated key.
    #[must_use]
    pub fn param_by_deprecated_key(&self, deprecated_key: &str) -> Option<&Param> {
        self.deprecated_keys
            .get(deprecated_key)
            .and_then(|key| self.params.get(key))
    }

    /// Looks up a parameter by key, falling back to deprecated keys.
    #[must_use]
    pub fn resolve_param(&self, key: &str) -> Option<&Param> {
        self.param(key)
            .or_else(|| self.param_by_deprecated_key(key))
    }

    /// Returns all parameters in declaration order.
    pub fn params(&self) -> impl Iterator<Item = &Param> {
        self.params.values()
    }
}

/// A finalized parameter definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    key: String,
    description: Option<String>,
    example_value: Option<String>,
    required: bool,
    default_value: Option<String>,
    deprecated_key: Option<String>,
    deprecated_since: Option<String>,
    since: Option<String>,
    internal: bool,
    possible_values: Option<IndexSet<String>>,
}

impl Param {
    /// Returns the key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns an example value for documentation.
    #[must_use]
    pub fn example_value(&self) -> Option<&str> {
        self.example_value.as_deref()
    }

    /// Returns true if the parameter is documented as required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the value used when the request carries none.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Returns the legacy key still accepted for this parameter.
    #[must_use]
    pub fn deprecated_key(&self) -> Option<&str> {
        self.deprecated_key.as_deref()
    }

    /// Returns the version that deprecated the legacy key.
    #[must_use]
    pub fn deprecated_since(&self) -> Option<&str> {
        self.deprecated_since.as_deref()
    }

    /// Returns the version that introduced the parameter.
    #[must_use]
    pub fn since(&self) -> Option<&str> {
        self.since.as_deref()
    }

    /// Returns true if the parameter is not part of the public API.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.internal
    }

    /// Returns the allowed values in declaration order, if restricted.
    #[must_use]
    pub fn possible_values(&self) -> Option<&IndexSet<String>> {
        self.possible_values.as_ref()
    }

    /// Returns true if `value` is allowed by this definition.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        self.possible_values
            .as_ref()
            .map_or(true, |values| values.contains(value))
    }
}

/// Builder for a controller. Borrows the [`Context`] until [`done`](Self::done).
#[derive(Debug)]
#[must_use = "a controller is only registered once `done` is called"]
pub struct NewController<'a> {
    context: &'a mut Context,
    path: String,
    description: Option<String>,
    since: Option<String>,
    actions: Vec<NewAction>,
}

impl NewController<'_> {
    /// Sets the description.
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the version that introduced the controller.
    pub fn set_since(&mut self, since: impl Into<String>) -> &mut Self {
        self.since = Some(since.into());
        self
    }

    /// Starts declaring an action.
    pub fn create_action(&mut self, key: impl Into<String>) -> &mut NewAction {
        let index = self.actions.len();
        self.actions.push(NewAction::new(key.into()));
        &mut self.actions[index]
    }

    /// Validates the declarations and registers the controller.
    pub fn done(self) -> Result<(), DefinitionError> {
        let Self {
            context,
            path,
            description,
            since,
            actions: new_actions,
        } = self;

        if path.is_empty() {
            return Err(DefinitionError::EmptyControllerPath);
        }
        if new_actions.is_empty() {
            return Err(DefinitionError::NoActions { path });
        }

        let mut actions = IndexMap::with_capacity(new_actions.len());
        for new_action in new_actions {
            if new_action.key.is_empty() {
                return Err(DefinitionError::EmptyKey {
                    controller: path,
                    what: "action",
                });
            }
            if actions.contains_key(&new_action.key) {
                return Err(DefinitionError::DuplicateAction {
                    controller: path,
                    action: new_action.key,
                });
            }
            let action = new_action.build(&path)?;
            actions.insert(action.key.clone(), Arc::new(action));
        }

        context.register(Controller {
            path,
            description,
            since,
            actions,
        })
    }
}

/// Builder for an action.
#[derive(Debug)]
pub struct NewAction {
    key: String,
    description: Option<String>,
    since: Option<String>,
    post: bool,
    internal: bool,
    params: Vec<NewParam>,
}

impl NewAction {
    fn new(key: String) -> Self {
        Self {
            key,
            description: None,
            since: None,
            post: false,
            internal: false,
            params: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the version that introduced the action.
    pub fn set_since(&mut self, since: impl Into<String>) -> &mut Self {
        self.since = Some(since.into());
        self
    }

    /// Marks the action as POST-only.
    pub fn set_post(&mut self, post: bool) -> &mut Self {
        self.post = post;
        self
    }

    /// Marks the action as internal.
    pub fn set_internal(&mut self, internal: bool) -> &mut Self {
        self.internal = internal;
        self
    }

    /// Starts declaring a parameter.
    pub fn create_param(&mut self, key: impl Into<String>) -> &mut NewParam {
        let index = self.params.len();
        self.params.push(NewParam::new(key.into()));
        &mut self.params[index]
    }

    fn build(self, controller: &str) -> Result<Action, DefinitionError> {
        let path = format!("{controller}/{}", self.key);
        let mut params: IndexMap<String, Param> = IndexMap::with_capacity(self.params.len());
        let mut deprecated_keys = HashMap::new();

        for new_param in self.params {
            let param = new_param.build();
            if param.key.is_empty() {
                return Err(DefinitionError::EmptyKey {
                    controller: controller.to_string(),
                    what: "parameter",
                });
            }
            if params.contains_key(&param.key) {
                return Err(DefinitionError::DuplicateParam {
                    action: path,
                    param: param.key,
                });
            }
            if let Some(deprecated) = &param.deprecated_key {
                deprecated_keys.insert(deprecated.clone(), param.key.clone());
            }
            params.insert(param.key.clone(), param);
        }

        check_deprecated_keys(&path, &params)?;

        Ok(Action {
            key: self.key,
            path,
            description: self.description,
            since: self.since,
            post: self.post,
            internal: self.internal,
            params,
            deprecated_keys,
        })
    }
}

// A deprecated key must not shadow any key or another deprecated key.
fn check_deprecated_keys(
    action: &str,
    params: &IndexMap<String, Param>,
) -> Result<(), DefinitionError> {
    let mut seen = HashSet::new();
    for param in params.values() {
        let Some(deprecated) = param.deprecated_key.as_deref() else {
            continue;
        };
        if params.contains_key(deprecated) || !seen.insert(deprecated) {
            return Err(DefinitionError::DeprecatedKeyConflict {
                action: action.to_string(),
                param: param.key.clone(),
                deprecated_key: deprecated.to_string(),
            });
        }
    }
    Ok(())
}

/// Builder for a parameter.
#[derive(Debug)]
pub struct NewParam {
    key: String,
    description: Option<String>,
    example_value: Option<String>,
    required: bool,
    default_value: Option<String>,
    deprecated_key: Option<String>,
    deprecated_since: Option<String>,
    since: Option<String>,
    internal: bool,
    possible_values: Option<IndexSet<String>>,
}

impl NewParam {
    fn new(key: String) -> Self {
        Self {
            key,
            description: None,
            example_value: None,
            required: false,
            default_value: None,
            deprecated_key: None,
            deprecated_since: None,
            since: None,
            internal: false,
            possible_values: None,
        }
    }

    /// Sets the description.
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    /// Sets an example value for documentation.
    pub fn set_example_value(&mut self, example: impl Into<String>) -> &mut Self {
        self.example_value = Some(example.into());
        self
    }

    /// Documents the parameter as required.
    pub fn set_required(&mut self, required: bool) -> &mut Self {
        self.required = required;
        self
    }

    /// Sets the value used when the request carries none.
    pub fn set_default_value(&mut self, default: impl Into<String>) -> &mut Self {
        self.default_value = Some(default.into());
        self
    }

    /// Sets a legacy key still accepted for this parameter.
    pub fn set_deprecated_key(&mut self, deprecated_key: impl Into<String>) -> &mut Self {
        self.deprecated_key = Some(deprecated_key.into());
        self
    }

    /// Sets the version that deprecated the legacy key.
    pub fn set_deprecated_since(&mut self, version: impl Into<String>) -> &mut Self {
        self.deprecated_since = Some(version.into());
        self
    }

    /// Sets the version that introduced the parameter.
    pub fn set_since(&mut self, since: impl Into<String>) -> &mut Self {
        self.since = Some(since.into());
        self
    }

    /// Marks the parameter as internal.
    pub fn set_internal(&mut self, internal: bool) -> &mut Self {
        self.internal = internal;
        self
    }

    /// Restricts the parameter to the given values. An empty list removes the restriction.
    pub fn set_possible_values<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: IndexSet<String> = values.into_iter().map(Into::into).collect();
        self.possible_values = (!values.is_empty()).then_some(values);
        self
    }

    /// Restricts the parameter to `true`, `false`, `yes` and `no`.
    pub fn set_boolean_possible_values(&mut self) -> &mut Self {
        self.set_possible_values(BOOLEAN_POSSIBLE_VALUES)
    }

    /// Restricts the parameter to the member names of `E`.
    pub fn set_enum_possible_values<E: ParamEnum>(&mut self) -> &mut Self {
        self.set_possible_values(E::names())
    }

    fn build(self) -> Param {
        Param {
            key: self.key,
            description: self.description,
            example_value: self.example_value,
            required: self.required,
            default_value: self.default_value,
            deprecated_key: self.deprecated_key,
            deprecated_since: self.deprecated_since,
            since: self.since,
            internal: self.internal,
            possible_values: self.possible_values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_action(build: impl FnOnce(&mut NewAction)) -> Result<Context, DefinitionError> {
        let mut context = Context::new();
        let mut controller = context.create_controller("api/test");
        build(controller.create_action("act"));
        controller.done()?;
        Ok(context)
    }

    #[test]
    fn test_controller_registration() {
        let mut context = Context::new();
        let mut controller = context.create_controller("api/rules");
        controller.set_description("Rules").set_since("4.4");
        controller
            .create_action("search")
            .set_post(false)
            .create_param("q")
            .set_description("Query");
        controller.create_action("create").set_post(true).set_internal(true);
        controller.done().unwrap();

        let rules = context.controller("api/rules").unwrap();
        assert_eq!(rules.description(), Some("Rules"));
        assert_eq!(rules.since(), Some("4.4"));
        let keys: Vec<_> = rules.actions().map(|a| a.key().to_string()).collect();
        assert_eq!(keys, vec!["search", "create"]);

        let create = context.action("api/rules", "create").unwrap();
        assert!(create.is_post());
        assert!(create.is_internal());
        assert_eq!(create.path(), "api/rules/create");
    }

    #[test]
    fn test_param_attributes() {
        let context = single_action(|action| {
            action
                .create_param("p")
                .set_required(true)
                .set_example_value("ex")
                .set_since("6.0")
                .set_deprecated_key("old_p")
                .set_deprecated_since("6.1")
                .set_internal(true);
        })
        .unwrap();

        let action = context.action("api/test", "act").unwrap();
        let param = action.param("p").unwrap();
        assert!(param.is_required());
        assert_eq!(param.example_value(), Some("ex"));
        assert_eq!(param.since(), Some("6.0"));
        assert_eq!(param.deprecated_key(), Some("old_p"));
        assert_eq!(param.deprecated_since(), Some("6.1"));
        assert!(param.is_internal());
        assert_eq!(action.param_by_deprecated_key("old_p").unwrap().key(), "p");
        assert!(action.param("old_p").is_none());
    }

    #[test]
    fn test_possible_values_keep_declaration_order() {
        let context = single_action(|action| {
            action.create_param("p").set_possible_values(["foo", "bar", "foo"]);
            action.create_param("b").set_boolean_possible_values();
            action.create_param("none").set_possible_values(Vec::<String>::new());
        })
        .unwrap();

        let action = context.action("api/test", "act").unwrap();
        let values: Vec<_> = action.param("p").unwrap().possible_values().unwrap().iter().cloned().collect();
        assert_eq!(values, vec!["foo", "bar"]);
        assert!(action.param("b").unwrap().accepts("yes"));
        assert!(!action.param("b").unwrap().accepts("oui"));
        assert!(action.param("none").unwrap().possible_values().is_none());
        assert!(action.param("none").unwrap().accepts("anything"));
    }

    #[test]
    fn test_duplicate_controller_rejected() {
        let mut context = Context::new();
        let mut first = context.create_controller("api/a");
        first.create_action("x");
        first.done().unwrap();

        let mut second = context.create_controller("api/a");
        second.create_action("y");
        assert_eq!(
            second.done(),
            Err(DefinitionError::DuplicateController { path: "api/a".into() })
        );
    }

    #[test]
    fn test_controller_without_actions_rejected() {
        let mut context = Context::new();
        let controller = context.create_controller("api/empty");
        assert!(matches!(controller.done(), Err(DefinitionError::NoActions { .. })));
        assert!(context.controller("api/empty").is_none());
    }

    #[test]
    fn test_duplicate_action_rejected() {
        let mut context = Context::new();
        let mut controller = context.create_controller("api/a");
        controller.create_action("x");
        controller.create_action("x");
        assert!(matches!(controller.done(), Err(DefinitionError::DuplicateAction { .. })));
    }

    #[test]
    fn test_duplicate_param_rejected() {
        let result = single_action(|action| {
            action.create_param("p");
            action.create_param("p");
        });
        assert!(matches!(result, Err(DefinitionError::DuplicateParam { .. })));
    }

    #[test]
    fn test_empty_keys_rejected() {
        let result = single_action(|action| {
            action.create_param("");
        });
        assert!(matches!(result, Err(DefinitionError::EmptyKey { what: "parameter", .. })));

        let mut context = Context::new();
        let mut controller = context.create_controller("");
        controller.create_action("x");
        assert_eq!(controller.done(), Err(DefinitionError::EmptyControllerPath));
    }

    #[test]
    fn test_deprecated_key_conflicts_rejected() {
        let shadowing = single_action(|action| {
            action.create_param("a");
            action.create_param("b").set_deprecated_key("a");
        });
        assert!(matches!(shadowing, Err(DefinitionError::DeprecatedKeyConflict { .. })));

        let own_key = single_action(|action| {
            action.create_param("a").set_deprecated_key("a");
        });
        assert!(matches!(own_key, Err(DefinitionError::DeprecatedKeyConflict { .. })));

        let shared = single_action(|action| {
            action.create_param("a").set_deprecated_key("old");
            action.create_param("b").set_deprecated_key("old");
        });
        assert!(matches!(shared, Err(DefinitionError::DeprecatedKeyConflict { .. })));
    }

    #[test]
    fn test_list_default_of_possible_values_accepted() {
        let context = single_action(|action| {
            action
                .create_param("qualifiers")
                .set_possible_values(["TRK", "VW"])
                .set_default_value("TRK,VW");
        })
        .unwrap();

        let action = context.action("api/test", "act").unwrap();
        assert_eq!(action.param("qualifiers").unwrap().default_value(), Some("TRK,VW"));
    }
}

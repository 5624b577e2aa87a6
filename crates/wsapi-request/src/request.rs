//! Typed, validated access to the parameters of one request.
//!
//! [`ValidatingRequest`] binds a [`RawRequest`] to the [`Action`] it targets.
//! Every string-keyed accessor follows the same pipeline:
//!
//! 1. resolve the definition (exact key, then deprecated key)
//! 2. read the raw value under the canonical key, then the deprecated key
//! 3. fall back to the definition default
//! 4. trim outer whitespace
//! 5. check possible values
//! 6. coerce to the requested type
//!
//! Input streams and parts are read straight from the raw request.

use std::io::Read;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate};
use http::Method;
use indexmap::IndexSet;
use tracing::{debug, warn};
use wsapi_core::coerce;
use wsapi_core::{Action, Param, ParamEnum, ParamError, ParamResult, Part};

use crate::RawRequest;

/// Parameter accessor for one request.
///
/// # Example
///
/// ```
/// use wsapi_core::definition::Context;
/// use wsapi_request::{HttpRequest, ValidatingRequest};
///
/// let mut context = Context::new();
/// let mut controller = context.create_controller("api/issues");
/// let action = controller.create_action("search");
/// action.create_param("ps").set_default_value("100");
/// action.create_param("statuses").set_possible_values(["OPEN", "CLOSED"]);
/// controller.done().unwrap();
///
/// let http = http::Request::get("/api/issues/search?statuses=OPEN,CLOSED")
///     .body(Vec::new())
///     .unwrap();
/// let raw = HttpRequest::from_http(&http).unwrap();
/// let request = ValidatingRequest::new(raw, context.action("api/issues", "search").unwrap());
///
/// assert_eq!(request.mandatory_param_as_int("ps").unwrap(), 100);
/// assert_eq!(request.param_as_strings("statuses").unwrap(), Some(vec!["OPEN", "CLOSED"]));
/// ```
#[derive(Debug)]
pub struct ValidatingRequest<R> {
    raw: R,
    action: Arc<Action>,
}

impl<R: RawRequest> ValidatingRequest<R> {
    /// Binds a raw request to its action definition.
    #[must_use]
    pub fn new(raw: R, action: Arc<Action>) -> Self {
        Self { raw, action }
    }

    /// Returns the bound action.
    #[must_use]
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Rebinds the request to another action.
    pub fn set_action(&mut self, action: Arc<Action>) {
        self.action = action;
    }

    /// Returns the raw request.
    #[must_use]
    pub fn raw(&self) -> &R {
        &self.raw
    }

    /// Returns the raw request mutably.
    pub fn raw_mut(&mut self) -> &mut R {
        &mut self.raw
    }

    /// Consumes the accessor and returns the raw request.
    #[must_use]
    pub fn into_raw(self) -> R {
        self.raw
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        self.raw.method()
    }

    /// Returns the media type of the request content.
    #[must_use]
    pub fn media_type(&self) -> &str {
        self.raw.media_type()
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.raw.path()
    }

    /// Returns true if the raw request carries a value under exactly `key`.
    ///
    /// Neither deprecated keys nor defaults are considered.
    #[must_use]
    pub fn has_param(&self, key: &str) -> bool {
        self.raw.has_param(key)
    }

    /// Returns the trimmed value, or the default, of a declared parameter.
    pub fn param(&self, key: &str) -> ParamResult<Option<&str>> {
        let (definition, value) = self.lookup(key)?;
        if let Some(value) = value {
            check_possible_value(key, value, definition)?;
        }
        Ok(value)
    }

    /// Like [`param`](Self::param), but fails if there is no value.
    pub fn mandatory_param(&self, key: &str) -> ParamResult<&str> {
        self.param(key)?.ok_or_else(|| ParamError::missing(key))
    }

    /// Reads a boolean (`true`/`yes`, `false`/`no`).
    pub fn param_as_boolean(&self, key: &str) -> ParamResult<Option<bool>> {
        self.param(key)?
            .map(|value| coerce::parse_boolean(key, value))
            .transpose()
    }

    /// Reads a mandatory boolean.
    pub fn mandatory_param_as_boolean(&self, key: &str) -> ParamResult<bool> {
        coerce::parse_boolean(key, self.mandatory_param(key)?)
    }

    /// Reads a 32-bit integer.
    pub fn param_as_int(&self, key: &str) -> ParamResult<Option<i32>> {
        self.param(key)?
            .map(|value| coerce::parse_int(key, value))
            .transpose()
    }

    /// Reads a 32-bit integer, using `default` when neither the request nor
    /// the definition provides a value.
    pub fn param_as_int_or(&self, key: &str, default: i32) -> ParamResult<i32> {
        Ok(self.param_as_int(key)?.unwrap_or(default))
    }

    /// Reads a mandatory 32-bit integer.
    pub fn mandatory_param_as_int(&self, key: &str) -> ParamResult<i32> {
        coerce::parse_int(key, self.mandatory_param(key)?)
    }

    /// Reads a 64-bit integer.
    pub fn param_as_long(&self, key: &str) -> ParamResult<Option<i64>> {
        self.param(key)?
            .map(|value| coerce::parse_long(key, value))
            .transpose()
    }

    /// Reads a 64-bit integer, using `default` when neither the request nor
    /// the definition provides a value.
    pub fn param_as_long_or(&self, key: &str, default: i64) -> ParamResult<i64> {
        Ok(self.param_as_long(key)?.unwrap_or(default))
    }

    /// Reads a mandatory 64-bit integer.
    pub fn mandatory_param_as_long(&self, key: &str) -> ParamResult<i64> {
        coerce::parse_long(key, self.mandatory_param(key)?)
    }

    /// Reads an enumeration member by exact name.
    pub fn param_as_enum<E: ParamEnum>(&self, key: &str) -> ParamResult<Option<E>> {
        self.param(key)?
            .map(|value| coerce::parse_enum(key, value))
            .transpose()
    }

    /// Reads a mandatory enumeration member.
    pub fn mandatory_param_as_enum<E: ParamEnum>(&self, key: &str) -> ParamResult<E> {
        coerce::parse_enum(key, self.mandatory_param(key)?)
    }

    /// Reads a comma-separated set of enumeration members.
    pub fn param_as_enums<E: ParamEnum>(&self, key: &str) -> ParamResult<Option<IndexSet<E>>> {
        let Some(values) = self.param_as_strings(key)? else {
            return Ok(None);
        };
        values
            .into_iter()
            .map(|value| coerce::parse_enum(key, value))
            .collect::<ParamResult<IndexSet<E>>>()
            .map(Some)
    }

    /// Reads a comma-separated list. Tokens are trimmed and empty tokens dropped.
    pub fn param_as_strings(&self, key: &str) -> ParamResult<Option<Vec<&str>>> {
        let (definition, value) = self.lookup(key)?;
        let Some(value) = value else {
            return Ok(None);
        };
        let values = coerce::split_list(value);
        for value in &values {
            check_possible_value(key, value, definition)?;
        }
        Ok(Some(values))
    }

    /// Reads a mandatory comma-separated list.
    ///
    /// An empty value yields an empty list; only an absent value fails.
    pub fn mandatory_param_as_strings(&self, key: &str) -> ParamResult<Vec<&str>> {
        self.param_as_strings(key)?
            .ok_or_else(|| ParamError::missing(key))
    }

    /// Reads every value sent under the key (repeated parameter, no comma split).
    ///
    /// Falls back to the definition default as a single value, or an empty list.
    pub fn multi_param(&self, key: &str) -> ParamResult<Vec<&str>> {
        let definition = self.definition(key)?;
        let mut values = self.raw.read_multi_param(definition.key());
        if values.is_empty() {
            if let Some(deprecated) = definition.deprecated_key() {
                values = self.raw.read_multi_param(deprecated);
            }
        }
        if values.is_empty() {
            values.extend(definition.default_value());
        }
        for value in &values {
            check_possible_value(key, value, definition)?;
        }
        Ok(values)
    }

    /// Like [`multi_param`](Self::multi_param), but fails if there is no value.
    pub fn mandatory_multi_param(&self, key: &str) -> ParamResult<Vec<&str>> {
        let values = self.multi_param(key)?;
        if values.is_empty() {
            return Err(ParamError::missing(key));
        }
        Ok(values)
    }

    /// Reads a strict `yyyy-MM-dd` date.
    pub fn param_as_date(&self, key: &str) -> ParamResult<Option<NaiveDate>> {
        self.param(key)?
            .map(|value| coerce::parse_date(key, value))
            .transpose()
    }

    /// Reads a mandatory `yyyy-MM-dd` date.
    pub fn mandatory_param_as_date(&self, key: &str) -> ParamResult<NaiveDate> {
        coerce::parse_date(key, self.mandatory_param(key)?)
    }

    /// Reads a date-time with offset, or a bare date as midnight UTC.
    pub fn param_as_date_time(&self, key: &str) -> ParamResult<Option<DateTime<FixedOffset>>> {
        self.param(key)?
            .map(|value| coerce::parse_date_time(key, value))
            .transpose()
    }

    /// Reads a mandatory date-time.
    pub fn mandatory_param_as_date_time(&self, key: &str) -> ParamResult<DateTime<FixedOffset>> {
        coerce::parse_date_time(key, self.mandatory_param(key)?)
    }

    /// Returns the raw value under `key` as a byte stream.
    ///
    /// An empty value yields an empty stream rather than `None`.
    pub fn param_as_input_stream(&self, key: &str) -> Option<Box<dyn Read + '_>> {
        self.raw.read_input_stream_param(key)
    }

    /// Returns the binary part uploaded under `key`.
    #[must_use]
    pub fn param_as_part(&self, key: &str) -> Option<&Part> {
        self.raw.read_part(key)
    }

    /// Returns the binary part uploaded under `key`, failing if absent.
    pub fn mandatory_param_as_part(&self, key: &str) -> ParamResult<&Part> {
        self.param_as_part(key)
            .ok_or_else(|| ParamError::missing(key))
    }

    fn definition(&self, key: &str) -> ParamResult<&Param> {
        self.action.resolve_param(key).ok_or_else(|| {
            warn!(param = key, action = %self.action.path(), "Parameter is not declared");
            ParamError::undefined(key, self.action.key())
        })
    }

    // Definition plus trimmed raw-or-default value.
    fn lookup(&self, key: &str) -> ParamResult<(&Param, Option<&str>)> {
        let definition = self.definition(key)?;
        let value = self
            .read_raw(definition)
            .or_else(|| {
                let default = definition.default_value()?;
                debug!(param = definition.key(), "Using default value");
                Some(default)
            })
            .map(str::trim);
        Ok((definition, value))
    }

    fn read_raw(&self, definition: &Param) -> Option<&str> {
        if let Some(value) = self.raw.read_param(definition.key()) {
            return Some(value);
        }
        let deprecated = definition.deprecated_key()?;
        let value = self.raw.read_param(deprecated)?;
        debug!(
            param = definition.key(),
            deprecated_key = deprecated,
            action = %self.action.path(),
            "Value supplied under deprecated key"
        );
        Some(value)
    }
}

fn check_possible_value(key: &str, value: &str, definition: &Param) -> ParamResult<()> {
    match definition.possible_values() {
        Some(possible) if !possible.contains(value) => {
            Err(ParamError::not_possible_value(key, value, possible))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use proptest::prelude::*;
    use wsapi_core::definition::Context;

    #[derive(Default)]
    struct MapRequest {
        method: Method,
        params: HashMap<String, String>,
        multi: HashMap<String, Vec<String>>,
    }

    impl MapRequest {
        fn with(mut self, key: &str, value: &str) -> Self {
            self.params.insert(key.to_string(), value.to_string());
            self
        }

        fn with_multi(mut self, key: &str, values: &[&str]) -> Self {
            self.multi
                .insert(key.to_string(), values.iter().map(|v| (*v).to_string()).collect());
            self
        }
    }

    impl RawRequest for MapRequest {
        fn method(&self) -> &Method {
            &self.method
        }

        fn media_type(&self) -> &str {
            "application/json"
        }

        fn path(&self) -> Option<&str> {
            None
        }

        fn has_param(&self, key: &str) -> bool {
            self.params.contains_key(key)
        }

        fn read_param(&self, key: &str) -> Option<&str> {
            self.params.get(key).map(String::as_str)
        }

        fn read_multi_param(&self, key: &str) -> Vec<&str> {
            self.multi
                .get(key)
                .map(|values| values.iter().map(String::as_str).collect())
                .unwrap_or_default()
        }

        fn read_part(&self, _key: &str) -> Option<&Part> {
            None
        }
    }

    fn action() -> Arc<Action> {
        let mut context = Context::new();
        let mut controller = context.create_controller("api/projects");
        let action = controller.create_action("search");
        action.create_param("projects").set_deprecated_key("projectKeys");
        action
            .create_param("qualifiers")
            .set_possible_values(["TRK", "VW"])
            .set_default_value("TRK");
        action.create_param("tags");
        controller.done().unwrap();
        context.action("api/projects", "search").unwrap()
    }

    #[test]
    fn test_canonical_key_wins_over_deprecated_key() {
        let request = ValidatingRequest::new(
            MapRequest::default()
                .with("projects", "new")
                .with("projectKeys", "old"),
            action(),
        );

        assert_eq!(request.param("projects").unwrap(), Some("new"));
    }

    #[test]
    fn test_deprecated_key_reaches_canonical_definition() {
        let request = ValidatingRequest::new(MapRequest::default().with("projectKeys", "old"), action());

        assert_eq!(request.param("projects").unwrap(), Some("old"));
        assert_eq!(request.param("projectKeys").unwrap(), Some("old"));
        assert!(!request.has_param("projects"));
        assert!(request.has_param("projectKeys"));
    }

    #[test]
    fn test_default_is_validated_and_split() {
        let request = ValidatingRequest::new(MapRequest::default(), action());

        assert_eq!(request.param_as_strings("qualifiers").unwrap(), Some(vec!["TRK"]));
        assert_eq!(request.multi_param("qualifiers").unwrap(), vec!["TRK"]);
    }

    #[test]
    fn test_list_default_is_checked_per_token_at_read_time() {
        let mut context = Context::new();
        let mut controller = context.create_controller("api/projects");
        let action = controller.create_action("search");
        action
            .create_param("qualifiers")
            .set_possible_values(["TRK", "VW"])
            .set_default_value("TRK,VW");
        action
            .create_param("sort")
            .set_possible_values(["name", "date"])
            .set_default_value("size");
        controller.done().unwrap();
        let request = ValidatingRequest::new(
            MapRequest::default(),
            context.action("api/projects", "search").unwrap(),
        );

        assert_eq!(request.param_as_strings("qualifiers").unwrap(), Some(vec!["TRK", "VW"]));
        assert_eq!(
            request.param("sort").unwrap_err().to_string(),
            "Value of parameter 'sort' (size) must be one of: [name, date]"
        );
    }

    #[test]
    fn test_each_token_is_checked_against_possible_values() {
        let request = ValidatingRequest::new(MapRequest::default().with("qualifiers", "TRK, APP"), action());

        let err = request.param_as_strings("qualifiers").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Value of parameter 'qualifiers' (APP) must be one of: [TRK, VW]"
        );
    }

    #[test]
    fn test_multi_param_reads_repeated_values() {
        let request = ValidatingRequest::new(
            MapRequest::default()
                .with("tags", "ignored,by,multi")
                .with_multi("tags", &["a,b", "c"]),
            action(),
        );

        assert_eq!(request.multi_param("tags").unwrap(), vec!["a,b", "c"]);
        assert_eq!(request.multi_param("projects").unwrap(), Vec::<&str>::new());
        assert!(request.mandatory_multi_param("projects").is_err());
    }

    #[test]
    fn test_multi_param_checks_possible_values() {
        let request = ValidatingRequest::new(MapRequest::default().with_multi("qualifiers", &["TRK", "BRC"]), action());

        assert!(matches!(
            request.multi_param("qualifiers"),
            Err(ParamError::NotPossibleValue { .. })
        ));
    }

    #[test]
    fn test_undefined_param_is_usage_fault() {
        let request = ValidatingRequest::new(MapRequest::default(), action());

        let err = request.param_as_int("unknown").unwrap_err();
        assert!(err.is_usage_fault());
        assert_eq!(
            err.to_string(),
            "BUG - parameter 'unknown' is undefined for action 'search'"
        );
    }

    #[test]
    fn test_set_action_rebinds_definitions() {
        let mut context = Context::new();
        let mut controller = context.create_controller("api/other");
        controller.create_action("show").create_param("id");
        controller.done().unwrap();

        let mut request = ValidatingRequest::new(MapRequest::default().with("id", "7"), action());
        assert!(request.param("id").is_err());

        request.set_action(context.action("api/other", "show").unwrap());
        assert_eq!(request.param_as_long("id").unwrap(), Some(7));
        assert_eq!(request.action().key(), "show");
    }

    proptest! {
        #[test]
        fn prop_values_are_trimmed(core in "[a-z0-9]([a-z0-9 ]{0,10}[a-z0-9])?", pad in "[ \t\r\n]{0,3}") {
            let raw = format!("{pad}{core}{pad}");
            let request = ValidatingRequest::new(MapRequest::default().with("tags", &raw), action());

            prop_assert_eq!(request.param("tags").unwrap(), Some(core.as_str()));
        }

        #[test]
        fn prop_int_parameters_round_trip(n in any::<i32>()) {
            let request = ValidatingRequest::new(MapRequest::default().with("tags", &n.to_string()), action());

            prop_assert_eq!(request.param_as_int("tags").unwrap(), Some(n));
            prop_assert_eq!(request.param_as_long("tags").unwrap(), Some(i64::from(n)));
        }
    }
}

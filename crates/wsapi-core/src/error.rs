//! Error types for parameter access and action definitions.
//!
//! [`ParamError`] is returned by every fallible accessor. It separates two
//! families of faults:
//!
//! | [`ErrorKind`] | Meaning | Status |
//! |---|---|---|
//! | `Usage` | The handler asked for a parameter its action never declared | 500 |
//! | `Validation` | The caller sent a missing, malformed or disallowed value | 400 |
//!
//! [`DefinitionError`] covers faults raised while controllers and actions are
//! being declared.

use http::StatusCode;
use thiserror::Error;

/// Result type alias using [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Classification of a [`ParamError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Programming error: the parameter is not declared on the action.
    Usage,
    /// Caller input error: missing, unparseable or disallowed value.
    Validation,
}

/// Error raised while reading a request parameter.
///
/// # Example
///
/// ```
/// use wsapi_core::{ErrorKind, ParamError};
/// use http::StatusCode;
///
/// let err = ParamError::missing("project");
/// assert_eq!(err.to_string(), "The 'project' parameter is missing");
/// assert_eq!(err.kind(), ErrorKind::Validation);
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// The parameter is not declared on the bound action.
    #[error("BUG - parameter '{key}' is undefined for action '{action}'")]
    Undefined {
        /// Requested key.
        key: String,
        /// Key of the bound action.
        action: String,
    },

    /// A mandatory parameter has no value and no default.
    #[error("The '{key}' parameter is missing")]
    Missing {
        /// Requested key.
        key: String,
    },

    /// The value is not one of the declared possible values.
    #[error("Value of parameter '{key}' ({value}) must be one of: [{}]", .possible.join(", "))]
    NotPossibleValue {
        /// Requested key.
        key: String,
        /// Rejected value.
        value: String,
        /// Allowed values, in declaration order.
        possible: Vec<String>,
    },

    /// The value is not a recognized boolean literal.
    #[error("Property {key} is not a boolean value: {value}")]
    NotBoolean {
        /// Requested key.
        key: String,
        /// Rejected value.
        value: String,
    },

    /// The value does not fit a 32-bit integer.
    #[error("The '{key}' parameter cannot be parsed as an integer value: {value}")]
    NotInteger {
        /// Requested key.
        key: String,
        /// Rejected value.
        value: String,
    },

    /// The value does not fit a 64-bit integer.
    #[error("The '{key}' parameter cannot be parsed as a long value: {value}")]
    NotLong {
        /// Requested key.
        key: String,
        /// Rejected value.
        value: String,
    },

    /// The value names no member of the requested enumeration.
    #[error("No enum constant {type_name}.{value}")]
    UnknownVariant {
        /// Requested key.
        key: String,
        /// Rejected value.
        value: String,
        /// Short name of the enumeration type.
        type_name: &'static str,
    },

    /// The value is not a `yyyy-MM-dd` date.
    #[error("The date '{value}' does not respect format 'yyyy-MM-dd'")]
    NotDate {
        /// Requested key.
        key: String,
        /// Rejected value.
        value: String,
    },

    /// The value is neither a date nor a date with time and offset.
    #[error("'{value}' cannot be parsed as either a date or date+time")]
    NotDateTime {
        /// Requested key.
        key: String,
        /// Rejected value.
        value: String,
    },
}

impl ParamError {
    /// Creates an error for a parameter that is not declared on the action.
    #[must_use]
    pub fn undefined(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self::Undefined {
            key: key.into(),
            action: action.into(),
        }
    }

    /// Creates an error for a missing mandatory parameter.
    #[must_use]
    pub fn missing(key: impl Into<String>) -> Self {
        Self::Missing { key: key.into() }
    }

    /// Creates an error for a value outside the declared possible values.
    #[must_use]
    pub fn not_possible_value<I, S>(key: impl Into<String>, value: impl Into<String>, possible: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::NotPossibleValue {
            key: key.into(),
            value: value.into(),
            possible: possible.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the key of the parameter that failed.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Undefined { key, .. }
            | Self::Missing { key }
            | Self::NotPossibleValue { key, .. }
            | Self::NotBoolean { key, .. }
            | Self::NotInteger { key, .. }
            | Self::NotLong { key, .. }
            | Self::UnknownVariant { key, .. }
            | Self::NotDate { key, .. }
            | Self::NotDateTime { key, .. } => key,
        }
    }

    /// Returns the rejected raw value, if the error carries one.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Undefined { .. } | Self::Missing { .. } => None,
            Self::NotPossibleValue { value, .. }
            | Self::NotBoolean { value, .. }
            | Self::NotInteger { value, .. }
            | Self::NotLong { value, .. }
            | Self::UnknownVariant { value, .. }
            | Self::NotDate { value, .. }
            | Self::NotDateTime { value, .. } => Some(value),
        }
    }

    /// Returns whether this is a usage fault or a validation fault.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Undefined { .. } => ErrorKind::Usage,
            _ => ErrorKind::Validation,
        }
    }

    /// Returns true for programming errors that should be fixed in code.
    #[must_use]
    pub const fn is_usage_fault(&self) -> bool {
        matches!(self.kind(), ErrorKind::Usage)
    }

    /// Returns the HTTP status code the web layer should answer with.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Usage => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
        }
    }

    /// Returns the error code suitable for error envelopes.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Undefined { .. } => "UNDEFINED_PARAMETER",
            Self::Missing { .. } => "MISSING_PARAMETER",
            Self::NotPossibleValue { .. } => "VALUE_NOT_ALLOWED",
            Self::NotBoolean { .. }
            | Self::NotInteger { .. }
            | Self::NotLong { .. }
            | Self::UnknownVariant { .. }
            | Self::NotDate { .. }
            | Self::NotDateTime { .. } => "INVALID_PARAMETER",
        }
    }
}

/// Error raised while declaring controllers, actions and parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// Controller path is empty.
    #[error("controller path must not be empty")]
    EmptyControllerPath,

    /// A controller with the same path is already registered.
    #[error("controller '{path}' is already defined")]
    DuplicateController {
        /// Controller path.
        path: String,
    },

    /// Controller was finalized without any action.
    #[error("at least one action must be declared in the controller '{path}'")]
    NoActions {
        /// Controller path.
        path: String,
    },

    /// Action or parameter key is empty.
    #[error("{what} key must not be empty in controller '{controller}'")]
    EmptyKey {
        /// Controller path.
        controller: String,
        /// `"action"` or `"parameter"`.
        what: &'static str,
    },

    /// Two actions share a key.
    #[error("the action '{action}' is defined multiple times in controller '{controller}'")]
    DuplicateAction {
        /// Controller path.
        controller: String,
        /// Action key.
        action: String,
    },

    /// Two parameters share a key.
    #[error("the parameter '{param}' is defined multiple times in action '{action}'")]
    DuplicateParam {
        /// Action path.
        action: String,
        /// Parameter key.
        param: String,
    },

    /// A deprecated key equals its own key or clashes with another parameter.
    #[error("deprecated key '{deprecated_key}' of parameter '{param}' conflicts with another key in action '{action}'")]
    DeprecatedKeyConflict {
        /// Action path.
        action: String,
        /// Parameter key.
        param: String,
        /// Offending deprecated key.
        deprecated_key: String,
    },
}

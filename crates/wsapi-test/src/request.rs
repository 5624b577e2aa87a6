//! Accessor wrapper and action fixtures.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use bytes::Bytes;
use wsapi_core::definition::Context;
use wsapi_core::{Action, NewAction};
use wsapi_request::ValidatingRequest;

use crate::FakeRequest;

/// A [`ValidatingRequest`] over a [`FakeRequest`] whose setters chain into accessors.
///
/// ```
/// use wsapi_test::{action, TestRequest};
///
/// let mut request = TestRequest::new(action("api/issues", "search", |action| {
///     action.create_param("ps");
/// }));
///
/// assert_eq!(request.param_as_int("ps").unwrap(), None);
/// assert_eq!(request.set_param("ps", "123").param_as_int("ps").unwrap(), Some(123));
/// ```
#[derive(Debug)]
pub struct TestRequest {
    inner: ValidatingRequest<FakeRequest>,
}

impl TestRequest {
    /// Creates an empty request bound to `action`.
    pub fn new(action: Arc<Action>) -> Self {
        Self {
            inner: ValidatingRequest::new(FakeRequest::new(), action),
        }
    }

    /// Stores a single value.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.inner.raw_mut().set_param(key, value);
        self
    }

    /// Stores a single value if there is one. `None` leaves the current value untouched.
    pub fn set_optional_param(&mut self, key: impl Into<String>, value: Option<impl Into<String>>) -> &mut Self {
        self.inner.raw_mut().set_optional_param(key, value);
        self
    }

    /// Appends values to a multi-valued parameter.
    pub fn set_multi_param<I, S>(&mut self, key: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.raw_mut().set_multi_param(key, values);
        self
    }

    /// Stores a binary part.
    pub fn set_part(
        &mut self,
        key: impl Into<String>,
        content: impl Into<Bytes>,
        file_name: impl Into<String>,
    ) -> &mut Self {
        self.inner.raw_mut().set_part(key, content, file_name);
        self
    }

    /// Consumes the wrapper and returns the accessor.
    pub fn into_inner(self) -> ValidatingRequest<FakeRequest> {
        self.inner
    }
}

impl Deref for TestRequest {
    type Target = ValidatingRequest<FakeRequest>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for TestRequest {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

/// Builds a single finalized action.
///
/// # Panics
///
/// Panics if the declarations are invalid.
pub fn action(controller: &str, key: &str, define: impl FnOnce(&mut NewAction)) -> Arc<Action> {
    let mut context = Context::new();
    let mut new_controller = context.create_controller(controller);
    define(new_controller.create_action(key));
    new_controller.done().expect("valid action definition");
    context
        .action(controller, key)
        .expect("action registered")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_chain_into_accessors() {
        let mut request = TestRequest::new(action("api/a", "b", |action| {
            action.create_param("n");
            action.create_param("m");
        }));

        assert_eq!(request.set_param("n", "5").param_as_int("n").unwrap(), Some(5));
        assert_eq!(
            request.set_multi_param("m", ["x", "y"]).multi_param("m").unwrap(),
            vec!["x", "y"]
        );
        assert_eq!(request.set_part("f", "abc", "f.txt").param_as_part("f").unwrap().len(), 3);
    }
}

//! In-memory raw request.

use std::collections::HashMap;

use bytes::Bytes;
use http::Method;
use wsapi_core::Part;
use wsapi_request::RawRequest;

/// Raw request backed by hash maps.
///
/// Single values, multi-values and parts are stored separately, the way a
/// transport would decode them.
#[derive(Debug, Clone)]
pub struct FakeRequest {
    method: Method,
    media_type: String,
    path: Option<String>,
    params: HashMap<String, String>,
    multi_params: HashMap<String, Vec<String>>,
    parts: HashMap<String, Part>,
}

impl Default for FakeRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeRequest {
    /// Creates an empty GET request with `application/json` media type.
    pub fn new() -> Self {
        Self {
            method: Method::GET,
            media_type: "application/json".to_string(),
            path: None,
            params: HashMap::new(),
            multi_params: HashMap::new(),
            parts: HashMap::new(),
        }
    }

    /// Sets the HTTP method.
    pub fn set_method(&mut self, method: Method) -> &mut Self {
        self.method = method;
        self
    }

    /// Sets the media type.
    pub fn set_media_type(&mut self, media_type: impl Into<String>) -> &mut Self {
        self.media_type = media_type.into();
        self
    }

    /// Sets the request path.
    pub fn set_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.path = Some(path.into());
        self
    }

    /// Stores a single value, replacing any previous one.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Stores a single value if there is one. `None` leaves the current value untouched.
    pub fn set_optional_param(&mut self, key: impl Into<String>, value: Option<impl Into<String>>) -> &mut Self {
        if let Some(value) = value {
            self.set_param(key, value);
        }
        self
    }

    /// Removes a single value.
    pub fn remove_param(&mut self, key: &str) -> &mut Self {
        self.params.remove(key);
        self
    }

    /// Appends values to a multi-valued parameter.
    pub fn set_multi_param<I, S>(&mut self, key: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.multi_params
            .entry(key.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Stores a binary part.
    pub fn set_part(
        &mut self,
        key: impl Into<String>,
        content: impl Into<Bytes>,
        file_name: impl Into<String>,
    ) -> &mut Self {
        self.parts.insert(key.into(), Part::new(content, file_name));
        self
    }
}

impl RawRequest for FakeRequest {
    fn method(&self) -> &Method {
        &self.method
    }

    fn media_type(&self) -> &str {
        &self.media_type
    }

    fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    fn has_param(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    fn read_param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    fn read_multi_param(&self, key: &str) -> Vec<&str> {
        self.multi_params
            .get(key)
            .map(|values| values.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn read_part(&self, key: &str) -> Option<&Part> {
        self.parts.get(key)
    }
}

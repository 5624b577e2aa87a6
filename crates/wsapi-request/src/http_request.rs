//! [`RawRequest`] adapter over [`http::Request`].
//!
//! Values are decoded from the URL query string and, for
//! `application/x-www-form-urlencoded` requests, from the body. Repeated keys
//! become multi-values; the first occurrence is the single value.

use std::collections::HashMap;

use http::{header, Method};
use indexmap::IndexMap;
use thiserror::Error;
use wsapi_core::Part;

use crate::RawRequest;

/// Media type reported when the request has no usable `Content-Type`.
pub const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

const FORM_MEDIA_TYPE: &str = "application/x-www-form-urlencoded";

/// Error decoding request parameters.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The query string is not valid `application/x-www-form-urlencoded`.
    #[error("invalid query string: {0}")]
    Query(#[source] serde_urlencoded::de::Error),

    /// The form body is not valid `application/x-www-form-urlencoded`.
    #[error("invalid form body: {0}")]
    Form(#[source] serde_urlencoded::de::Error),
}

/// Raw parameters decoded from an HTTP request.
///
/// # Example
///
/// ```
/// use wsapi_request::{HttpRequest, RawRequest};
///
/// let request = http::Request::post("/api/issues/assign?issue=AX1")
///     .header("content-type", "application/x-www-form-urlencoded; charset=utf-8")
///     .body("assignee=alice&tags=a&tags=b")
///     .unwrap();
///
/// let raw = HttpRequest::from_http(&request).unwrap();
/// assert_eq!(raw.media_type(), "application/x-www-form-urlencoded");
/// assert_eq!(raw.read_param("issue"), Some("AX1"));
/// assert_eq!(raw.read_param("assignee"), Some("alice"));
/// assert_eq!(raw.read_multi_param("tags"), vec!["a", "b"]);
/// ```
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    path: String,
    media_type: String,
    params: IndexMap<String, Vec<String>>,
    parts: HashMap<String, Part>,
}

impl HttpRequest {
    /// Decodes the query string and form body of `request`.
    pub fn from_http<B: AsRef<[u8]>>(request: &http::Request<B>) -> Result<Self, DecodeError> {
        let media_type = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_ascii_lowercase())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string());

        let mut params: IndexMap<String, Vec<String>> = IndexMap::new();

        if let Some(query) = request.uri().query() {
            let pairs: Vec<(String, String)> =
                serde_urlencoded::from_str(query).map_err(DecodeError::Query)?;
            push_pairs(&mut params, pairs);
        }

        if media_type == FORM_MEDIA_TYPE {
            let pairs: Vec<(String, String)> =
                serde_urlencoded::from_bytes(request.body().as_ref()).map_err(DecodeError::Form)?;
            push_pairs(&mut params, pairs);
        }

        tracing::trace!(
            http.method = %request.method(),
            http.path = request.uri().path(),
            params = params.len(),
            "Decoded request parameters"
        );

        Ok(Self {
            method: request.method().clone(),
            path: request.uri().path().to_string(),
            media_type,
            params,
            parts: HashMap::new(),
        })
    }

    /// Attaches a binary part decoded elsewhere (e.g. from a multipart body).
    #[must_use]
    pub fn with_part(mut self, key: impl Into<String>, part: Part) -> Self {
        self.parts.insert(key.into(), part);
        self
    }
}

fn push_pairs(params: &mut IndexMap<String, Vec<String>>, pairs: Vec<(String, String)>) {
    for (key, value) in pairs {
        params.entry(key).or_default().push(value);
    }
}

impl RawRequest for HttpRequest {
    fn method(&self) -> &Method {
        &self.method
    }

    fn media_type(&self) -> &str {
        &self.media_type
    }

    fn path(&self) -> Option<&str> {
        Some(&self.path)
    }

    fn has_param(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    fn read_param(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    fn read_multi_param(&self, key: &str) -> Vec<&str> {
        self.params
            .get(key)
            .map(|values| values.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn read_part(&self, key: &str) -> Option<&Part> {
        self.parts.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::io::Read;

    #[test]
    fn test_query_parameters() {
        let request = http::Request::get("/api/search?q=hello%20world&ps=10&ps=20")
            .body(Bytes::new())
            .unwrap();
        let raw = HttpRequest::from_http(&request).unwrap();

        assert_eq!(raw.method(), &Method::GET);
        assert_eq!(raw.path(), Some("/api/search"));
        assert_eq!(raw.media_type(), DEFAULT_MEDIA_TYPE);
        assert_eq!(raw.read_param("q"), Some("hello world"));
        assert_eq!(raw.read_param("ps"), Some("10"));
        assert_eq!(raw.read_multi_param("ps"), vec!["10", "20"]);
        assert!(raw.has_param("q"));
        assert!(!raw.has_param("missing"));
        assert!(raw.read_multi_param("missing").is_empty());
    }

    #[test]
    fn test_empty_value_is_present() {
        let request = http::Request::get("/api/search?q=").body(Bytes::new()).unwrap();
        let raw = HttpRequest::from_http(&request).unwrap();

        assert!(raw.has_param("q"));
        assert_eq!(raw.read_param("q"), Some(""));

        let mut content = String::new();
        raw.read_input_stream_param("q")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_json_body_is_not_decoded() {
        let request = http::Request::post("/api/create")
            .header("content-type", "application/json")
            .body(Bytes::from_static(b"{\"name\":\"x\"}"))
            .unwrap();
        let raw = HttpRequest::from_http(&request).unwrap();

        assert_eq!(raw.media_type(), "application/json");
        assert!(!raw.has_param("name"));
    }

    #[test]
    fn test_query_values_come_before_form_values() {
        let request = http::Request::post("/api/update?key=query")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Bytes::from_static(b"key=form"))
            .unwrap();
        let raw = HttpRequest::from_http(&request).unwrap();

        assert_eq!(raw.read_param("key"), Some("query"));
        assert_eq!(raw.read_multi_param("key"), vec!["query", "form"]);
    }

    #[test]
    fn test_parts_are_attached() {
        let request = http::Request::post("/api/upload").body(Bytes::new()).unwrap();
        let raw = HttpRequest::from_http(&request)
            .unwrap()
            .with_part("report", Part::new("data", "report.xml"));

        assert_eq!(raw.read_part("report").unwrap().file_name(), "report.xml");
        assert!(raw.read_part("other").is_none());
    }
}

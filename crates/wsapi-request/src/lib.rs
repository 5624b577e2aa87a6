//! # wsapi Request
//!
//! Typed, validated access to web-service request parameters.
//!
//! | Type | Role |
//! |------|------|
//! | [`RawRequest`] | Transport seam: raw single values, multi-values and parts |
//! | [`ValidatingRequest`] | Accessor applying definitions, defaults, aliases and coercion |
//! | [`HttpRequest`] | [`RawRequest`] decoded from an [`http::Request`] |
//!
//! ## Error Handling
//!
//! Accessors return [`ParamError`](wsapi_core::ParamError). Undeclared keys are
//! usage faults; everything else is a validation fault the web layer should
//! turn into a `400 Bad Request`:
//!
//! ```rust
//! use wsapi_core::definition::Context;
//! use wsapi_request::{HttpRequest, ValidatingRequest};
//!
//! let mut context = Context::new();
//! let mut controller = context.create_controller("api/projects");
//! controller.create_action("show").create_param("project").set_required(true);
//! controller.done().unwrap();
//!
//! let http = http::Request::get("/api/projects/show").body(Vec::new()).unwrap();
//! let request = ValidatingRequest::new(
//!     HttpRequest::from_http(&http).unwrap(),
//!     context.action("api/projects", "show").unwrap(),
//! );
//!
//! let err = request.mandatory_param("project").unwrap_err();
//! assert_eq!(err.status_code(), http::StatusCode::BAD_REQUEST);
//! assert_eq!(err.to_string(), "The 'project' parameter is missing");
//! ```

#![doc(html_root_url = "https://docs.rs/wsapi-request/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod http_request;
mod raw;
mod request;

pub use http_request::{DecodeError, HttpRequest, DEFAULT_MEDIA_TYPE};
pub use raw::RawRequest;
pub use request::ValidatingRequest;

//! # wsapi Test
//!
//! Test utilities for code that reads web-service parameters, without any
//! HTTP decoding in the way.
//!
//! - [`FakeRequest`] - In-memory [`RawRequest`](wsapi_request::RawRequest)
//! - [`TestRequest`] - A [`ValidatingRequest`](wsapi_request::ValidatingRequest)
//!   over a [`FakeRequest`] with chaining setters
//! - [`action`] - Builds a single finalized action for a test
//!
//! ## Example
//!
//! ```
//! use wsapi_test::{action, TestRequest};
//!
//! let search = action("api/issues", "search", |action| {
//!     action.create_param("ps").set_default_value("100");
//!     action.create_param("q");
//! });
//!
//! let mut request = TestRequest::new(search);
//! assert_eq!(request.param_as_int("ps").unwrap(), Some(100));
//! assert_eq!(request.set_param("q", " sonar ").param("q").unwrap(), Some("sonar"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod fake;
mod request;

pub use fake::FakeRequest;
pub use request::{action, TestRequest};

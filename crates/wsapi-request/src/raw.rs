//! Backing store seam between a transport and the parameter accessor.

use std::io::Read;

use http::Method;
use wsapi_core::Part;

/// Raw, undecoded view of one inbound request.
///
/// Implementations expose whatever the transport decoded: single values,
/// repeated values and binary parts, all keyed by the exact name the client
/// sent. They never apply defaults, aliases or validation; that is the job
/// of [`ValidatingRequest`](crate::ValidatingRequest).
pub trait RawRequest {
    /// HTTP method of the request.
    fn method(&self) -> &Method;

    /// Media type of the request content (e.g. `application/json`).
    fn media_type(&self) -> &str;

    /// Request path, if the transport has one.
    fn path(&self) -> Option<&str>;

    /// Returns true if a single value is stored under exactly `key`.
    fn has_param(&self, key: &str) -> bool;

    /// Returns the single value stored under `key`.
    fn read_param(&self, key: &str) -> Option<&str>;

    /// Returns every value stored under `key`, in arrival order.
    fn read_multi_param(&self, key: &str) -> Vec<&str>;

    /// Returns the value stored under `key` as a byte stream.
    fn read_input_stream_param(&self, key: &str) -> Option<Box<dyn Read + '_>> {
        self.read_param(key)
            .map(|value| Box::new(value.as_bytes()) as Box<dyn Read + '_>)
    }

    /// Returns the binary part uploaded under `key`.
    fn read_part(&self, key: &str) -> Option<&Part>;
}

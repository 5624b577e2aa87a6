//! # wsapi
//!
//! **Declarative web-service actions with typed, validated request parameters**
//!
//! - **Definitions** – Controllers, actions and parameters declared once, in code or configuration
//! - **Typed accessors** – Booleans, integers, enums, dates, lists, multi-values and parts
//! - **Validation** – Required values, possible values and deprecated keys enforced on every read
//! - **Structured logs** – `tracing` events for undeclared parameters and legacy keys
//!
//! ## Quick Start
//!
//! ```
//! use wsapi::prelude::*;
//!
//! let mut context = Context::new();
//! let mut controller = context.create_controller("api/issues");
//! let action = controller.create_action("search");
//! action.create_param("ps").set_default_value("100");
//! action.create_param("componentKey").set_deprecated_key("component");
//! controller.done().unwrap();
//!
//! let http = http::Request::get("/api/issues/search?component=my_project")
//!     .body(Vec::new())
//!     .unwrap();
//! let request = ValidatingRequest::new(
//!     HttpRequest::from_http(&http).unwrap(),
//!     context.action("api/issues", "search").unwrap(),
//! );
//!
//! assert_eq!(request.mandatory_param_as_int("ps").unwrap(), 100);
//! assert_eq!(request.param("componentKey").unwrap(), Some("my_project"));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! WsConfig ──register──▶ Context ──▶ Arc<Action>
//!                                        │
//! http::Request ─▶ HttpRequest ─▶ ValidatingRequest ─▶ typed values / ParamError
//! ```

#![doc(html_root_url = "https://docs.rs/wsapi/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export definition types
pub use wsapi_core as core;

// Re-export request accessors
pub use wsapi_request as request;

// Re-export configuration
pub use wsapi_config as config;

// Re-export logging setup
pub use wsapi_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// ```
/// use wsapi::prelude::*;
/// ```
pub mod prelude {
    pub use wsapi_core::{
        Action, Context, Controller, DefinitionError, ErrorKind, ParamEnum, ParamError,
        ParamResult, Part,
    };

    // Re-export request accessors
    pub use wsapi_request::{HttpRequest, RawRequest, ValidatingRequest};

    // Re-export configuration
    pub use wsapi_config::{ConfigError, ConfigLoader, WsConfig};

    // Re-export logging setup
    pub use wsapi_telemetry::{init_logging, LogConfig};
}

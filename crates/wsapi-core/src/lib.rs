//! # wsapi Core
//!
//! Core types shared by the wsapi crates:
//!
//! - [`definition`] - Controllers, actions and parameter definitions with their builders
//! - [`ParamError`] / [`DefinitionError`] - Error types
//! - [`Part`] - Binary uploads
//! - [`ParamEnum`] - Finite enumerations readable from parameters
//! - [`coerce`] - String-to-value conversions used by every typed accessor

#![doc(html_root_url = "https://docs.rs/wsapi-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod coerce;
pub mod definition;
mod enums;
mod error;
mod part;

pub use definition::{Action, Context, Controller, NewAction, NewController, NewParam, Param};
pub use enums::ParamEnum;
pub use error::{DefinitionError, ErrorKind, ParamError, ParamResult};
pub use part::Part;

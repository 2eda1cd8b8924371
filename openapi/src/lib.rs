//! # OpenAPI
//!
//! The API description model shared by the duplicate detector and its
//! callers.
//!
//! - [`parse_spec`] / [`validate`] turn YAML or JSON text into an [`ApiSpec`]
//! - [`ApiSpec`] exposes paths, operations, endpoints and schema names in
//!   document order
//! - [`summarize`] flattens a spec into the text blob that gets embedded

pub mod error;
pub mod parse;
pub mod spec;
pub mod summary;

pub use error::{Result, SpecError};
pub use parse::{parse_and_validate, parse_document, parse_spec, validate};
pub use spec::{ApiSpec, Components, Endpoint, HttpMethod, Info, Operation, PathItem};
pub use summary::summarize;

//! Common plumbing for Cloudant/CouchDB operations.
//!
//! This module provides the pieces shared by read and write operations: the database
//! location and its endpoints, the single HTTP helper every request goes through,
//! the store's JSON envelopes and the error type.

/// Store envelopes, generic documents and the shallow merge.
pub mod document;

/// Error taxonomy shared by every operation.
pub mod error;

/// The HTTP helper every operation sends its requests through.
pub(crate) mod http;

/// Database location and endpoint building.
pub mod service;

pub use error::{Error, Result};

use serde_json::{Map, Value};

/// Parameter holding the id of a document.
pub const ID_PARAMETER: &str = "id";

/// Parameter holding a JSON document as text.
pub const BODY_PARAMETER: &str = "body";

/// Named invocation parameters, as a hosting runtime passes them.
pub type Params = Map<String, Value>;

/// A required string parameter.
pub(crate) fn required<'a>(params: &'a Params, name: &'static str) -> Result<&'a str> {
    params.get(name).and_then(Value::as_str).ok_or_else(|| {
        crate::diagnostic!("missing required parameter `{name}`");
        Error::MissingParameter(name)
    })
}

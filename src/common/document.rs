use crate::common::{Error, Result};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// A JSON document as stored in the database.
pub type Document = Map<String, Value>;

/// Field the store uses to report an application-level failure.
const ERROR_FIELD: &str = "error";

/// Envelope the store returns after a document write.
///
/// ```rust
/// use cloudant_crud::common::document::Envelope;
///
/// let envelope: Envelope = serde_json::from_str(r#"{"ok":true,"id":"1","rev":"1-x"}"#).unwrap();
/// assert!(envelope.ok);
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Envelope {
    /// Whether the write was accepted.
    pub ok: bool,
    /// Id of the written document.
    pub id: String,
    /// Revision assigned to the written document.
    pub rev: String,
}

/// Envelope the store returns after a delete or a database creation.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Acknowledgement {
    /// Whether the request was accepted.
    pub ok: bool,
}

/// Identity of the current version of a document.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Revision {
    /// Document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Current revision token.
    #[serde(rename = "_rev")]
    pub rev: String,
}

/// The `error` field of an object, when it is a string.
pub fn error_field(object: &Document) -> Option<&str> {
    object.get(ERROR_FIELD).and_then(Value::as_str)
}

/// Parse a body as a JSON object.
pub fn parse_object(body: &[u8]) -> Result<Document> {
    match serde_json::from_slice::<Value>(body)? {
        Value::Object(object) => Ok(object),
        _ => Err(Error::NotAnObject),
    }
}

/// Decode a store envelope, surfacing the store's own `error` field first.
pub(crate) fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let value: Value = serde_json::from_slice(body)?;
    if let Some(error) = value.get(ERROR_FIELD).and_then(Value::as_str) {
        return Err(Error::Store(error.to_string()));
    }
    let envelope = serde_json::from_value(value)?;
    Ok(envelope)
}

/// Shallow merge: every key of `patch` overwrites the same key of `original`.
///
/// Keys missing from `patch` keep their original value, and original keys keep their
/// position.
///
/// ```rust
/// use cloudant_crud::common::document::merge;
/// use serde_json::json;
///
/// let original = json!({"_id": "1", "_rev": "1-x", "name": "a"});
/// let patch = json!({"name": "b"});
/// let merged = merge(
///     original.as_object().unwrap().clone(),
///     patch.as_object().unwrap().clone(),
/// );
/// assert_eq!(serde_json::Value::Object(merged), json!({"_id": "1", "_rev": "1-x", "name": "b"}));
/// ```
pub fn merge(mut original: Document, patch: Document) -> Document {
    original.extend(patch);
    original
}

//! Invocation boundary.
//!
//! Each action takes the named parameters of one invocation and always returns an
//! [`Outcome`]: failures are folded into `{"ok": false}`, optionally with an `error`
//! message, and never escape as an `Err` or a panic.

use crate::common::{Error, Params};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Result map returned by every action.
///
/// Absent fields are not serialized. A successful read carries only `document`, without
/// an `ok` flag, which is the shape existing callers of the read action expect.
///
/// ```rust
/// use cloudant_crud::action::Outcome;
///
/// let outcome = Outcome::failure();
/// assert_eq!(serde_json::to_string(&outcome).unwrap(), r#"{"ok":false}"#);
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Outcome {
    /// Whether the action succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
    /// The retrieved or written document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Value>,
    /// Error message, for the failures that are reported to the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Outcome {
    /// `{"ok": false}`
    pub fn failure() -> Self {
        Self {
            ok: Some(false),
            ..Default::default()
        }
    }

    fn failure_with(error: impl Into<String>) -> Self {
        Self {
            ok: Some(false),
            error: Some(error.into()),
            ..Default::default()
        }
    }

    fn success(document: Value) -> Self {
        Self {
            ok: Some(true),
            document: Some(document),
            ..Default::default()
        }
    }

    fn acknowledged(ok: bool) -> Self {
        Self {
            ok: Some(ok),
            ..Default::default()
        }
    }

    /// Whether the outcome reports success.
    ///
    /// An outcome without an `ok` flag succeeded when it carries a document.
    pub fn is_success(&self) -> bool {
        self.ok.unwrap_or(self.document.is_some())
    }
}

impl From<Outcome> for Params {
    fn from(outcome: Outcome) -> Self {
        let mut params = Self::new();
        if let Some(ok) = outcome.ok {
            params.insert("ok".to_string(), Value::Bool(ok));
        }
        if let Some(document) = outcome.document {
            params.insert("document".to_string(), document);
        }
        if let Some(error) = outcome.error {
            params.insert("error".to_string(), Value::String(error));
        }
        params
    }
}

/// The five entry points.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Action {
    /// See [`create`].
    Create,
    /// See [`read`].
    Read,
    /// See [`update`].
    Update,
    /// See [`delete`].
    Delete,
    /// See [`delete_all`].
    DeleteAll,
}

impl Action {
    /// Run the action for one invocation.
    pub async fn invoke(self, client: &Client, params: &Params) -> Outcome {
        match self {
            Self::Create => create(client, params).await,
            Self::Read => read(client, params).await,
            Self::Update => update(client, params).await,
            Self::Delete => delete(client, params).await,
            Self::DeleteAll => delete_all(client, params).await,
        }
    }
}

/// Create a document from the `body` parameter.
///
/// `{"ok": true, "document": {"ok": true, "id": .., "rev": ..}}` on success.
pub async fn create(client: &Client, params: &Params) -> Outcome {
    let create_document = match crate::write::create_document::CreateDocument::try_from(params) {
        Ok(create_document) => create_document,
        Err(_) => return Outcome::failure(),
    };
    match create_document.send(client).await {
        Ok(envelope) => Outcome::success(json!({
            "ok": envelope.ok,
            "id": envelope.id,
            "rev": envelope.rev,
        })),
        Err(_) => Outcome::failure(),
    }
}

/// Read the document named by the `id` parameter.
///
/// `{"document": {..}}` on success; the store's error is forwarded on failure.
pub async fn read(client: &Client, params: &Params) -> Outcome {
    let get_document = match crate::read::get_document::GetDocument::try_from(params) {
        Ok(get_document) => get_document,
        Err(_) => return Outcome::failure(),
    };
    match get_document.send(client).await {
        Ok(document) => Outcome {
            document: Some(Value::Object(document)),
            ..Default::default()
        },
        Err(Error::Store(error)) => Outcome::failure_with(error),
        Err(_) => Outcome::failure(),
    }
}

/// Merge the fields of the `body` parameter into the document named by its `id`.
///
/// `{"ok": true, "document": "<merged JSON text>"}` on success. Only an `error` field
/// in the body itself is forwarded; a store error on the final write is not.
pub async fn update(client: &Client, params: &Params) -> Outcome {
    let update_document = match crate::write::update_document::UpdateDocument::try_from(params) {
        Ok(update_document) => update_document,
        Err(_) => return Outcome::failure(),
    };
    match update_document.send(client).await {
        Ok(merged) => Outcome::success(Value::String(merged)),
        Err(Error::Payload(error)) => Outcome::failure_with(error),
        Err(_) => Outcome::failure(),
    }
}

/// Delete the document named by the `id` parameter at its current revision.
///
/// `{"ok": <store flag>}`, or `{"ok": false, "error": "not found"}` when the document
/// cannot be looked up.
pub async fn delete(client: &Client, params: &Params) -> Outcome {
    let delete_document = match crate::write::delete_document::DeleteDocument::try_from(params) {
        Ok(delete_document) => delete_document,
        Err(_) => return Outcome::failure(),
    };
    match delete_document.send(client).await {
        Ok(ok) => Outcome::acknowledged(ok),
        Err(error @ Error::NotFound) => Outcome::failure_with(error.to_string()),
        Err(_) => Outcome::failure(),
    }
}

/// Drop and recreate the database.
///
/// `{"ok": <store flag for the recreation>}`.
pub async fn delete_all(client: &Client, params: &Params) -> Outcome {
    let delete_all_documents =
        match crate::write::delete_all_documents::DeleteAllDocuments::try_from(params) {
            Ok(delete_all_documents) => delete_all_documents,
            Err(_) => return Outcome::failure(),
        };
    match delete_all_documents.send(client).await {
        Ok(ok) => Outcome::acknowledged(ok),
        Err(_) => Outcome::failure(),
    }
}

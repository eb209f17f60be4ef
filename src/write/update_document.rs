use crate::common::{self, Error, Result, document, http, service};

use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

/// Field of the update body naming the document to update.
const ID_FIELD: &str = "id";

/// update document operation
#[derive(Clone, Debug, PartialEq)]
struct UpdateDocumentInput {
    endpoint: Url,
    patch: document::Document,
}

/// Update document operation.
///
/// The body is a JSON object holding the `id` of the document and the fields to
/// change. The stored document is read, the fields are merged over it and the result
/// is written back with the revision that was read. There is no compare-and-swap
/// beyond the store's own revision check, so a concurrent write makes the final
/// write fail.
///
/// ```rust,no_run
/// use cloudant_crud::{common, write};
/// use reqwest::Client;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let update_document = write::update_document::UpdateDocument {
///     body: r#"{"id": "1", "name": "Jane"}"#.to_string(),
///     service: common::service::Service {
///         url: "http://localhost:5984".to_string(),
///         database: "users".to_string(),
///     },
/// };
/// let merged = update_document.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct UpdateDocument {
    /// The id and the fields to change, as JSON text.
    pub body: String,
    /// Database holding the document.
    pub service: service::Service,
}

impl TryFrom<UpdateDocument> for UpdateDocumentInput {
    type Error = Error;

    fn try_from(update_document: UpdateDocument) -> Result<Self> {
        let mut patch = document::parse_object(update_document.body.as_bytes())?;
        if let Some(error) = document::error_field(&patch) {
            return Err(Error::Payload(error.to_string()));
        }
        // the id addresses the document, it is not part of the payload
        let id = match patch.shift_remove(ID_FIELD) {
            Some(Value::String(id)) => id,
            _ => return Err(Error::MissingId),
        };
        let endpoint = update_document.service.document_endpoint(&id)?;
        let operation = Self { endpoint, patch };
        Ok(operation)
    }
}

impl TryFrom<&common::Params> for UpdateDocument {
    type Error = Error;

    fn try_from(params: &common::Params) -> Result<Self> {
        let service: service::Service = params.try_into()?;
        let body = common::required(params, common::BODY_PARAMETER)?;
        let update_document = Self {
            body: body.to_string(),
            service,
        };
        Ok(update_document)
    }
}

impl UpdateDocument {
    /// Execute the update document operation.
    ///
    /// Returns the merged document serialized as JSON text, exactly as it was sent.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "cloudant_crud.update_document",
            skip_all,
            fields(database = %self.service.database),
            err
        )
    )]
    pub async fn send(self, client: &Client) -> Result<String> {
        let update_document: UpdateDocumentInput = self.try_into()?;
        let endpoint = update_document.endpoint;

        let response = http::request(client, Method::GET, endpoint.clone(), None).await?;
        let original = document::parse_object(&response)?;
        if let Some(error) = document::error_field(&original) {
            crate::diagnostic!("document does not exist: {error}");
            return Err(Error::Store(error.to_string()));
        }

        let merged = document::merge(original, update_document.patch);
        let merged = serde_json::to_string(&merged)?;

        let response =
            http::request(client, Method::PUT, endpoint, Some(merged.clone().into_bytes())).await?;
        let result = document::parse_object(&response)?;
        if let Some(error) = document::error_field(&result) {
            crate::diagnostic!("store rejected the update: {error}");
            return Err(Error::Store(error.to_string()));
        }
        Ok(merged)
    }
}

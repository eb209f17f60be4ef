use crate::common::{self, Error, Result, document, http, service};

use reqwest::{Client, Method};
use url::Url;

/// create document operation
#[derive(Clone, Debug, PartialEq)]
struct CreateDocumentInput {
    body: String,
    endpoint: Url,
}

/// Create document operation.
///
/// The body is forwarded verbatim; the store assigns the id (unless the body carries
/// an `_id`) and the first revision.
///
/// ```rust,no_run
/// use cloudant_crud::{common, write};
/// use reqwest::Client;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let create_document = write::create_document::CreateDocument {
///     body: r#"{"name": "John"}"#.to_string(),
///     service: common::service::Service {
///         url: "http://localhost:5984".to_string(),
///         database: "users".to_string(),
///     },
/// };
/// let envelope = create_document.send(client).await?;
/// println!("{} {}", envelope.id, envelope.rev);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct CreateDocument {
    /// The document to create, as JSON text.
    pub body: String,
    /// Database to create the document in.
    pub service: service::Service,
}

impl TryFrom<CreateDocument> for CreateDocumentInput {
    type Error = Error;

    fn try_from(create_document: CreateDocument) -> Result<Self> {
        let endpoint = create_document.service.database_endpoint()?;
        let operation = Self {
            body: create_document.body,
            endpoint,
        };
        Ok(operation)
    }
}

impl TryFrom<&common::Params> for CreateDocument {
    type Error = Error;

    fn try_from(params: &common::Params) -> Result<Self> {
        let service: service::Service = params.try_into()?;
        let body = common::required(params, common::BODY_PARAMETER)?;
        let create_document = Self {
            body: body.to_string(),
            service,
        };
        Ok(create_document)
    }
}

impl CreateDocument {
    /// Execute the create document operation.
    ///
    /// Succeeds only when the store answers with `ok: true`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "cloudant_crud.create_document",
            skip_all,
            fields(database = %self.service.database),
            err
        )
    )]
    pub async fn send(self, client: &Client) -> Result<document::Envelope> {
        let create_document: CreateDocumentInput = self.try_into()?;
        let body = create_document.body.into_bytes();
        let response =
            http::request(client, Method::POST, create_document.endpoint, Some(body)).await?;
        accepted(&response)
    }
}

/// Decode the write envelope, requiring `ok: true`.
fn accepted(response: &[u8]) -> Result<document::Envelope> {
    let envelope: document::Envelope = document::decode_envelope(response)?;
    if !envelope.ok {
        return Err(Error::NotAcknowledged);
    }
    Ok(envelope)
}

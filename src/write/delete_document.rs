use crate::{
    common::{self, Error, Result, document, http, service},
    write,
};

use reqwest::{Client, Method};
use url::Url;

/// delete document operation
#[derive(Clone, Debug, PartialEq)]
struct DeleteDocumentInput {
    endpoint: Url,
}

/// Delete document operation.
///
/// The current revision is looked up first and the delete targets exactly that
/// revision. A document that cannot be looked up is reported as [`Error::NotFound`]
/// and no delete is issued.
///
/// ```rust,no_run
/// use cloudant_crud::{common, write};
/// use reqwest::Client;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let delete_document = write::delete_document::DeleteDocument {
///     id: "1".to_string(),
///     service: common::service::Service {
///         url: "http://localhost:5984".to_string(),
///         database: "users".to_string(),
///     },
/// };
/// let deleted = delete_document.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct DeleteDocument {
    /// Id of the document to delete.
    pub id: String,
    /// Database holding the document.
    pub service: service::Service,
}

impl TryFrom<DeleteDocument> for DeleteDocumentInput {
    type Error = Error;

    fn try_from(delete_document: DeleteDocument) -> Result<Self> {
        let endpoint = delete_document
            .service
            .document_endpoint(&delete_document.id)?;
        Ok(Self { endpoint })
    }
}

impl TryFrom<&common::Params> for DeleteDocument {
    type Error = Error;

    fn try_from(params: &common::Params) -> Result<Self> {
        let service: service::Service = params.try_into()?;
        let id = common::required(params, common::ID_PARAMETER)?;
        let delete_document = Self {
            id: id.to_string(),
            service,
        };
        Ok(delete_document)
    }
}

async fn current_revision(client: &Client, endpoint: &Url) -> Result<document::Revision> {
    let body = http::request(client, Method::GET, endpoint.clone(), None).await?;
    document::decode_envelope(&body)
}

impl DeleteDocument {
    /// Execute the delete document operation.
    ///
    /// Returns the `ok` flag of the store's answer to the delete.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "cloudant_crud.delete_document",
            skip_all,
            fields(database = %self.service.database, id = %self.id),
            err
        )
    )]
    pub async fn send(self, client: &Client) -> Result<bool> {
        let delete_document: DeleteDocumentInput = self.try_into()?;
        let revision = current_revision(client, &delete_document.endpoint)
            .await
            .map_err(|error| {
                crate::diagnostic!("document does not exist: {error}");
                Error::NotFound
            })?;
        let endpoint = service::with_revision(&delete_document.endpoint, &revision.rev);
        let response = http::request(client, Method::DELETE, endpoint, None).await?;
        write::common::acknowledged(&response)
    }
}

use crate::common::{self, Error, Result, document, http, service};

use reqwest::{Client, Method};
use url::Url;

/// get document operation
#[derive(Clone, Debug, PartialEq)]
struct GetDocumentInput {
    endpoint: Url,
}

/// Get document operation.
///
/// ```rust,no_run
/// use cloudant_crud::{common, read};
/// use reqwest::Client;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let get_document = read::get_document::GetDocument {
///     id: "1".to_string(),
///     service: common::service::Service {
///         url: "http://localhost:5984".to_string(),
///         database: "users".to_string(),
///     },
/// };
/// let document = get_document.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct GetDocument {
    /// Id of the document to retrieve.
    pub id: String,
    /// Database holding the document.
    pub service: service::Service,
}

impl TryFrom<GetDocument> for GetDocumentInput {
    type Error = Error;

    fn try_from(get_document: GetDocument) -> Result<Self> {
        let endpoint = get_document.service.document_endpoint(&get_document.id)?;
        Ok(Self { endpoint })
    }
}

impl TryFrom<&common::Params> for GetDocument {
    type Error = Error;

    fn try_from(params: &common::Params) -> Result<Self> {
        let service: service::Service = params.try_into()?;
        let id = common::required(params, common::ID_PARAMETER)?;
        let get_document = Self {
            id: id.to_string(),
            service,
        };
        Ok(get_document)
    }
}

impl GetDocument {
    /// Execute the get document operation.
    ///
    /// Returns the stored document as is. A body carrying a string `error` field is
    /// reported as [`Error::Store`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "cloudant_crud.get_document",
            skip_all,
            fields(database = %self.service.database, id = %self.id),
            err
        )
    )]
    pub async fn send(self, client: &Client) -> Result<document::Document> {
        let get_document: GetDocumentInput = self.try_into()?;
        let body = http::request(client, Method::GET, get_document.endpoint, None).await?;
        let document = document::parse_object(&body)?;
        if let Some(error) = document::error_field(&document) {
            return Err(Error::Store(error.to_string()));
        }
        Ok(document)
    }
}

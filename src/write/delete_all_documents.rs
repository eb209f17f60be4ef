use crate::{
    common::{self, Error, Result, http, service},
    write,
};

use reqwest::{Client, Method};
use url::Url;

/// delete all documents operation
#[derive(Clone, Debug, PartialEq)]
struct DeleteAllDocumentsInput {
    endpoint: Url,
}

/// Delete all documents operation.
///
/// Drops the whole database, then recreates it empty. This is destructive: there is
/// no confirmation, and when the recreation fails the database stays deleted.
///
/// ```rust,no_run
/// use cloudant_crud::{common, write};
/// use reqwest::Client;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let delete_all_documents = write::delete_all_documents::DeleteAllDocuments {
///     service: common::service::Service {
///         url: "http://localhost:5984".to_string(),
///         database: "users".to_string(),
///     },
/// };
/// let recreated = delete_all_documents.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct DeleteAllDocuments {
    /// Database to empty.
    pub service: service::Service,
}

impl TryFrom<DeleteAllDocuments> for DeleteAllDocumentsInput {
    type Error = Error;

    fn try_from(delete_all_documents: DeleteAllDocuments) -> Result<Self> {
        let endpoint = delete_all_documents.service.database_endpoint()?;
        Ok(Self { endpoint })
    }
}

impl TryFrom<&common::Params> for DeleteAllDocuments {
    type Error = Error;

    fn try_from(params: &common::Params) -> Result<Self> {
        let service: service::Service = params.try_into()?;
        Ok(Self { service })
    }
}

impl DeleteAllDocuments {
    /// Execute the delete all documents operation.
    ///
    /// Fails without recreating anything unless the drop is acknowledged; otherwise
    /// returns the `ok` flag of the store's answer to the recreation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "cloudant_crud.delete_all_documents",
            skip_all,
            fields(database = %self.service.database),
            err
        )
    )]
    pub async fn send(self, client: &Client) -> Result<bool> {
        let delete_all_documents: DeleteAllDocumentsInput = self.try_into()?;
        let endpoint = delete_all_documents.endpoint;

        let response = http::request(client, Method::DELETE, endpoint.clone(), None).await?;
        if !write::common::acknowledged(&response)? {
            crate::diagnostic!("could not delete the database");
            return Err(Error::NotAcknowledged);
        }

        let response = http::request(client, Method::PUT, endpoint, None)
            .await
            .inspect_err(|error| {
                crate::diagnostic!("could not recreate the database: {error}");
            })?;
        write::common::acknowledged(&response)
    }
}

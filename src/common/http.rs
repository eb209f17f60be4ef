use crate::common::{Error, Result};

use reqwest::{Client, Method, header};
use url::Url;

const JSON: &str = "application/json";

/// Issue one request against the store and return its raw body.
///
/// The status code is not inspected: the store reports failures in the JSON body,
/// which callers decode. There is no timeout and no retry.
pub(crate) async fn request(
    client: &Client,
    method: Method,
    endpoint: Url,
    body: Option<Vec<u8>>,
) -> Result<Vec<u8>> {
    let mut builder = client
        .request(method, endpoint)
        .header(header::CONTENT_TYPE, JSON)
        .header(header::ACCEPT, JSON);
    if let Some(body) = body {
        builder = builder.body(body);
    }
    let body = builder.send().await?.bytes().await?;
    if body.is_empty() {
        return Err(Error::EmptyResponse);
    }
    Ok(body.to_vec())
}

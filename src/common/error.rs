use thiserror::Error as ThisError;

/// Result alias used by every operation in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure of a single operation.
///
/// Operations propagate these with `?`; the [`crate::action`] layer is the only
/// place where they are folded into an [`crate::action::Outcome`].
#[derive(Debug, ThisError)]
pub enum Error {
    /// A required invocation parameter is absent or is not a string.
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),
    /// The endpoint could not be parsed as a URL.
    #[error("invalid endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The base URL cannot carry a path (e.g. `mailto:`).
    #[error("endpoint cannot carry a path")]
    CannotBeABase,
    /// The document id would not address a single document.
    #[error("invalid document id `{0}`")]
    InvalidId(String),
    /// The request could not be sent or its response could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The store answered with an empty body.
    #[error("missing response from the store")]
    EmptyResponse,
    /// A body was not valid JSON or did not have the expected shape.
    #[error("could not decode JSON: {0}")]
    Decode(#[from] serde_json::Error),
    /// A body was valid JSON but not an object.
    #[error("expected a JSON object")]
    NotAnObject,
    /// The store reported an application-level error in its `error` field.
    #[error("store error: {0}")]
    Store(String),
    /// The caller-supplied update body carries an `error` field.
    #[error("payload error: {0}")]
    Payload(String),
    /// The update body has no string `id` field.
    #[error("no `id` provided in the update body")]
    MissingId,
    /// The document to delete could not be looked up.
    #[error("not found")]
    NotFound,
    /// The store answered with `ok: false` where `ok: true` was required.
    #[error("the store did not acknowledge the request")]
    NotAcknowledged,
}

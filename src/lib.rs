#![deny(missing_docs)]
#![deny(warnings)]

//! # Cloudant CRUD
//!
//! Serverless-style CRUD actions for Cloudant and CouchDB databases, spoken over their
//! HTTP API.
//!
//! ## Overview
//!
//! Every action is one-shot: it reads its named parameters, issues one request or a
//! short fixed sequence of requests, decodes the store's JSON answer and returns a flat
//! result map. There is no caching, no retry and no timeout.
//! - Create posts a new document
//! - Read fetches a document by id
//! - Update merges fields into the stored document and writes it back at its revision
//! - Delete removes a document at its current revision
//! - DeleteAll drops the database and recreates it empty
//!
//! ## Quick Example
//!
//! ```no_run
//! use cloudant_crud::action;
//! use reqwest::Client;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new();
//! let params = json!({
//!     "services.cloudant.url": "http://localhost:5984",
//!     "services.cloudant.database": "users",
//!     "body": r#"{"id": "1", "name": "Jane"}"#,
//! });
//! let params = params.as_object().cloned().unwrap_or_default();
//! let outcome = action::update(&client, &params).await;
//! println!("{}", serde_json::to_string(&outcome)?);
//! # Ok(())
//! # }
//! ```
//!
//! The typed operations behind the actions can be used directly and report failures
//! as [`common::Error`]:
//!
//! ```no_run
//! use cloudant_crud::{common, read};
//! use reqwest::Client;
//!
//! # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
//! let get_document = read::get_document::GetDocument {
//!     id: "1".to_string(),
//!     service: common::service::Service {
//!         url: "http://localhost:5984".to_string(),
//!         database: "users".to_string(),
//!     },
//! };
//! let document = get_document.send(client).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@action`] - The five entry points and their result map
//! - [`mod@common`] - Endpoints, envelopes, errors and the shared HTTP helper
//! - [`mod@read`] - Read operations
//! - [`mod@write`] - Write operations

/// Emit a diagnostic on the log stream; compiles to nothing without `tracing`.
macro_rules! diagnostic {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::warn!($($arg)*);
        #[cfg(not(feature = "tracing"))]
        let _ = format_args!($($arg)*);
    }};
}

pub(crate) use diagnostic;

/// Entry points taking named parameters and returning a result map.
pub mod action;

/// Common utilities for endpoints, envelopes and errors.
pub mod common;

/// Read operations for retrieving documents.
pub mod read;

/// Write operations for creating, updating and deleting documents.
///
/// This module provides operations for:
/// - Creating documents
/// - Updating documents by shallow merge
/// - Deleting documents at their current revision
/// - Emptying a database
pub mod write;

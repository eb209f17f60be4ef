//! Write operations for modifying documents and databases.
//!
//! This module provides operations for writing to a Cloudant/CouchDB database:
//! - Creating documents
//! - Updating documents by merging fields into the stored version
//! - Deleting documents at their current revision
//! - Emptying a whole database by dropping and recreating it

/// Common utilities for write operations.
pub mod common;

/// Create document operation for inserting new documents.
pub mod create_document;

/// Delete all documents operation for emptying a database.
pub mod delete_all_documents;

/// Delete document operation for removing a document at its current revision.
pub mod delete_document;

/// Update document operation for merging fields into a stored document.
pub mod update_document;

//! Read operations for retrieving documents from a database.

/// Get document operation for retrieving a single document by id.
pub mod get_document;

//! Error types for the storage layer.

use crate::Capability;
use entitystore_types::{EntityId, IdParseError};
use thiserror::Error;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for collection backends.
pub type CollectionResult<T> = Result<T, CollectionError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity type outside the type-code table.
    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),

    /// The entity cannot be mapped to a document.
    #[error("invalid entity: {0}")]
    InvalidEntity(String),

    /// A language code that cannot be used as a search-terms path segment.
    #[error("invalid language code: {0:?}")]
    InvalidLanguage(String),

    /// A stored document has a missing or malformed `_id`.
    #[error("entity id parsing error: {0}")]
    IdParse(#[from] IdParseError),

    /// Entity not found.
    #[error("entity not found: {0}")]
    NotFound(EntityId),

    /// The backend does not implement the requested capability.
    #[error("{0} not supported")]
    FeatureNotSupported(Capability),

    /// The underlying document collection failed.
    #[error("collection error: {0}")]
    Collection(#[from] CollectionError),
}

/// Errors reported by a [`DocumentCollection`](crate::DocumentCollection).
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The backend rejected or failed the operation.
    #[error("backend error: {0}")]
    Backend(String),

    /// A lock guarding the collection was poisoned by a panicking writer.
    #[error("collection lock poisoned")]
    Poisoned,
}

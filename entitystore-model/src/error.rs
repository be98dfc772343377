use entitystore_types::UnknownEntityType;
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while building or (de)serializing entities.
#[derive(Debug, Error)]
pub enum ModelError {
    /// An entity serialization without a `type` string.
    #[error("the entity serialization does not have a type")]
    MissingType,

    /// The serialization names a type outside the known set.
    #[error(transparent)]
    UnknownType(#[from] UnknownEntityType),

    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The entity could not be turned into a document.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The document is not the serialization of an entity.
    #[error("deserialization error: {0}")]
    Deserialization(String),
}

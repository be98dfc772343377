//! Document store connection seam.
//!
//! A [`DocumentCollection`] is one logical collection of a document store.
//! Concrete drivers live outside this crate; they are responsible for
//! connection pooling, timeouts and retries, and must be safe to share
//! between threads.

use crate::{CollectionResult, Filter};
use entitystore_model::Document;

/// What an upsert did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No document matched; the document was inserted.
    Inserted,
    /// A matching document was replaced by the new one.
    Replaced,
    /// A matching document was already identical; nothing was written.
    Unchanged,
}

/// One collection of a document store.
pub trait DocumentCollection: Send + Sync {
    /// Returns the first document matching `filter`.
    fn find_one(&self, filter: &Filter) -> CollectionResult<Option<Document>>;

    /// Returns every document matching `filter`, in store order.
    fn find(&self, filter: &Filter) -> CollectionResult<Vec<Document>>;

    /// Replaces the whole document matching `filter` with `document`, or
    /// inserts `document` if none matches. Fields of the old document that
    /// are absent from the new one do not survive.
    fn upsert(&self, filter: &Filter, document: Document) -> CollectionResult<UpsertOutcome>;

    /// Creates an index on the dot-separated `path`. Existing indexes are kept.
    fn create_index(&self, path: &str) -> CollectionResult<()>;
}

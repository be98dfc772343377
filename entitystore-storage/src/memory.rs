//! In-process document collection.

use crate::{CollectionError, CollectionResult, DocumentCollection, Filter, UpsertOutcome};
use entitystore_model::Document;
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

/// A [`DocumentCollection`] held in memory, in insertion order.
///
/// Queries scan every document; indexes are only recorded. Useful for tests
/// and for short-lived stores that do not need persistence.
#[derive(Debug, Default)]
pub struct MemoryCollection {
    documents: Mutex<Vec<Document>>,
    indexes: Mutex<BTreeSet<String>>,
}

impl MemoryCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> CollectionResult<usize> {
        Ok(self.documents()?.len())
    }

    pub fn is_empty(&self) -> CollectionResult<bool> {
        Ok(self.documents()?.is_empty())
    }

    /// Paths that have been indexed, sorted.
    pub fn indexes(&self) -> CollectionResult<Vec<String>> {
        let indexes = self.indexes.lock().map_err(|_| CollectionError::Poisoned)?;
        Ok(indexes.iter().cloned().collect())
    }

    fn documents(&self) -> CollectionResult<MutexGuard<'_, Vec<Document>>> {
        self.documents.lock().map_err(|_| CollectionError::Poisoned)
    }
}

impl DocumentCollection for MemoryCollection {
    fn find_one(&self, filter: &Filter) -> CollectionResult<Option<Document>> {
        Ok(self.documents()?.iter().find(|d| filter.matches(d)).cloned())
    }

    fn find(&self, filter: &Filter) -> CollectionResult<Vec<Document>> {
        Ok(self
            .documents()?
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect())
    }

    fn upsert(&self, filter: &Filter, document: Document) -> CollectionResult<UpsertOutcome> {
        let mut documents = self.documents()?;
        match documents.iter().position(|d| filter.matches(d)) {
            Some(index) if documents[index] == document => Ok(UpsertOutcome::Unchanged),
            Some(index) => {
                documents[index] = document;
                Ok(UpsertOutcome::Replaced)
            }
            None => {
                documents.push(document);
                Ok(UpsertOutcome::Inserted)
            }
        }
    }

    fn create_index(&self, path: &str) -> CollectionResult<()> {
        let mut indexes = self.indexes.lock().map_err(|_| CollectionError::Poisoned)?;
        indexes.insert(path.to_string());
        Ok(())
    }
}

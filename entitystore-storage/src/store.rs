//! Store facade and capability traits.
//!
//! A backend implements [`EntityStore`] and overrides the getters for the
//! capabilities it actually has. Every other getter keeps its default and
//! answers [`StoreError::FeatureNotSupported`] when called, so a partial
//! backend is still usable for what it does support.

use crate::{StoreError, StoreResult};
use entitystore_model::{EntityDocument, Item, Property, Term};
use entitystore_types::{EntityId, ItemId, PropertyId};
use std::fmt;

/// An optional sub-interface of an [`EntityStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    EntityDocumentLookup,
    ItemLookup,
    PropertyLookup,
    ItemIdForTermLookup,
    PropertyIdForTermLookup,
    EntityDocumentSaver,
}

impl Capability {
    pub const fn name(&self) -> &'static str {
        match self {
            Capability::EntityDocumentLookup => "EntityDocumentLookup",
            Capability::ItemLookup => "ItemLookup",
            Capability::PropertyLookup => "PropertyLookup",
            Capability::ItemIdForTermLookup => "ItemIdForTermLookup",
            Capability::PropertyIdForTermLookup => "PropertyIdForTermLookup",
            Capability::EntityDocumentSaver => "EntityDocumentSaver",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Point and batch lookup of entities by id.
pub trait EntityDocumentLookup: Send + Sync {
    /// Returns the entity stored under `id`.
    ///
    /// Fails with [`StoreError::NotFound`] if nothing is stored under `id`.
    /// Returns `Ok(None)` if a document exists but cannot be read back as an
    /// entity.
    fn get_entity_document_for_id(&self, id: &EntityId) -> StoreResult<Option<EntityDocument>>;

    /// Returns the entities stored under `ids`, in store order.
    ///
    /// Ids with no document, or whose document cannot be read back, are
    /// left out of the result.
    fn get_entity_documents_for_ids(&self, ids: &[EntityId]) -> StoreResult<Vec<EntityDocument>>;
}

/// Typed lookup of items. A missing item is `Ok(None)`.
pub trait ItemLookup: Send + Sync {
    fn get_item_for_id(&self, id: ItemId) -> StoreResult<Option<Item>>;
}

/// Typed lookup of properties. A missing property is `Ok(None)`.
pub trait PropertyLookup: Send + Sync {
    fn get_property_for_id(&self, id: PropertyId) -> StoreResult<Option<Property>>;
}

/// Finds items having `term` as label or alias, after search normalization.
pub trait ItemIdForTermLookup: Send + Sync {
    fn get_item_ids_for_term(&self, term: &Term) -> StoreResult<Vec<ItemId>>;
}

/// Finds properties having `term` as label or alias, after search normalization.
pub trait PropertyIdForTermLookup: Send + Sync {
    fn get_property_ids_for_term(&self, term: &Term) -> StoreResult<Vec<PropertyId>>;
}

/// Persists entities, replacing whatever was stored under the same id.
pub trait EntityDocumentSaver: Send + Sync {
    fn save_entity_document(&self, entity: &EntityDocument) -> StoreResult<()>;
}

/// The public entry point of a storage backend.
pub trait EntityStore: Send + Sync {
    fn entity_document_lookup(&self) -> StoreResult<&dyn EntityDocumentLookup> {
        Err(StoreError::FeatureNotSupported(Capability::EntityDocumentLookup))
    }

    fn item_lookup(&self) -> StoreResult<&dyn ItemLookup> {
        Err(StoreError::FeatureNotSupported(Capability::ItemLookup))
    }

    fn property_lookup(&self) -> StoreResult<&dyn PropertyLookup> {
        Err(StoreError::FeatureNotSupported(Capability::PropertyLookup))
    }

    fn item_id_for_term_lookup(&self) -> StoreResult<&dyn ItemIdForTermLookup> {
        Err(StoreError::FeatureNotSupported(Capability::ItemIdForTermLookup))
    }

    fn property_id_for_term_lookup(&self) -> StoreResult<&dyn PropertyIdForTermLookup> {
        Err(StoreError::FeatureNotSupported(Capability::PropertyIdForTermLookup))
    }

    fn entity_document_saver(&self) -> StoreResult<&dyn EntityDocumentSaver> {
        Err(StoreError::FeatureNotSupported(Capability::EntityDocumentSaver))
    }

    /// Provisions backend schema and indexes if not done yet.
    ///
    /// Must be repeatable and must never drop existing data.
    fn setup_store(&self) -> StoreResult<()> {
        Ok(())
    }
}

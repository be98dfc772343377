use crate::mapper::{TYPE_FIELD, search_terms_path};
use crate::{
    DocumentBuilder, DocumentCollection, EntityCollection, EntityDocumentLookup,
    EntityDocumentSaver, EntityStore, EntityStoreOptions, ItemIdForTermLookup, ItemLookup,
    PropertyIdForTermLookup, PropertyLookup, StoreResult,
};
use tracing::info;

/// An [`EntityStore`] backed by one document collection.
///
/// Supports every capability.
#[derive(Debug)]
pub struct DocumentEntityStore<C> {
    entities: EntityCollection<C>,
}

impl<C: DocumentCollection> DocumentEntityStore<C> {
    /// Creates a store using the JSON entity codec.
    pub fn new(collection: C, options: EntityStoreOptions) -> Self {
        Self::with_document_builder(collection, DocumentBuilder::with_json_codec(options))
    }

    pub fn with_document_builder(collection: C, document_builder: DocumentBuilder) -> Self {
        Self {
            entities: EntityCollection::new(collection, document_builder),
        }
    }

    pub fn entities(&self) -> &EntityCollection<C> {
        &self.entities
    }
}

impl<C: DocumentCollection> EntityStore for DocumentEntityStore<C> {
    fn entity_document_lookup(&self) -> StoreResult<&dyn EntityDocumentLookup> {
        Ok(&self.entities)
    }

    fn item_lookup(&self) -> StoreResult<&dyn ItemLookup> {
        Ok(&self.entities)
    }

    fn property_lookup(&self) -> StoreResult<&dyn PropertyLookup> {
        Ok(&self.entities)
    }

    fn item_id_for_term_lookup(&self) -> StoreResult<&dyn ItemIdForTermLookup> {
        Ok(&self.entities)
    }

    fn property_id_for_term_lookup(&self) -> StoreResult<&dyn PropertyIdForTermLookup> {
        Ok(&self.entities)
    }

    fn entity_document_saver(&self) -> StoreResult<&dyn EntityDocumentSaver> {
        Ok(&self.entities)
    }

    /// Indexes `_type`, and `sterms.<language>` for each allowed language.
    fn setup_store(&self) -> StoreResult<()> {
        let collection = self.entities.collection();
        let mut indexed = vec![TYPE_FIELD.to_string()];
        if let Some(languages) = self.entities.document_builder().options().languages() {
            for language in languages {
                indexed.push(search_terms_path(language)?);
            }
        }

        for path in &indexed {
            collection.create_index(path)?;
        }
        info!("Entity store set up, indexes: {:?}", indexed);
        Ok(())
    }
}

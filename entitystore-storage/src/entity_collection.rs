//! Entity capabilities over a single document collection.

use crate::mapper::{ID_FIELD, TYPE_FIELD, clean_text_for_search, search_terms_path};
use crate::{
    DocumentBuilder, DocumentCollection, DocumentOutcome, EntityDocumentLookup,
    EntityDocumentSaver, Filter, ItemIdForTermLookup, ItemLookup, PropertyIdForTermLookup,
    PropertyLookup, StoreError, StoreResult,
};
use entitystore_model::{EntityDocument, Item, Property, Term};
use entitystore_types::{EntityId, EntityType, IdParseError, ItemId, PropertyId};
use tracing::debug;

/// Stores entities as documents of one collection, keyed by `_id`.
#[derive(Debug)]
pub struct EntityCollection<C> {
    collection: C,
    document_builder: DocumentBuilder,
}

impl<C: DocumentCollection> EntityCollection<C> {
    pub fn new(collection: C, document_builder: DocumentBuilder) -> Self {
        Self {
            collection,
            document_builder,
        }
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    pub fn document_builder(&self) -> &DocumentBuilder {
        &self.document_builder
    }

    /// Ids of entities of `entity_type` with `term` among their normalized
    /// labels and aliases, in store order.
    pub fn get_entity_ids_for_term(
        &self,
        term: &Term,
        entity_type: EntityType,
    ) -> StoreResult<Vec<EntityId>> {
        let type_code = DocumentBuilder::build_integer_for_type(entity_type.as_str())?;
        let filter = Filter::and([
            Filter::equals(TYPE_FIELD, type_code),
            Filter::equals(
                search_terms_path(&term.language)?,
                clean_text_for_search(&term.text),
            ),
        ]);

        let documents = self.collection.find(&filter)?;
        debug!(
            "Term {:?}@{} matched {} {} documents",
            term.text,
            term.language,
            documents.len(),
            entity_type
        );

        documents
            .iter()
            .map(|document| self.document_builder.build_entity_id_for_document(document))
            .collect()
    }

    fn id_filter(id: &EntityId) -> Filter {
        Filter::equals(ID_FIELD, id.serialization())
    }
}

impl<C: DocumentCollection> EntityDocumentLookup for EntityCollection<C> {
    fn get_entity_document_for_id(&self, id: &EntityId) -> StoreResult<Option<EntityDocument>> {
        let document = self
            .collection
            .find_one(&Self::id_filter(id))?
            .ok_or(StoreError::NotFound(*id))?;

        Ok(self.document_builder.build_entity_for_document(&document).into_option())
    }

    fn get_entity_documents_for_ids(&self, ids: &[EntityId]) -> StoreResult<Vec<EntityDocument>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let filter = Filter::one_of(ID_FIELD, ids.iter().map(EntityId::serialization));
        let documents = self.collection.find(&filter)?;
        debug!("Found {} of {} requested entities", documents.len(), ids.len());

        Ok(documents
            .iter()
            .filter_map(|document| match self.document_builder.build_entity_for_document(document) {
                DocumentOutcome::Found(entity) => Some(entity),
                DocumentOutcome::Absent => None,
            })
            .collect())
    }
}

impl<C: DocumentCollection> EntityDocumentSaver for EntityCollection<C> {
    fn save_entity_document(&self, entity: &EntityDocument) -> StoreResult<()> {
        let document = self.document_builder.build_document_for_entity(entity)?;
        let id = entity.id().ok_or(IdParseError::Missing)?;

        let outcome = self.collection.upsert(&Self::id_filter(&id), document)?;
        debug!("Saved entity {}: {:?}", id, outcome);
        Ok(())
    }
}

impl<C: DocumentCollection> ItemLookup for EntityCollection<C> {
    fn get_item_for_id(&self, id: ItemId) -> StoreResult<Option<Item>> {
        match self.get_entity_document_for_id(&EntityId::Item(id)) {
            Ok(entity) => Ok(entity.and_then(EntityDocument::into_item)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl<C: DocumentCollection> PropertyLookup for EntityCollection<C> {
    fn get_property_for_id(&self, id: PropertyId) -> StoreResult<Option<Property>> {
        match self.get_entity_document_for_id(&EntityId::Property(id)) {
            Ok(entity) => Ok(entity.and_then(EntityDocument::into_property)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl<C: DocumentCollection> ItemIdForTermLookup for EntityCollection<C> {
    fn get_item_ids_for_term(&self, term: &Term) -> StoreResult<Vec<ItemId>> {
        self.get_entity_ids_for_term(term, EntityType::Item)?
            .into_iter()
            .map(|id| match id {
                EntityId::Item(id) => Ok(id),
                other => Err(wrong_type(EntityType::Item, other)),
            })
            .collect()
    }
}

impl<C: DocumentCollection> PropertyIdForTermLookup for EntityCollection<C> {
    fn get_property_ids_for_term(&self, term: &Term) -> StoreResult<Vec<PropertyId>> {
        self.get_entity_ids_for_term(term, EntityType::Property)?
            .into_iter()
            .map(|id| match id {
                EntityId::Property(id) => Ok(id),
                other => Err(wrong_type(EntityType::Property, other)),
            })
            .collect()
    }
}

fn wrong_type(expected: EntityType, found: EntityId) -> StoreError {
    StoreError::IdParse(IdParseError::WrongType {
        expected,
        found: found.serialization(),
    })
}

use entitystore_model::{
    Document, EntityDocument, EntityId, Fingerprint, Item, ItemId, JsonEntityCodec, Property,
    PropertyId, SerializedEntity, Term,
};
use entitystore_storage::{
    Capability, DocumentBuilder, DocumentCollection, DocumentEntityStore, EntityDocumentLookup,
    EntityStore, EntityStoreOptions, Filter, MemoryCollection, StoreError, StoreResult,
    UpsertOutcome,
};
use entitystore_types::{EntityIdParser, IdParseError};
use std::sync::Arc;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn q(n: u64) -> ItemId {
    ItemId::new(n).unwrap()
}

fn p(n: u64) -> PropertyId {
    PropertyId::new(n).unwrap()
}

fn object(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

fn universe() -> Item {
    let mut fp = Fingerprint::new();
    fp.set_label("en", "universe");
    fp.set_label("pl", "Wszechświat");
    fp.set_aliases("en", ["cosmos"]);
    let mut item = Item::new(Some(q(1))).with_fingerprint(fp);
    item.statements = json!({"P18": [{"mainsnak": {"datavalue": {"value": "Hubble ultra deep field.jpg"}}}]});
    item
}

fn highway_system() -> Property {
    let mut fp = Fingerprint::new();
    fp.set_label("en", "highway system");
    Property::new(Some(p(16)), "wikibase-item").with_fingerprint(fp)
}

fn populated_store(options: EntityStoreOptions) -> DocumentEntityStore<MemoryCollection> {
    init_tracing();
    let store = DocumentEntityStore::new(MemoryCollection::new(), options);
    store.setup_store().unwrap();
    let saver = store.entity_document_saver().unwrap();
    saver.save_entity_document(&universe().into()).unwrap();
    saver.save_entity_document(&highway_system().into()).unwrap();
    store
}

// ── point lookup ─────────────────────────────────────────────────

#[test]
fn item_lookup_finds_saved_item() {
    let store = populated_store(EntityStoreOptions::default());
    let item = store.item_lookup().unwrap().get_item_for_id(q(1)).unwrap().unwrap();
    assert_eq!(item, universe());
}

#[test]
fn property_lookup_finds_saved_property() {
    let store = populated_store(EntityStoreOptions::default());
    let property = store
        .property_lookup()
        .unwrap()
        .get_property_for_id(p(16))
        .unwrap()
        .unwrap();
    assert_eq!(property.id, Some(p(16)));
    assert_eq!(property.data_type, "wikibase-item");
}

#[test]
fn typed_lookup_miss_is_none() {
    let store = populated_store(EntityStoreOptions::default());
    assert!(store.item_lookup().unwrap().get_item_for_id(q(1000)).unwrap().is_none());
    assert!(store.property_lookup().unwrap().get_property_for_id(p(1)).unwrap().is_none());
}

#[test]
fn document_lookup_finds_saved_entity() {
    let store = populated_store(EntityStoreOptions::default());
    let entity = store
        .entity_document_lookup()
        .unwrap()
        .get_entity_document_for_id(&EntityId::Property(p(16)))
        .unwrap()
        .unwrap();
    assert_eq!(entity, EntityDocument::Property(highway_system()));
}

#[test]
fn document_lookup_miss_is_not_found() {
    let store = populated_store(EntityStoreOptions::default());
    let missing = EntityId::Item(q(1000));
    let err = store
        .entity_document_lookup()
        .unwrap()
        .get_entity_document_for_id(&missing)
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == missing));
    assert_eq!(err.to_string(), "entity not found: Q1000");
}

#[test]
fn document_lookup_of_corrupt_document_is_none() {
    let store = populated_store(EntityStoreOptions::default());
    store
        .entities()
        .collection()
        .upsert(
            &Filter::equals("_id", "Q2"),
            object(json!({"_id": "Q2", "_type": 0, "type": "item", "labels": 5})),
        )
        .unwrap();

    let entity = store
        .entity_document_lookup()
        .unwrap()
        .get_entity_document_for_id(&EntityId::Item(q(2)))
        .unwrap();
    assert!(entity.is_none());
}

// ── batch lookup ─────────────────────────────────────────────────

#[test]
fn batch_lookup_omits_missing_ids() {
    let store = populated_store(EntityStoreOptions::default());
    let results = store
        .entity_document_lookup()
        .unwrap()
        .get_entity_documents_for_ids(&[EntityId::Item(q(1)), EntityId::Item(q(1000))])
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id(), Some(EntityId::Item(q(1))));
}

#[test]
fn batch_lookup_omits_corrupt_documents() {
    let store = populated_store(EntityStoreOptions::default());
    store
        .entities()
        .collection()
        .upsert(
            &Filter::equals("_id", "Q2"),
            object(json!({"_id": "Q2", "_type": 0, "type": "item", "labels": "oops"})),
        )
        .unwrap();

    let results = store
        .entity_document_lookup()
        .unwrap()
        .get_entity_documents_for_ids(&[
            EntityId::Item(q(2)),
            EntityId::Item(q(1)),
            EntityId::Property(p(16)),
        ])
        .unwrap();

    let ids: Vec<_> = results.iter().filter_map(EntityDocument::id).collect();
    assert_eq!(ids, vec![EntityId::Item(q(1)), EntityId::Property(p(16))]);
}

#[test]
fn batch_lookup_follows_store_order() {
    let store = populated_store(EntityStoreOptions::default());
    let results = store
        .entity_document_lookup()
        .unwrap()
        .get_entity_documents_for_ids(&[EntityId::Property(p(16)), EntityId::Item(q(1))])
        .unwrap();

    let ids: Vec<_> = results.iter().filter_map(EntityDocument::id).collect();
    assert_eq!(ids, vec![EntityId::Item(q(1)), EntityId::Property(p(16))]);
}

#[test]
fn batch_lookup_of_nothing_is_empty() {
    let store = populated_store(EntityStoreOptions::default());
    let results = store
        .entity_document_lookup()
        .unwrap()
        .get_entity_documents_for_ids(&[])
        .unwrap();
    assert!(results.is_empty());
}

// ── saving ───────────────────────────────────────────────────────

#[test]
fn save_replaces_whole_document() {
    let store = populated_store(EntityStoreOptions::default());
    let saver = store.entity_document_saver().unwrap();

    let mut replacement = Item::new(Some(q(1)));
    replacement.fingerprint.set_label("en", "cosmos");
    saver.save_entity_document(&replacement.clone().into()).unwrap();

    let collection = store.entities().collection();
    let stored = collection.find(&Filter::equals("_id", "Q1")).unwrap();
    assert_eq!(stored.len(), 1);
    assert!(!stored[0].contains_key("claims"));
    assert_eq!(stored[0]["sterms"], json!({"en": ["cosmos"]}));
    assert_eq!(collection.len().unwrap(), 2);

    let item = store.item_lookup().unwrap().get_item_for_id(q(1)).unwrap().unwrap();
    assert_eq!(item, replacement);
}

#[test]
fn saving_unchanged_entity_writes_nothing() {
    let store = populated_store(EntityStoreOptions::default());
    let document = store
        .entities()
        .document_builder()
        .build_document_for_entity(&universe().into())
        .unwrap();

    let outcome = store
        .entities()
        .collection()
        .upsert(&Filter::equals("_id", "Q1"), document)
        .unwrap();
    assert_eq!(outcome, UpsertOutcome::Unchanged);

    store
        .entity_document_saver()
        .unwrap()
        .save_entity_document(&universe().into())
        .unwrap();
    assert_eq!(store.entities().collection().len().unwrap(), 2);
}

#[test]
fn saving_entity_without_id_fails() {
    let store = populated_store(EntityStoreOptions::default());
    let err = store
        .entity_document_saver()
        .unwrap()
        .save_entity_document(&Item::new(None).into())
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidEntity(_)));
}

#[test]
fn saving_entity_with_id_of_other_type_fails_and_stores_nothing() {
    let store = populated_store(EntityStoreOptions::default());
    let mislabeled = SerializedEntity::new(
        Some(EntityId::Property(p(1))),
        object(json!({"type": "item", "labels": {}})),
    )
    .unwrap();

    let err = store
        .entity_document_saver()
        .unwrap()
        .save_entity_document(&mislabeled.into())
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidEntity(_)));

    let collection = store.entities().collection();
    assert!(collection.find_one(&Filter::equals("_id", "P1")).unwrap().is_none());
    assert!(store.property_lookup().unwrap().get_property_for_id(p(1)).unwrap().is_none());
}

/// Accepts nothing, so only the write path can be exercised.
struct RejectingIdParser;

impl EntityIdParser for RejectingIdParser {
    fn parse(&self, serialization: &str) -> Result<EntityId, IdParseError> {
        Err(IdParseError::Malformed(serialization.to_string()))
    }
}

#[test]
fn save_does_not_reparse_the_id_it_wrote() {
    init_tracing();
    let builder = DocumentBuilder::new(
        Arc::new(JsonEntityCodec),
        Arc::new(JsonEntityCodec),
        Arc::new(RejectingIdParser),
        EntityStoreOptions::default(),
    );
    let store = DocumentEntityStore::with_document_builder(MemoryCollection::new(), builder);

    store
        .entity_document_saver()
        .unwrap()
        .save_entity_document(&universe().into())
        .unwrap();

    let stored = store.entities().collection().find_one(&Filter::equals("_id", "Q1")).unwrap();
    assert!(stored.is_some());
}

#[test]
fn save_with_language_allow_list() {
    let store = populated_store(EntityStoreOptions::new().with_languages(["en"]));
    let stored = store
        .entities()
        .collection()
        .find_one(&Filter::equals("_id", "Q1"))
        .unwrap()
        .unwrap();

    assert_eq!(stored["labels"], json!({"en": {"language": "en", "value": "universe"}}));
    assert_eq!(stored["sterms"], json!({"en": ["universe", "cosmos"]}));
}

// ── term lookup ──────────────────────────────────────────────────

#[test]
fn item_ids_for_term() {
    let store = populated_store(EntityStoreOptions::default());
    let lookup = store.item_id_for_term_lookup().unwrap();

    assert_eq!(lookup.get_item_ids_for_term(&Term::new("en", "universe")).unwrap(), vec![q(1)]);
    assert_eq!(lookup.get_item_ids_for_term(&Term::new("en", "Cosmos")).unwrap(), vec![q(1)]);
    assert!(lookup.get_item_ids_for_term(&Term::new("pl", "Kosmos")).unwrap().is_empty());
    assert_eq!(
        lookup.get_item_ids_for_term(&Term::new("pl", "WSZECHŚWIAT")).unwrap(),
        vec![q(1)]
    );
}

#[test]
fn property_ids_for_term() {
    let store = populated_store(EntityStoreOptions::default());
    let lookup = store.property_id_for_term_lookup().unwrap();

    assert_eq!(
        lookup.get_property_ids_for_term(&Term::new("en", "highway system")).unwrap(),
        vec![p(16)]
    );
    assert!(lookup.get_property_ids_for_term(&Term::new("en", "universe")).unwrap().is_empty());
}

#[test]
fn term_lookup_respects_language_allow_list() {
    let store = populated_store(EntityStoreOptions::new().with_languages(["en"]));
    let lookup = store.item_id_for_term_lookup().unwrap();
    assert!(lookup.get_item_ids_for_term(&Term::new("pl", "Wszechświat")).unwrap().is_empty());
}

#[test]
fn term_lookup_rejects_document_without_id() {
    let store = populated_store(EntityStoreOptions::default());
    store
        .entities()
        .collection()
        .upsert(
            &Filter::equals("_id", "Q9"),
            object(json!({"_type": 0, "type": "item", "sterms": {"en": ["ghost"]}})),
        )
        .unwrap();

    let err = store
        .item_id_for_term_lookup()
        .unwrap()
        .get_item_ids_for_term(&Term::new("en", "ghost"))
        .unwrap_err();
    assert!(matches!(err, StoreError::IdParse(_)));
}

#[test]
fn term_lookup_rejects_dotted_language() {
    let store = populated_store(EntityStoreOptions::default());
    let err = store
        .item_id_for_term_lookup()
        .unwrap()
        .get_item_ids_for_term(&Term::new("en.gb", "universe"))
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidLanguage(language) if language == "en.gb"));
}

// ── setup ────────────────────────────────────────────────────────

#[test]
fn setup_store_rejects_dotted_language() {
    let store = DocumentEntityStore::new(
        MemoryCollection::new(),
        EntityStoreOptions::new().with_languages(["en", "de.ch"]),
    );
    let err = store.setup_store().unwrap_err();
    assert!(matches!(err, StoreError::InvalidLanguage(language) if language == "de.ch"));
}

#[test]
fn setup_store_is_repeatable_and_keeps_data() {
    let store = populated_store(EntityStoreOptions::new().with_languages(["en", "fr"]));
    store.setup_store().unwrap();

    let collection = store.entities().collection();
    assert_eq!(
        collection.indexes().unwrap(),
        vec!["_type".to_string(), "sterms.en".to_string(), "sterms.fr".to_string()]
    );
    assert_eq!(collection.len().unwrap(), 2);
}

// ── capability negotiation ───────────────────────────────────────

struct NothingStore;

impl EntityStore for NothingStore {}

struct LookupOnlyStore {
    inner: DocumentEntityStore<MemoryCollection>,
}

impl EntityStore for LookupOnlyStore {
    fn entity_document_lookup(&self) -> StoreResult<&dyn EntityDocumentLookup> {
        self.inner.entity_document_lookup()
    }
}

fn unsupported<T>(result: StoreResult<T>) -> Capability {
    match result {
        Err(StoreError::FeatureNotSupported(capability)) => capability,
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("capability unexpectedly supported"),
    }
}

#[test]
fn store_without_capabilities() {
    let store = NothingStore;
    assert_eq!(unsupported(store.entity_document_lookup()), Capability::EntityDocumentLookup);
    assert_eq!(unsupported(store.item_lookup()), Capability::ItemLookup);
    assert_eq!(unsupported(store.property_lookup()), Capability::PropertyLookup);
    assert_eq!(unsupported(store.item_id_for_term_lookup()), Capability::ItemIdForTermLookup);
    assert_eq!(
        unsupported(store.property_id_for_term_lookup()),
        Capability::PropertyIdForTermLookup
    );
    assert_eq!(unsupported(store.entity_document_saver()), Capability::EntityDocumentSaver);
    assert!(store.setup_store().is_ok());
}

#[test]
fn feature_not_supported_names_capability() {
    let err = NothingStore.item_lookup().err().unwrap();
    assert_eq!(err.to_string(), "ItemLookup not supported");
}

#[test]
fn partial_store_serves_what_it_supports() {
    let store = LookupOnlyStore {
        inner: populated_store(EntityStoreOptions::default()),
    };

    let entity = store
        .entity_document_lookup()
        .unwrap()
        .get_entity_document_for_id(&EntityId::Item(q(1)))
        .unwrap();
    assert!(entity.is_some());
    assert_eq!(unsupported(store.entity_document_saver()), Capability::EntityDocumentSaver);
}

#[test]
fn store_is_shareable_between_threads() {
    let store = Arc::new(populated_store(EntityStoreOptions::default()));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            std::thread::spawn(move || {
                store
                    .item_lookup()
                    .unwrap()
                    .get_item_for_id(q(1))
                    .unwrap()
                    .is_some()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

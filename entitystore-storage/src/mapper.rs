//! Entity ↔ document mapping.
//!
//! A stored document is the entity serialization plus three indexed fields:
//! - `_id`: the canonical entity id, primary key of the collection
//! - `_type`: the integer code of the entity type
//! - `sterms`: per language, the normalized labels and aliases used for
//!   term lookups. Only present for entities with a fingerprint.

use crate::{EntityStoreOptions, StoreError, StoreResult};
use entitystore_model::{
    Document, EntityDeserializer, EntityDocument, EntitySerializer, Fingerprint, JsonEntityCodec,
};
use entitystore_types::{BasicEntityIdParser, EntityId, EntityIdParser, EntityType, IdParseError};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

pub const ID_FIELD: &str = "_id";
pub const TYPE_FIELD: &str = "_type";
pub const SEARCH_TERMS_FIELD: &str = "sterms";

/// Entity type ↔ `_type` code. Read by both the write and the read path.
const TYPE_CODES: &[(EntityType, i64)] = &[(EntityType::Item, 0), (EntityType::Property, 1)];

/// Characters replaced by a space before a text becomes a search token.
const SEARCH_SEPARATORS: [char; 6] = ['\'', '\u{2019}', '\u{02BC}', '-', '\u{2010}', '\u{2011}'];

/// Path of the `sterms` tokens of `language`.
///
/// Paths are dot-separated, so a language code containing `.` (or an empty
/// one) could never be matched and is rejected.
pub fn search_terms_path(language: &str) -> StoreResult<String> {
    if language.is_empty() || language.contains('.') {
        return Err(StoreError::InvalidLanguage(language.to_string()));
    }
    Ok(format!("{SEARCH_TERMS_FIELD}.{language}"))
}

/// Result of reading an entity back from a stored document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentOutcome {
    Found(EntityDocument),
    /// The document could not be deserialized.
    Absent,
}

impl DocumentOutcome {
    pub fn into_option(self) -> Option<EntityDocument> {
        match self {
            DocumentOutcome::Found(entity) => Some(entity),
            DocumentOutcome::Absent => None,
        }
    }
}

/// Normalizes a label or alias into an opaque search token.
///
/// Lower-cases, turns apostrophes and hyphens into spaces and trims. The
/// result is compared byte for byte and never tokenized. Idempotent.
pub fn clean_text_for_search(text: &str) -> String {
    text.to_lowercase()
        .replace(&SEARCH_SEPARATORS[..], " ")
        .trim()
        .to_string()
}

/// Builds stored documents from entities and entities from stored documents.
#[derive(Clone)]
pub struct DocumentBuilder {
    serializer: Arc<dyn EntitySerializer>,
    deserializer: Arc<dyn EntityDeserializer>,
    id_parser: Arc<dyn EntityIdParser>,
    options: EntityStoreOptions,
}

impl DocumentBuilder {
    pub fn new(
        serializer: Arc<dyn EntitySerializer>,
        deserializer: Arc<dyn EntityDeserializer>,
        id_parser: Arc<dyn EntityIdParser>,
        options: EntityStoreOptions,
    ) -> Self {
        Self {
            serializer,
            deserializer,
            id_parser,
            options,
        }
    }

    /// A builder using [`JsonEntityCodec`] and [`BasicEntityIdParser`].
    pub fn with_json_codec(options: EntityStoreOptions) -> Self {
        Self::new(
            Arc::new(JsonEntityCodec),
            Arc::new(JsonEntityCodec),
            Arc::new(BasicEntityIdParser),
            options,
        )
    }

    pub fn options(&self) -> &EntityStoreOptions {
        &self.options
    }

    /// Builds the document to store for `entity`.
    ///
    /// With a language allow-list, the fingerprint is filtered on a copy;
    /// `entity` itself is never modified.
    pub fn build_document_for_entity(&self, entity: &EntityDocument) -> StoreResult<Document> {
        let id = entity.id().ok_or_else(|| {
            StoreError::InvalidEntity(format!("{} entity without id", entity.entity_type()))
        })?;
        let type_code = Self::build_integer_for_type(entity.entity_type())?;
        if id.entity_type().as_str() != entity.entity_type() {
            return Err(StoreError::InvalidEntity(format!(
                "id {id} does not belong to a {} entity",
                entity.entity_type()
            )));
        }

        let entity = match self.options.languages() {
            Some(languages) => Cow::Owned(filter_languages(entity, languages)),
            None => Cow::Borrowed(entity),
        };

        let mut document = self
            .serializer
            .serialize(&entity)
            .map_err(|e| StoreError::InvalidEntity(format!("cannot serialize {id}: {e}")))?;

        document.insert(ID_FIELD.into(), Value::from(id.serialization()));
        document.insert(TYPE_FIELD.into(), Value::from(type_code));
        if let Some(fingerprint) = entity.fingerprint() {
            document.insert(
                SEARCH_TERMS_FIELD.into(),
                Value::Object(build_search_terms(fingerprint)),
            );
        }

        Ok(document)
    }

    /// Returns the `_type` code of a type name.
    pub fn build_integer_for_type(entity_type: &str) -> StoreResult<i64> {
        let entity_type: EntityType = entity_type
            .parse()
            .map_err(|_| StoreError::UnknownEntityType(entity_type.to_string()))?;

        TYPE_CODES
            .iter()
            .find(|(t, _)| *t == entity_type)
            .map(|(_, code)| *code)
            .ok_or_else(|| StoreError::UnknownEntityType(entity_type.to_string()))
    }

    /// Returns the entity type of a `_type` code.
    pub fn build_type_for_integer(code: i64) -> StoreResult<EntityType> {
        TYPE_CODES
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(t, _)| *t)
            .ok_or_else(|| StoreError::UnknownEntityType(format!("type code {code}")))
    }

    /// Reads an entity back from a stored document.
    ///
    /// Deserialization failures become [`DocumentOutcome::Absent`] so that one
    /// corrupt document cannot fail a batch read.
    pub fn build_entity_for_document(&self, document: &Document) -> DocumentOutcome {
        match self.deserializer.deserialize(document) {
            Ok(entity) => DocumentOutcome::Found(entity),
            Err(e) => {
                let id = document.get(ID_FIELD).and_then(Value::as_str).unwrap_or("<no id>");
                warn!("Skipping stored document {} that cannot be deserialized: {}", id, e);
                DocumentOutcome::Absent
            }
        }
    }

    /// Reads the entity id out of the `_id` field.
    ///
    /// A missing `_id` is an error, not an absent entity: it means the
    /// collection itself is corrupt.
    pub fn build_entity_id_for_document(&self, document: &Document) -> StoreResult<EntityId> {
        let value = document.get(ID_FIELD).ok_or(IdParseError::Missing)?;
        let serialization = value
            .as_str()
            .ok_or_else(|| IdParseError::Malformed(value.to_string()))?;
        Ok(self.id_parser.parse(serialization)?)
    }
}

impl fmt::Debug for DocumentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentBuilder")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

fn filter_languages(entity: &EntityDocument, languages: &[String]) -> EntityDocument {
    match entity {
        EntityDocument::Item(item) => {
            let mut item = item.clone();
            item.fingerprint = item.fingerprint.with_languages(languages);
            EntityDocument::Item(item)
        }
        EntityDocument::Property(property) => {
            let mut property = property.clone();
            property.fingerprint = property.fingerprint.with_languages(languages);
            EntityDocument::Property(property)
        }
        EntityDocument::Serialized(_) => entity.clone(),
    }
}

/// Labels first, then aliases, each under its language.
fn build_search_terms(fingerprint: &Fingerprint) -> Map<String, Value> {
    let mut search_terms = Map::new();

    for label in fingerprint.labels.iter() {
        push_search_term(&mut search_terms, &label.language, &label.text);
    }
    for group in fingerprint.aliases.iter() {
        for alias in &group.aliases {
            push_search_term(&mut search_terms, &group.language, alias);
        }
    }

    search_terms
}

fn push_search_term(search_terms: &mut Map<String, Value>, language: &str, text: &str) {
    let tokens = search_terms
        .entry(language)
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Value::Array(tokens) = tokens {
        tokens.push(Value::from(clean_text_for_search(text)));
    }
}

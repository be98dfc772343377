//! Entity serialization seam.
//!
//! Stores never serialize entities themselves; they go through an
//! [`EntitySerializer`] / [`EntityDeserializer`] pair so that the payload
//! format can be swapped per deployment. [`JsonEntityCodec`] writes the
//! Wikibase JSON layout:
//!
//! ```json
//! {"type": "item", "id": "Q1",
//!  "labels": {"en": {"language": "en", "value": "universe"}},
//!  "descriptions": {}, "aliases": {"en": [{"language": "en", "value": "cosmos"}]},
//!  "claims": {}, "sitelinks": {}}
//! ```

use crate::{EntityDocument, ModelError, ModelResult};
use entitystore_types::EntityType;
use serde_json::{Map, Value};

/// A nested-mapping document, as exchanged with a document store.
pub type Document = Map<String, Value>;

/// Turns an entity into its structured payload.
pub trait EntitySerializer: Send + Sync {
    fn serialize(&self, entity: &EntityDocument) -> ModelResult<Document>;
}

/// Rebuilds an entity from its structured payload.
///
/// Implementations must ignore keys they do not know about; stores add
/// their own indexed fields next to the payload.
pub trait EntityDeserializer: Send + Sync {
    fn deserialize(&self, document: &Document) -> ModelResult<EntityDocument>;
}

/// Codec for the Wikibase JSON entity layout, dispatching on `type`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEntityCodec;

impl EntitySerializer for JsonEntityCodec {
    fn serialize(&self, entity: &EntityDocument) -> ModelResult<Document> {
        let (entity_type, value) = match entity {
            EntityDocument::Item(item) => (EntityType::Item, serde_json::to_value(item)?),
            EntityDocument::Property(property) => {
                (EntityType::Property, serde_json::to_value(property)?)
            }
            EntityDocument::Serialized(entity) => return Ok(entity.serialization().clone()),
        };

        let Value::Object(mut document) = value else {
            return Err(ModelError::Serialization(format!(
                "{entity_type} did not serialize to an object"
            )));
        };
        document.insert("type".into(), Value::from(entity_type.as_str()));
        Ok(document)
    }
}

impl EntityDeserializer for JsonEntityCodec {
    fn deserialize(&self, document: &Document) -> ModelResult<EntityDocument> {
        let entity_type: EntityType = document
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ModelError::MissingType)?
            .parse()?;

        let value = Value::Object(document.clone());
        Ok(match entity_type {
            EntityType::Item => EntityDocument::Item(serde_json::from_value(value)?),
            EntityType::Property => EntityDocument::Property(serde_json::from_value(value)?),
        })
    }
}

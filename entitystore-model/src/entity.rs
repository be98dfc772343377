use crate::{Document, Fingerprint, ModelError, ModelResult};
use entitystore_types::{EntityId, EntityType, ItemId, PropertyId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An item: a fingerprint plus statements and site links.
///
/// Statements and site links are carried as opaque JSON; the store persists
/// them verbatim and never looks inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    #[serde(flatten)]
    pub fingerprint: Fingerprint,
    #[serde(rename = "claims", default, skip_serializing_if = "Value::is_null")]
    pub statements: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub sitelinks: Value,
}

impl Item {
    /// Creates an item with an empty fingerprint and no statements.
    #[must_use]
    pub fn new(id: Option<ItemId>) -> Self {
        Self {
            id,
            fingerprint: Fingerprint::new(),
            statements: Value::Null,
            sitelinks: Value::Null,
        }
    }

    #[must_use]
    pub fn with_fingerprint(mut self, fingerprint: Fingerprint) -> Self {
        self.fingerprint = fingerprint;
        self
    }
}

/// A property: a fingerprint, the data type of its values, and statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PropertyId>,
    #[serde(rename = "datatype")]
    pub data_type: String,
    #[serde(flatten)]
    pub fingerprint: Fingerprint,
    #[serde(rename = "claims", default, skip_serializing_if = "Value::is_null")]
    pub statements: Value,
}

impl Property {
    /// Creates a property with an empty fingerprint and no statements.
    #[must_use]
    pub fn new(id: Option<PropertyId>, data_type: impl Into<String>) -> Self {
        Self {
            id,
            data_type: data_type.into(),
            fingerprint: Fingerprint::new(),
            statements: Value::Null,
        }
    }

    #[must_use]
    pub fn with_fingerprint(mut self, fingerprint: Fingerprint) -> Self {
        self.fingerprint = fingerprint;
        self
    }
}

/// An entity that is nothing but its serialization.
///
/// Import tooling uses this to save dump records without a
/// deserialize/serialize round trip. It exposes no fingerprint.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedEntity {
    id: Option<EntityId>,
    entity_type: String,
    serialization: Document,
}

impl SerializedEntity {
    /// Wraps a serialization. Fails if it has no `type` string.
    pub fn new(id: Option<EntityId>, serialization: Document) -> ModelResult<Self> {
        let entity_type = serialization
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ModelError::MissingType)?
            .to_string();

        Ok(Self {
            id,
            entity_type,
            serialization,
        })
    }

    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn serialization(&self) -> &Document {
        &self.serialization
    }

    pub fn into_serialization(self) -> Document {
        self.serialization
    }
}

/// Any entity the store can persist.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityDocument {
    Item(Item),
    Property(Property),
    Serialized(SerializedEntity),
}

impl EntityDocument {
    /// The entity id, `None` only before one has been assigned.
    pub fn id(&self) -> Option<EntityId> {
        match self {
            EntityDocument::Item(item) => item.id.map(EntityId::Item),
            EntityDocument::Property(property) => property.id.map(EntityId::Property),
            EntityDocument::Serialized(entity) => entity.id(),
        }
    }

    /// The type name, as found in the serialization.
    ///
    /// For serialized entities this is whatever the payload claims and may
    /// be outside [`EntityType`].
    pub fn entity_type(&self) -> &str {
        match self {
            EntityDocument::Item(_) => EntityType::Item.as_str(),
            EntityDocument::Property(_) => EntityType::Property.as_str(),
            EntityDocument::Serialized(entity) => entity.entity_type(),
        }
    }

    /// The fingerprint, for entities that have one.
    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        match self {
            EntityDocument::Item(item) => Some(&item.fingerprint),
            EntityDocument::Property(property) => Some(&property.fingerprint),
            EntityDocument::Serialized(_) => None,
        }
    }

    pub fn into_item(self) -> Option<Item> {
        match self {
            EntityDocument::Item(item) => Some(item),
            _ => None,
        }
    }

    pub fn into_property(self) -> Option<Property> {
        match self {
            EntityDocument::Property(property) => Some(property),
            _ => None,
        }
    }
}

impl From<Item> for EntityDocument {
    fn from(item: Item) -> Self {
        EntityDocument::Item(item)
    }
}

impl From<Property> for EntityDocument {
    fn from(property: Property) -> Self {
        EntityDocument::Property(property)
    }
}

impl From<SerializedEntity> for EntityDocument {
    fn from(entity: SerializedEntity) -> Self {
        EntityDocument::Serialized(entity)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of an entity.
///
/// The set is closed on purpose: every place that switches on the entity
/// type must be revisited when a variant is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Item,
    Property,
}

impl EntityType {
    /// All known entity types, in declaration order.
    pub const ALL: [EntityType; 2] = [EntityType::Item, EntityType::Property];

    /// Returns the canonical name used in serializations (`"item"`, `"property"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityType::Item => "item",
            EntityType::Property => "property",
        }
    }

    /// Returns the prefix of serialized ids of this type.
    #[must_use]
    pub const fn id_prefix(&self) -> char {
        match self {
            EntityType::Item => 'Q',
            EntityType::Property => 'P',
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a type name is outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity type: {0}")]
pub struct UnknownEntityType(pub String);

impl FromStr for EntityType {
    type Err = UnknownEntityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "item" => Ok(EntityType::Item),
            "property" => Ok(EntityType::Property),
            other => Err(UnknownEntityType(other.to_string())),
        }
    }
}

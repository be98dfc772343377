//! Identifier types used throughout the entity store.
//!
//! Ids are a type prefix followed by a positive serial number (`Q42`,
//! `P31`). The canonical serialization is the upper-case prefix followed by
//! the decimal serial without leading zeros; that string is the primary key
//! of a stored document.

use crate::EntityType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors that can occur while parsing an entity id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    /// There was no id to parse.
    #[error("missing entity id")]
    Missing,

    /// The string is not a serialized entity id.
    #[error("malformed entity id: {0:?}")]
    Malformed(String),

    /// The string is a valid id, but of another entity type.
    #[error("expected {expected} id, got {found:?}")]
    WrongType { expected: EntityType, found: String },
}

/// Splits `Q42` / `q42` into its type and serial.
fn parse_parts(s: &str) -> Result<(EntityType, u64), IdParseError> {
    let malformed = || IdParseError::Malformed(s.to_string());

    let mut chars = s.chars();
    let entity_type = match chars.next().map(|c| c.to_ascii_uppercase()) {
        Some('Q') => EntityType::Item,
        Some('P') => EntityType::Property,
        _ => return Err(malformed()),
    };

    let digits = chars.as_str();
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(malformed());
    }
    let serial = digits.parse::<u64>().map_err(|_| malformed())?;

    Ok((entity_type, serial))
}

/// Identifier of an item (`Q…`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(u64);

impl ItemId {
    /// Creates an item id from its numeric serial.
    ///
    /// Returns `None` for zero, which is never a valid serial.
    #[must_use]
    pub const fn new(serial: u64) -> Option<Self> {
        if serial == 0 { None } else { Some(Self(serial)) }
    }

    /// Returns the numeric serial.
    #[must_use]
    pub const fn serial(&self) -> u64 {
        self.0
    }

    /// Parses an item id from a string such as `Q42`.
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_parts(s)? {
            (EntityType::Item, serial) => Ok(Self(serial)),
            _ => Err(IdParseError::WrongType {
                expected: EntityType::Item,
                found: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ItemId {
    type Error = IdParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.to_string()
    }
}

/// Identifier of a property (`P…`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropertyId(u64);

impl PropertyId {
    /// Creates a property id from its numeric serial.
    ///
    /// Returns `None` for zero, which is never a valid serial.
    #[must_use]
    pub const fn new(serial: u64) -> Option<Self> {
        if serial == 0 { None } else { Some(Self(serial)) }
    }

    /// Returns the numeric serial.
    #[must_use]
    pub const fn serial(&self) -> u64 {
        self.0
    }

    /// Parses a property id from a string such as `P31`.
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl FromStr for PropertyId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_parts(s)? {
            (EntityType::Property, serial) => Ok(Self(serial)),
            _ => Err(IdParseError::WrongType {
                expected: EntityType::Property,
                found: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for PropertyId {
    type Error = IdParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PropertyId> for String {
    fn from(id: PropertyId) -> Self {
        id.to_string()
    }
}

/// Type-discriminating identifier of any entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EntityId {
    Item(ItemId),
    Property(PropertyId),
}

impl EntityId {
    /// Returns the type of entity this id refers to.
    #[must_use]
    pub const fn entity_type(&self) -> EntityType {
        match self {
            EntityId::Item(_) => EntityType::Item,
            EntityId::Property(_) => EntityType::Property,
        }
    }

    /// Returns the canonical string form, used as the document primary key.
    #[must_use]
    pub fn serialization(&self) -> String {
        self.to_string()
    }

    /// Parses an entity id from a string.
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Item(id) => id.fmt(f),
            EntityId::Property(id) => id.fmt(f),
        }
    }
}

impl FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match parse_parts(s)? {
            (EntityType::Item, serial) => EntityId::Item(ItemId(serial)),
            (EntityType::Property, serial) => EntityId::Property(PropertyId(serial)),
        })
    }
}

impl TryFrom<String> for EntityId {
    type Error = IdParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.to_string()
    }
}

impl From<ItemId> for EntityId {
    fn from(id: ItemId) -> Self {
        EntityId::Item(id)
    }
}

impl From<PropertyId> for EntityId {
    fn from(id: PropertyId) -> Self {
        EntityId::Property(id)
    }
}

/// Parses serialized entity ids.
///
/// The mapper reads ids back out of stored documents through this trait so
/// that deployments with extra id formats can plug in their own parser.
pub trait EntityIdParser: Send + Sync {
    fn parse(&self, serialization: &str) -> Result<EntityId, IdParseError>;
}

/// Parser accepting the `Q…` / `P…` formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicEntityIdParser;

impl EntityIdParser for BasicEntityIdParser {
    fn parse(&self, serialization: &str) -> Result<EntityId, IdParseError> {
        serialization.parse()
    }
}

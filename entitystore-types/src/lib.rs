//! Core type definitions for the entity store.
//!
//! This crate defines the identifier types every other crate in the
//! workspace depends on:
//! - [`EntityType`]: the closed set of entity kinds the store knows about
//! - [`ItemId`], [`PropertyId`] and the type-discriminating [`EntityId`]
//! - [`EntityIdParser`]: the pluggable string → id parsing seam
//!
//! Everything about labels, payloads and serialization lives in
//! `entitystore-model`.

mod entity_type;
mod ids;

pub use entity_type::{EntityType, UnknownEntityType};
pub use ids::{BasicEntityIdParser, EntityId, EntityIdParser, IdParseError, ItemId, PropertyId};

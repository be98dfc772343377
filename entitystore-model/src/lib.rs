//! Entity model for the entity store.
//!
//! Defines the domain records the storage layer persists:
//! - [`Term`], [`TermList`], [`AliasGroup`], [`AliasGroupList`] and the
//!   [`Fingerprint`] bundling them: multilingual labels, descriptions and aliases
//! - [`Item`], [`Property`]: typed entities carrying a fingerprint
//! - [`SerializedEntity`]: an entity that is only its serialization, for
//!   import paths that never need the typed form
//! - [`EntityDocument`]: the sum of the above, which is what stores accept and return
//! - [`EntitySerializer`] / [`EntityDeserializer`]: the codec seam, with
//!   [`JsonEntityCodec`] as the default implementation

mod codec;
mod entity;
mod error;
mod fingerprint;
mod term;

pub use codec::{Document, EntityDeserializer, EntitySerializer, JsonEntityCodec};
pub use entity::{EntityDocument, Item, Property, SerializedEntity};
pub use error::{ModelError, ModelResult};
pub use fingerprint::Fingerprint;
pub use term::{AliasGroup, AliasGroupList, Term, TermList};

pub use entitystore_types::{EntityId, EntityType, ItemId, PropertyId};

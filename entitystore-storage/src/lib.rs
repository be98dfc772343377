//! Document store layer for the entity store.
//!
//! Maps entities to documents of a schemaless document store and back, and
//! exposes the result through a capability-negotiating facade.
//!
//! # Architecture
//!
//! - [`DocumentBuilder`] turns entities into indexed documents (`_id`,
//!   `_type`, `sterms`) and documents back into entities
//! - [`EntityStore`] is the facade; callers ask it for a capability
//!   ([`EntityDocumentLookup`], [`ItemLookup`], [`EntityDocumentSaver`], …)
//!   and get [`StoreError::FeatureNotSupported`] if the backend lacks it
//! - [`DocumentCollection`] is the seam to a concrete document store driver;
//!   [`MemoryCollection`] is the in-process implementation
//! - [`EntityCollection`] implements the capabilities over one collection,
//!   and [`DocumentEntityStore`] exposes them as an [`EntityStore`]

mod collection;
mod document_store;
mod entity_collection;
mod error;
mod filter;
pub mod mapper;
mod memory;
mod options;
mod store;

pub use collection::{DocumentCollection, UpsertOutcome};
pub use document_store::DocumentEntityStore;
pub use entity_collection::EntityCollection;
pub use error::{CollectionError, CollectionResult, StoreError, StoreResult};
pub use filter::Filter;
pub use mapper::{DocumentBuilder, DocumentOutcome, clean_text_for_search};
pub use memory::MemoryCollection;
pub use options::EntityStoreOptions;
pub use store::{
    Capability, EntityDocumentLookup, EntityDocumentSaver, EntityStore, ItemIdForTermLookup,
    ItemLookup, PropertyIdForTermLookup, PropertyLookup,
};

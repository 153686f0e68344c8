//! # Readmodel - Document Repository for Read Models
//!
//! Readmodel persists read models, the denormalized projections of an
//! event-sourced write side, in a schemaless document store. A repository
//! turns identifiable objects into documents keyed by their identifier and
//! turns documents back into objects.
//!
//! ## Key Features
//!
//! - **Upsert Writes**: saving an object replaces its stored document or inserts it
//! - **Identity Mapping**: the object's `id` is stored as the string `_id`
//! - **Lossless Reads**: store-native values (dates, binary, wide integers,
//!   timestamps) are coerced to plain values before deserialization
//! - **Pluggable Serializers**: any [serializer::Serializer] works; a
//!   `serde`-based one is built in
//! - **Pluggable Stores**: an in-memory store is built in; other stores
//!   implement the gateway traits in [store] and [collection]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use readmodel::repository::RepositoryFactory;
//! use readmodel::store::DocumentStore;
//! use readmodel::store::memory::{InMemoryStore, InMemoryStoreConfig};
//! use readmodel::doc;
//!
//! let store = DocumentStore::new(InMemoryStore::new(InMemoryStoreConfig::new()));
//! let orders = RepositoryFactory::new(store).create::<OrderView>("orders")?;
//!
//! orders.save(&order)?;
//! let same = orders.find(&order.id)?;
//! let open = orders.find_by(&doc! { "status": "open" })?;
//! orders.remove(&order.id)?;
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - Documents and the collection gateway contract
//! - [`common`] - Store-native values, the coercion pass and shared helpers
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Equality filters
//! - [`repository`] - Repositories, identity mapping and configuration
//! - [`serializer`] - Serializer contract and the serde serializer
//! - [`store`] - Store abstractions and the in-memory store

pub mod collection;
pub mod common;
pub mod errors;
pub mod filter;
pub mod repository;
pub mod serializer;
pub mod store;

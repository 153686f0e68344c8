//! Document store backends and abstractions.
//!
//! A store hands out named [DocumentCollection](crate::collection::DocumentCollection)
//! handles. Backends implement [DocumentStoreProvider] and are wrapped in a
//! [DocumentStore] so callers never depend on a concrete backend.
//!
//! # Storage Providers
//!
//! - **In-Memory Store**: [memory::InMemoryStore] for tests and temporary data
//!
//! A networked store client plugs in the same way: implement
//! [DocumentStoreProvider] for the store and
//! [DocumentCollectionProvider](crate::collection::DocumentCollectionProvider)
//! for its collection handles.
//!
//! # Lifecycle
//!
//! Once a store is closed every operation on it, or on any collection it
//! handed out, fails with `StoreUnavailable`.

mod document_store;
pub mod memory;

pub use document_store::*;

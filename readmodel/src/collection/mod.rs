//! Documents and the collection gateway contract.
//!
//! A `Document` is a persistent key-value map whose values are store-native
//! [Value](crate::common::Value)s. Documents support nested fields, which can
//! be read with a dotted path.
//!
//! ```rust,ignore
//! use readmodel::doc;
//!
//! let doc = doc! {
//!     "_id": "42",
//!     "address": { "city": "New York" },
//! };
//! assert!(doc.get("address.city").is_some());
//! ```
//!
//! # Collections
//!
//! A `DocumentCollection` is the handle the repository talks to. Every store
//! backend implements [DocumentCollectionProvider] and supports:
//! - Replace-or-insert keyed by an equality filter
//! - Finding one or many documents
//! - Removing documents
//!
//! ```rust,ignore
//! use readmodel::collection::insert_if_absent;
//! use readmodel::filter::field;
//!
//! let users = store.collection("users")?;
//! users.update_with_options(field("_id").eq("42"), &doc, &insert_if_absent())?;
//! let found = users.find_one(field("_id").eq("42"))?;
//! ```
//!
//! # Reserved Fields
//!
//! - `_id` - string form of the model identifier

mod document;
mod document_collection;
mod update_options;
mod write_result;

pub use document::*;
pub use document_collection::*;
pub use update_options::*;
pub use write_result::*;

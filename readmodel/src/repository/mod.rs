//! Repositories persisting read models as documents.
//!
//! A [DocumentRepository] stores objects of one read-model type in one
//! document collection. It owns the identity protocol between objects and
//! documents:
//!
//! - objects carry their identifier under `id`, documents under `_id`
//! - `_id` always holds the string form of the identifier
//! - documents are rebuilt through the serializer after every store value
//!   has been turned into a plain value
//!
//! # Creating Repositories
//!
//! ```rust,ignore
//! use readmodel::repository::RepositoryFactory;
//! use readmodel_derive::Identifiable;
//!
//! #[derive(Identifiable, Serialize, Deserialize)]
//! pub struct OrderView {
//!     id: String,
//!     status: String,
//! }
//!
//! let factory = RepositoryFactory::new(store);
//! let orders = factory.create::<OrderView>("orders")?;
//! ```
//!
//! # Operations
//!
//! - `save` - replace-or-insert keyed by the identifier
//! - `find` - lookup by identifier, `None` when absent
//! - `find_by` - equality lookup on any fields
//! - `find_all` - every object in the collection
//! - `remove` - delete by identifier, no error when absent

mod document_repository;
mod identifiable;
mod identity_mapper;
mod repository;
mod repository_config;
mod repository_factory;

pub use document_repository::*;
pub use identifiable::*;
pub use identity_mapper::*;
pub use repository::*;
pub use repository_config::*;
pub use repository_factory::*;

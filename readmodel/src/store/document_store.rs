use crate::collection::DocumentCollection;
use crate::errors::ReadModelResult;
use std::ops::Deref;
use std::sync::Arc;

/// Trait defining a document store backend.
///
/// # Thread Safety
/// Implementers must be `Send + Sync`; one store is shared by every
/// repository created from it.
pub trait DocumentStoreProvider: Send + Sync {
    /// Returns the collection with the given name, creating it if needed.
    ///
    /// # Errors
    /// * `StoreUnavailable` if the store is closed
    fn collection(&self, name: &str) -> ReadModelResult<DocumentCollection>;

    /// Checks whether a collection with the given name exists.
    fn has_collection(&self, name: &str) -> ReadModelResult<bool>;

    /// Returns the names of every existing collection, sorted.
    fn collection_names(&self) -> ReadModelResult<Vec<String>>;

    /// Drops a collection and every document in it.
    ///
    /// Handles obtained before the drop fail with `CollectionNotFound`.
    /// Dropping a missing collection is a no-op.
    fn drop_collection(&self, name: &str) -> ReadModelResult<()>;

    /// Closes the store. Closing twice is a no-op.
    fn close(&self) -> ReadModelResult<()>;

    fn is_closed(&self) -> bool;

    /// Returns the configured store name, used in log lines.
    fn store_name(&self) -> String;
}

/// A handle to a document store.
///
/// # Examples
///
/// ```rust,ignore
/// use readmodel::store::DocumentStore;
/// use readmodel::store::memory::{InMemoryStore, InMemoryStoreConfig};
///
/// let store = DocumentStore::new(InMemoryStore::new(InMemoryStoreConfig::new()));
/// let orders = store.collection("orders")?;
/// assert!(store.has_collection("orders")?);
/// store.close()?;
/// ```
#[derive(Clone)]
pub struct DocumentStore {
    inner: Arc<dyn DocumentStoreProvider>,
}

impl DocumentStore {
    /// Creates a new `DocumentStore` from a backend implementation.
    pub fn new<T: DocumentStoreProvider + 'static>(inner: T) -> Self {
        DocumentStore {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for DocumentStore {
    type Target = Arc<dyn DocumentStoreProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

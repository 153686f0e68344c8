use super::{InMemoryCollection, InMemoryStoreConfig};
use crate::collection::DocumentCollection;
use crate::errors::{ErrorKind, ReadModelError, ReadModelResult};
use crate::store::DocumentStoreProvider;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-memory implementation of a document store.
///
/// # Characteristics
/// - **Thread-Safe**: collections live in a concurrent map and can be shared
///   across threads
/// - **Lazy Collections**: a collection is created the first time it is asked for
/// - **No Persistence**: all data is lost when the store is dropped
///
/// # Usage
/// ```text
/// let store = DocumentStore::new(InMemoryStore::new(InMemoryStoreConfig::new()));
/// let orders = store.collection("orders")?;
/// orders.update_with_options(field("_id").eq("1"), &doc, &insert_if_absent())?;
/// ```
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<InMemoryStoreInner>,
}

impl InMemoryStore {
    /// Creates a new in-memory store with the specified configuration.
    pub fn new(store_config: InMemoryStoreConfig) -> InMemoryStore {
        InMemoryStore {
            inner: Arc::new(InMemoryStoreInner::new(store_config)),
        }
    }
}

impl DocumentStoreProvider for InMemoryStore {
    fn collection(&self, name: &str) -> ReadModelResult<DocumentCollection> {
        self.inner.collection(name)
    }

    fn has_collection(&self, name: &str) -> ReadModelResult<bool> {
        self.inner.check_open()?;
        Ok(self.inner.collections.contains_key(name))
    }

    fn collection_names(&self) -> ReadModelResult<Vec<String>> {
        self.inner.check_open()?;
        let mut names: Vec<String> = self
            .inner
            .collections
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        Ok(names)
    }

    fn drop_collection(&self, name: &str) -> ReadModelResult<()> {
        self.inner.drop_collection(name)
    }

    fn close(&self) -> ReadModelResult<()> {
        self.inner.close()
    }

    fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Relaxed)
    }

    fn store_name(&self) -> String {
        self.inner.store_config.name().to_string()
    }
}

struct InMemoryStoreInner {
    closed: Arc<AtomicBool>,
    store_config: InMemoryStoreConfig,
    collections: DashMap<String, InMemoryCollection>,
}

impl InMemoryStoreInner {
    fn new(store_config: InMemoryStoreConfig) -> InMemoryStoreInner {
        InMemoryStoreInner {
            closed: Arc::new(AtomicBool::new(false)),
            store_config,
            collections: DashMap::new(),
        }
    }

    fn check_open(&self) -> ReadModelResult<()> {
        if self.closed.load(Ordering::Relaxed) {
            log::error!("Store {} is closed", self.store_config.name());
            return Err(ReadModelError::new(
                &format!("Store {} is closed", self.store_config.name()),
                ErrorKind::StoreUnavailable,
            ));
        }
        Ok(())
    }

    fn collection(&self, name: &str) -> ReadModelResult<DocumentCollection> {
        self.check_open()?;
        if name.is_empty() {
            log::error!("Collection name cannot be empty");
            return Err(ReadModelError::new(
                "Collection name cannot be empty",
                ErrorKind::StoreError,
            ));
        }

        let collection = self
            .collections
            .entry(name.to_string())
            .or_insert_with(|| {
                log::debug!(
                    "Creating collection {} in store {}",
                    name,
                    self.store_config.name()
                );
                InMemoryCollection::new(name, self.closed.clone())
            })
            .clone();
        Ok(DocumentCollection::new(collection))
    }

    fn drop_collection(&self, name: &str) -> ReadModelResult<()> {
        self.check_open()?;
        if let Some((_, collection)) = self.collections.remove(name) {
            collection.mark_dropped();
            log::debug!(
                "Dropped collection {} from store {}",
                name,
                self.store_config.name()
            );
        }
        Ok(())
    }

    fn close(&self) -> ReadModelResult<()> {
        if self.closed.swap(true, Ordering::Relaxed) {
            return Ok(());
        }
        self.collections.clear();
        log::debug!("Closed store {}", self.store_config.name());
        Ok(())
    }
}

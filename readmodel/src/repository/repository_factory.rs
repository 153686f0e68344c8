use super::{DocumentRepository, Identifiable, RepositoryConfig};
use crate::errors::ReadModelResult;
use crate::serializer::{SerdeSerializer, Serializer};
use crate::store::DocumentStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Creates repositories over the collections of one [DocumentStore].
///
/// # Examples
///
/// ```rust,ignore
/// let factory = RepositoryFactory::new(store);
/// let orders = factory.create::<OrderView>("orders")?;
/// let legacy = factory.create_with_serializer::<OrderView>("orders", MySerializer)?;
/// ```
#[derive(Clone)]
pub struct RepositoryFactory {
    store: DocumentStore,
}

impl RepositoryFactory {
    pub fn new(store: DocumentStore) -> Self {
        RepositoryFactory { store }
    }

    /// Creates a repository for `T` backed by a [SerdeSerializer].
    pub fn create<T>(&self, collection_name: &str) -> ReadModelResult<DocumentRepository<T>>
    where
        T: Identifiable + Serialize + DeserializeOwned + 'static,
    {
        self.create_with_serializer(collection_name, SerdeSerializer::<T>::new())
    }

    /// Creates a repository for `T` using the given serializer.
    pub fn create_with_serializer<T, S>(
        &self,
        collection_name: &str,
        serializer: S,
    ) -> ReadModelResult<DocumentRepository<T>>
    where
        T: Identifiable,
        S: Serializer<T> + 'static,
    {
        self.create_with_config(
            collection_name,
            serializer,
            RepositoryConfig::new(&T::model_class()),
        )
    }

    /// Creates a repository for `T` with explicit settings.
    pub fn create_with_config<T, S>(
        &self,
        collection_name: &str,
        serializer: S,
        config: RepositoryConfig,
    ) -> ReadModelResult<DocumentRepository<T>>
    where
        T: Identifiable,
        S: Serializer<T> + 'static,
    {
        let collection = self.store.collection(collection_name)?;
        log::debug!(
            "Created repository of {} over {} in store {}",
            config.class(),
            collection_name,
            self.store.store_name()
        );
        Ok(DocumentRepository::with_config(
            collection,
            Arc::new(serializer),
            config,
        ))
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }
}

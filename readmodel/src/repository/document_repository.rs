use super::{Identifiable, IdentityMapper, ReadModelRepository, RepositoryBuilder, RepositoryConfig};
use crate::collection::{upsert_one, Document, DocumentCollection};
use crate::common::{document_from_plain, document_to_plain};
use crate::errors::{ErrorKind, ReadModelError, ReadModelResult};
use crate::filter::all;
use crate::serializer::{SerializedEnvelope, Serializer};
use std::fmt::Display;
use std::sync::Arc;

/// A repository persisting read models of type `T` as documents.
///
/// # Purpose
/// Stores every object as one document keyed by the string form of its
/// identifier, and rebuilds objects from the documents it finds.
///
/// # Characteristics
/// - **Upsert Writes**: `save` replaces the whole stored document or inserts it
/// - **Type Guard**: `save` rejects objects whose class tag differs from the
///   configured class before touching the store
/// - **No Cache**: every call is one round-trip to the collection
/// - **Thread-Safe**: cheap to clone and safe to share between threads
///
/// # Usage
/// ```ignore
/// let repository = DocumentRepository::new(collection, Arc::new(SerdeSerializer::<Order>::new()), "Order");
/// repository.save(&order)?;
/// let found = repository.find(&order.id)?;
/// let open = repository.find_by(&doc! { "status": "open" })?;
/// repository.remove(&order.id)?;
/// ```
pub struct DocumentRepository<T> {
    collection: DocumentCollection,
    serializer: Arc<dyn Serializer<T>>,
    config: RepositoryConfig,
    mapper: IdentityMapper,
}

impl<T: Identifiable> DocumentRepository<T> {
    /// Creates a repository serving `class` with the default identifier fields.
    pub fn new(
        collection: DocumentCollection,
        serializer: Arc<dyn Serializer<T>>,
        class: &str,
    ) -> Self {
        Self::with_config(collection, serializer, RepositoryConfig::new(class))
    }

    pub fn with_config(
        collection: DocumentCollection,
        serializer: Arc<dyn Serializer<T>>,
        config: RepositoryConfig,
    ) -> Self {
        let mapper = IdentityMapper::new(config.model_id_field(), config.store_id_field());
        DocumentRepository {
            collection,
            serializer,
            config,
            mapper,
        }
    }

    pub fn builder(
        collection: DocumentCollection,
        serializer: Arc<dyn Serializer<T>>,
    ) -> RepositoryBuilder<T> {
        RepositoryBuilder::new(collection, serializer)
    }

    /// Saves an object, replacing any stored document with the same identifier.
    ///
    /// # Errors
    /// * `TypeMismatch` if the object, or the envelope serialized from it,
    ///   reports a class other than the configured one; nothing is written
    /// * `InvalidId` if the serialized payload has no usable identifier
    /// * `SerializationError` if the object cannot be serialized
    /// * `UnconvertibleValue` / `InvalidFieldName` if the payload cannot be
    ///   stored
    /// * store errors, unchanged
    pub fn save(&self, object: &T) -> ReadModelResult<()> {
        let class = object.class_name();
        self.check_class(&class, &object.id())?;

        let envelope = self.serializer.serialize(object)?;
        self.check_class(envelope.class(), envelope.id())?;

        let (id, payload) = self.mapper.outbound(envelope.into_payload())?;
        let document = document_from_plain(&payload)?;
        let result = self.collection.update_with_options(
            self.mapper.id_filter(&id),
            &document,
            &upsert_one(),
        )?;

        log::debug!(
            "Saved {} {} in {} (inserted: {})",
            class,
            id,
            self.collection.name(),
            result.is_inserted()
        );
        Ok(())
    }

    /// Finds the object stored under the string form of `id`.
    ///
    /// A missing document is `Ok(None)`, not an error.
    pub fn find(&self, id: &impl Display) -> ReadModelResult<Option<T>> {
        let id = id.to_string();
        let found = self.collection.find_one(self.mapper.id_filter(&id))?;
        log::debug!(
            "Find {} {} in {}: {}",
            self.config.class(),
            id,
            self.collection.name(),
            if found.is_some() { "found" } else { "not found" }
        );
        found.map(|document| self.rebuild(document)).transpose()
    }

    /// Finds every object whose stored fields equal the given values.
    ///
    /// An empty `fields` document returns no objects without querying the
    /// store. A constraint on `id` or `_id` matches the identifier's string
    /// form; every other value is compared as given.
    pub fn find_by(&self, fields: &Document) -> ReadModelResult<Vec<T>> {
        if fields.is_empty() {
            log::debug!(
                "Find by empty fields in {} returns nothing",
                self.collection.name()
            );
            return Ok(Vec::new());
        }

        let filter = self.mapper.filter(fields)?;
        let documents = self.collection.find(filter)?;
        log::debug!(
            "Find by {} in {} matched {} document(s)",
            fields,
            self.collection.name(),
            documents.len()
        );
        self.rebuild_all(documents)
    }

    /// Returns every object in the collection.
    pub fn find_all(&self) -> ReadModelResult<Vec<T>> {
        let documents = self.collection.find(all())?;
        log::debug!(
            "Find all in {} returned {} document(s)",
            self.collection.name(),
            documents.len()
        );
        self.rebuild_all(documents)
    }

    /// Removes the document stored under the string form of `id`.
    ///
    /// Removing an identifier that is not stored succeeds.
    pub fn remove(&self, id: &impl Display) -> ReadModelResult<()> {
        let id = id.to_string();
        let result = self.collection.remove(self.mapper.id_filter(&id), true)?;
        log::debug!(
            "Removed {} {} from {} ({} document(s))",
            self.config.class(),
            id,
            self.collection.name(),
            result.affected_count()
        );
        Ok(())
    }

    /// Returns the collection this repository reads and writes.
    pub fn collection(&self) -> &DocumentCollection {
        &self.collection
    }

    /// Returns the class tag this repository serves.
    pub fn class(&self) -> &str {
        self.config.class()
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    fn check_class(&self, class: &str, id: &str) -> ReadModelResult<()> {
        if class != self.config.class() {
            log::error!(
                "Cannot save object {} of class {} in a repository of {}",
                id,
                class,
                self.config.class()
            );
            return Err(ReadModelError::new(
                &format!(
                    "Object of class {} does not belong to a repository of {}",
                    class,
                    self.config.class()
                ),
                ErrorKind::TypeMismatch,
            ));
        }
        Ok(())
    }

    fn rebuild(&self, document: Document) -> ReadModelResult<T> {
        let plain = document_to_plain(&document)?;
        let (id, payload) = self.mapper.inbound(plain)?;
        let envelope = SerializedEnvelope::new(id, self.config.class(), payload);
        self.serializer.deserialize(envelope)
    }

    fn rebuild_all(&self, documents: Vec<Document>) -> ReadModelResult<Vec<T>> {
        let mut objects = Vec::with_capacity(documents.len());
        for document in documents {
            objects.push(self.rebuild(document)?);
        }
        Ok(objects)
    }
}

impl<T> Clone for DocumentRepository<T> {
    fn clone(&self) -> Self {
        DocumentRepository {
            collection: self.collection.clone(),
            serializer: self.serializer.clone(),
            config: self.config.clone(),
            mapper: self.mapper.clone(),
        }
    }
}

impl<T: Identifiable> ReadModelRepository<T> for DocumentRepository<T> {
    fn save(&self, object: &T) -> ReadModelResult<()> {
        DocumentRepository::save(self, object)
    }

    fn find(&self, id: &dyn Display) -> ReadModelResult<Option<T>> {
        DocumentRepository::find(self, &id)
    }

    fn find_by(&self, fields: &Document) -> ReadModelResult<Vec<T>> {
        DocumentRepository::find_by(self, fields)
    }

    fn find_all(&self) -> ReadModelResult<Vec<T>> {
        DocumentRepository::find_all(self)
    }

    fn remove(&self, id: &dyn Display) -> ReadModelResult<()> {
        DocumentRepository::remove(self, &id)
    }
}

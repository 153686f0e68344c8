use super::{DocumentRepository, Identifiable};
use crate::collection::DocumentCollection;
use crate::common::{DOC_ID, MODEL_ID};
use crate::errors::{ErrorKind, ReadModelError, ReadModelResult};
use crate::serializer::Serializer;
use std::sync::Arc;

/// Settings of one [DocumentRepository].
///
/// - `class` - the class tag every saved object must report
/// - `model_id_field` - the identifier field on the object side (`id`)
/// - `store_id_field` - the reserved identifier field in the store (`_id`)
///
/// # Examples
///
/// ```rust,ignore
/// let config = RepositoryConfig::new("Order").with_store_id_field("key")?;
/// assert_eq!(config.model_id_field(), "id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    class: String,
    model_id_field: String,
    store_id_field: String,
}

impl RepositoryConfig {
    /// Creates a config for `class` with the default identifier fields.
    pub fn new(class: &str) -> Self {
        RepositoryConfig {
            class: class.to_string(),
            model_id_field: MODEL_ID.to_string(),
            store_id_field: DOC_ID.to_string(),
        }
    }

    pub fn with_model_id_field(mut self, field: &str) -> ReadModelResult<Self> {
        validate_field("model id", field)?;
        self.model_id_field = field.to_string();
        Ok(self)
    }

    pub fn with_store_id_field(mut self, field: &str) -> ReadModelResult<Self> {
        validate_field("store id", field)?;
        self.store_id_field = field.to_string();
        Ok(self)
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn model_id_field(&self) -> &str {
        &self.model_id_field
    }

    pub fn store_id_field(&self) -> &str {
        &self.store_id_field
    }
}

fn validate_field(kind: &str, field: &str) -> ReadModelResult<()> {
    if field.is_empty() {
        log::error!("The {} field name cannot be empty", kind);
        return Err(ReadModelError::new(
            &format!("The {} field name cannot be empty", kind),
            ErrorKind::InvalidFieldName,
        ));
    }
    Ok(())
}

/// Builder for a [DocumentRepository].
///
/// Configuration errors are captured and returned by [build](RepositoryBuilder::build).
///
/// # Examples
///
/// ```rust,ignore
/// let repository = RepositoryBuilder::new(collection, Arc::new(SerdeSerializer::<Order>::new()))
///     .class("Order")
///     .store_id_field("key")
///     .build()?;
/// ```
pub struct RepositoryBuilder<T> {
    error: Option<ReadModelError>,
    collection: DocumentCollection,
    serializer: Arc<dyn Serializer<T>>,
    config: RepositoryConfig,
}

impl<T: Identifiable> RepositoryBuilder<T> {
    /// Creates a builder serving `T::model_class()` with default identifier fields.
    pub fn new(collection: DocumentCollection, serializer: Arc<dyn Serializer<T>>) -> Self {
        RepositoryBuilder {
            error: None,
            collection,
            serializer,
            config: RepositoryConfig::new(&T::model_class()),
        }
    }

    /// Sets the class tag the repository serves.
    pub fn class(mut self, class: &str) -> Self {
        self.config.class = class.to_string();
        self
    }

    pub fn model_id_field(mut self, field: &str) -> Self {
        if self.error.is_none() {
            match self.config.clone().with_model_id_field(field) {
                Ok(config) => self.config = config,
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    pub fn store_id_field(mut self, field: &str) -> Self {
        if self.error.is_none() {
            match self.config.clone().with_store_id_field(field) {
                Ok(config) => self.config = config,
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    /// Builds the repository, or returns the first configuration error.
    pub fn build(self) -> ReadModelResult<DocumentRepository<T>> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.config.class.is_empty() {
            log::error!("Repository class cannot be empty");
            return Err(ReadModelError::new(
                "Repository class cannot be empty",
                ErrorKind::TypeMismatch,
            ));
        }
        Ok(DocumentRepository::with_config(
            self.collection,
            self.serializer,
            self.config,
        ))
    }
}

use super::{Document, UpdateOptions, WriteResult};
use crate::{errors::ReadModelResult, filter::Filter};
use std::ops::Deref;
use std::sync::Arc;

/// Trait defining the gateway to one named document collection.
///
/// Store backends implement this trait; the repository only ever talks to a
/// collection through it. Implementations must be safe to share between
/// threads and must report failures as `StoreError` or `StoreUnavailable`.
pub trait DocumentCollectionProvider: Send + Sync {
    /// Returns the name of this collection.
    fn name(&self) -> String;

    /// Replaces documents matching a filter with the specified document.
    ///
    /// The replacement is total: fields absent from `update` do not survive.
    /// With `insert_if_absent` a new document is inserted when nothing
    /// matches; its fields are the filter's equality fields merged with
    /// `update`. With `just_once` only the first match is replaced.
    fn update_with_options(
        &self,
        filter: Filter,
        update: &Document,
        update_options: &UpdateOptions,
    ) -> ReadModelResult<WriteResult>;

    /// Replaces every document matching a filter with default options.
    fn update(&self, filter: Filter, update: &Document) -> ReadModelResult<WriteResult> {
        self.update_with_options(filter, update, &UpdateOptions::default())
    }

    /// Returns the first document matching a filter.
    fn find_one(&self, filter: Filter) -> ReadModelResult<Option<Document>>;

    /// Returns every document matching a filter, in store order.
    fn find(&self, filter: Filter) -> ReadModelResult<Vec<Document>>;

    /// Removes documents matching a filter.
    ///
    /// # Arguments
    ///
    /// * `filter` - The filter to match documents
    /// * `just_once` - If true, remove only the first matching document
    fn remove(&self, filter: Filter, just_once: bool) -> ReadModelResult<WriteResult>;

    /// Returns the number of documents in the collection.
    fn size(&self) -> ReadModelResult<u64>;
}

/// A handle to a document collection.
///
/// `DocumentCollection` wraps any [DocumentCollectionProvider] and is cheap
/// to clone; clones share the same underlying collection.
///
/// # Examples
///
/// ```rust,ignore
/// use readmodel::collection::insert_if_absent;
/// use readmodel::filter::field;
///
/// let users = store.collection("users")?;
/// let doc = doc! { "_id": "42", "name": "Alice" };
/// users.update_with_options(field("_id").eq("42"), &doc, &insert_if_absent())?;
///
/// let found = users.find_one(field("_id").eq("42"))?;
/// ```
#[derive(Clone)]
pub struct DocumentCollection {
    inner: Arc<dyn DocumentCollectionProvider>,
}

impl DocumentCollection {
    /// Creates a new `DocumentCollection` from a provider implementation.
    pub fn new<T: DocumentCollectionProvider + 'static>(inner: T) -> Self {
        DocumentCollection {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for DocumentCollection {
    type Target = Arc<dyn DocumentCollectionProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

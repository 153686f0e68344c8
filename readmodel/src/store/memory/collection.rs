use crate::collection::{Document, DocumentCollectionProvider, UpdateOptions, WriteResult};
use crate::common::{atomic, Atomic, ReadExecutor, Value, WriteExecutor};
use crate::errors::{ErrorKind, ReadModelError, ReadModelResult};
use crate::filter::Filter;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// In-memory document collection.
///
/// # Characteristics
/// - **Thread-Safe**: one `parking_lot` read-write lock guards the documents,
///   so every update and remove is atomic with respect to other callers
/// - **Stable Order**: documents are returned in insertion order; a replaced
///   document keeps its position
/// - **No Persistence**: contents are lost when the store is dropped
///
/// Obtained from [InMemoryStore](super::InMemoryStore) via `collection(name)`.
#[derive(Clone)]
pub struct InMemoryCollection {
    inner: Arc<InMemoryCollectionInner>,
}

impl InMemoryCollection {
    pub(crate) fn new(name: &str, store_closed: Arc<AtomicBool>) -> Self {
        InMemoryCollection {
            inner: Arc::new(InMemoryCollectionInner::new(name, store_closed)),
        }
    }

    pub(crate) fn mark_dropped(&self) {
        self.inner.dropped.store(true, Ordering::Relaxed);
        self.inner.documents.write_with(|docs| docs.clear());
    }
}

impl DocumentCollectionProvider for InMemoryCollection {
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    fn update_with_options(
        &self,
        filter: Filter,
        update: &Document,
        update_options: &UpdateOptions,
    ) -> ReadModelResult<WriteResult> {
        self.inner.update(filter, update, update_options)
    }

    fn find_one(&self, filter: Filter) -> ReadModelResult<Option<Document>> {
        self.inner.find_one(filter)
    }

    fn find(&self, filter: Filter) -> ReadModelResult<Vec<Document>> {
        self.inner.find(filter)
    }

    fn remove(&self, filter: Filter, just_once: bool) -> ReadModelResult<WriteResult> {
        self.inner.remove(filter, just_once)
    }

    fn size(&self) -> ReadModelResult<u64> {
        self.inner.check_open()?;
        Ok(self.inner.documents.read_with(|docs| docs.len() as u64))
    }
}

struct InMemoryCollectionInner {
    name: String,
    store_closed: Arc<AtomicBool>,
    dropped: AtomicBool,
    documents: Atomic<BTreeMap<u64, Document>>,
    sequence: AtomicU64,
}

impl InMemoryCollectionInner {
    fn new(name: &str, store_closed: Arc<AtomicBool>) -> Self {
        InMemoryCollectionInner {
            name: name.to_string(),
            store_closed,
            dropped: AtomicBool::new(false),
            documents: atomic(BTreeMap::new()),
            sequence: AtomicU64::new(0),
        }
    }

    fn check_open(&self) -> ReadModelResult<()> {
        if self.store_closed.load(Ordering::Relaxed) {
            log::error!("Store is closed, cannot access collection {}", self.name);
            return Err(ReadModelError::new(
                &format!("Store is closed, cannot access collection {}", self.name),
                ErrorKind::StoreUnavailable,
            ));
        }
        if self.dropped.load(Ordering::Relaxed) {
            log::error!("Collection {} has been dropped", self.name);
            return Err(ReadModelError::new(
                &format!("Collection {} has been dropped", self.name),
                ErrorKind::CollectionNotFound,
            ));
        }
        Ok(())
    }

    fn update(
        &self,
        filter: Filter,
        update: &Document,
        update_options: &UpdateOptions,
    ) -> ReadModelResult<WriteResult> {
        self.check_open()?;

        let result = self.documents.write_with(|docs| -> ReadModelResult<WriteResult> {
            let mut matched = Vec::new();
            for (key, doc) in docs.iter() {
                if filter.matches(doc) {
                    matched.push(*key);
                    if update_options.is_just_once() {
                        break;
                    }
                }
            }

            if matched.is_empty() {
                if !update_options.is_insert_if_absent() {
                    return Ok(WriteResult::default());
                }

                let mut inserted = Document::new();
                for (field, value) in filter.equalities() {
                    inserted.put(field, value)?;
                }
                inserted.merge(update);

                let id = id_of(&inserted);
                let key = self.sequence.fetch_add(1, Ordering::Relaxed);
                docs.insert(key, inserted);
                return Ok(WriteResult::inserted(id));
            }

            let mut affected = Vec::with_capacity(matched.len());
            for key in matched {
                affected.push(id_of(update));
                docs.insert(key, update.clone());
            }
            Ok(WriteResult::new(affected))
        })?;

        log::debug!(
            "Updated {} document(s) in {} with filter {} (inserted: {})",
            result.affected_count(),
            self.name,
            filter,
            result.is_inserted()
        );
        Ok(result)
    }

    fn find_one(&self, filter: Filter) -> ReadModelResult<Option<Document>> {
        self.check_open()?;
        let found = self.documents.read_with(|docs| {
            docs.values().find(|doc| filter.matches(doc)).cloned()
        });
        log::debug!(
            "Find one in {} with filter {} returned {}",
            self.name,
            filter,
            if found.is_some() { "a document" } else { "nothing" }
        );
        Ok(found)
    }

    fn find(&self, filter: Filter) -> ReadModelResult<Vec<Document>> {
        self.check_open()?;
        let found: Vec<Document> = self.documents.read_with(|docs| {
            if filter.is_all() {
                docs.values().cloned().collect()
            } else {
                docs.values().filter(|doc| filter.matches(doc)).cloned().collect()
            }
        });
        log::debug!(
            "Find in {} with filter {} returned {} document(s)",
            self.name,
            filter,
            found.len()
        );
        Ok(found)
    }

    fn remove(&self, filter: Filter, just_once: bool) -> ReadModelResult<WriteResult> {
        self.check_open()?;
        let removed = self.documents.write_with(|docs| {
            let mut matched = Vec::new();
            for (key, doc) in docs.iter() {
                if filter.matches(doc) {
                    matched.push(*key);
                    if just_once {
                        break;
                    }
                }
            }

            let mut removed = Vec::with_capacity(matched.len());
            for key in matched {
                if let Some(doc) = docs.remove(&key) {
                    removed.push(id_of(&doc));
                }
            }
            removed
        });
        log::debug!(
            "Removed {} document(s) from {} with filter {}",
            removed.len(),
            self.name,
            filter
        );
        Ok(WriteResult::new(removed))
    }
}

fn id_of(document: &Document) -> String {
    match document.id() {
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

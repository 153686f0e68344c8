use std::sync::Arc;

const DEFAULT_STORE_NAME: &str = "memory";

/// Configuration for an in-memory store.
///
/// Cloning is cheap; clones share the same settings.
///
/// # Usage
/// ```text
/// let config = InMemoryStoreConfig::new().with_name("projections");
/// let store = InMemoryStore::new(config);
/// ```
#[derive(Clone)]
pub struct InMemoryStoreConfig {
    inner: Arc<InMemoryStoreConfigInner>,
}

impl InMemoryStoreConfig {
    /// Creates a new `InMemoryStoreConfig` named `memory`.
    pub fn new() -> InMemoryStoreConfig {
        InMemoryStoreConfig {
            inner: Arc::new(InMemoryStoreConfigInner {
                name: DEFAULT_STORE_NAME.to_string(),
            }),
        }
    }

    /// Returns a config with the given store name.
    pub fn with_name(self, name: &str) -> InMemoryStoreConfig {
        InMemoryStoreConfig {
            inner: Arc::new(InMemoryStoreConfigInner {
                name: name.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }
}

impl Default for InMemoryStoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

struct InMemoryStoreConfigInner {
    name: String,
}

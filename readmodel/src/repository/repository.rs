use crate::collection::Document;
use crate::errors::ReadModelResult;
use std::fmt::Display;

/// The operations every read-model repository offers.
///
/// [DocumentRepository](super::DocumentRepository) implements this trait;
/// application code can depend on `dyn ReadModelRepository<T>` to swap the
/// storage behind a projection.
pub trait ReadModelRepository<T>: Send + Sync {
    /// Saves an object, replacing any stored object with the same identifier.
    fn save(&self, object: &T) -> ReadModelResult<()>;

    /// Finds the object stored under the string form of `id`.
    fn find(&self, id: &dyn Display) -> ReadModelResult<Option<T>>;

    /// Finds every object whose fields equal the given values.
    fn find_by(&self, fields: &Document) -> ReadModelResult<Vec<T>>;

    /// Returns every stored object.
    fn find_all(&self) -> ReadModelResult<Vec<T>>;

    /// Removes the object stored under the string form of `id`.
    fn remove(&self, id: &dyn Display) -> ReadModelResult<()>;
}

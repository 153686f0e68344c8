/// The result of a write operation (upsert, update, remove).
///
/// Carries the `_id` values of the documents the operation touched, and
/// whether a new document was inserted.
///
/// # Examples
///
/// ```rust,ignore
/// let result = collection.update_with_options(filter, &doc, &insert_if_absent())?;
/// if result.is_inserted() {
///     println!("created {:?}", result.affected_ids());
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteResult {
    affected_ids: Vec<String>,
    inserted: bool,
}

impl WriteResult {
    /// Creates a result for documents that already existed.
    pub fn new(affected_ids: Vec<String>) -> Self {
        Self {
            affected_ids,
            inserted: false,
        }
    }

    /// Creates a result for a freshly inserted document.
    pub fn inserted(id: String) -> Self {
        Self {
            affected_ids: vec![id],
            inserted: true,
        }
    }

    pub fn affected_ids(&self) -> &[String] {
        &self.affected_ids
    }

    pub fn affected_count(&self) -> usize {
        self.affected_ids.len()
    }

    pub fn is_inserted(&self) -> bool {
        self.inserted
    }
}

impl IntoIterator for WriteResult {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.affected_ids.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_result_new() {
        let result = WriteResult::new(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(result.affected_ids(), &["a".to_string(), "b".to_string()]);
        assert_eq!(result.affected_count(), 2);
        assert!(!result.is_inserted());
    }

    #[test]
    fn test_write_result_inserted() {
        let result = WriteResult::inserted("42".to_string());
        assert!(result.is_inserted());
        assert_eq!(result.affected_count(), 1);
    }

    #[test]
    fn test_write_result_default_is_empty() {
        let result = WriteResult::default();
        assert_eq!(result.affected_count(), 0);
        assert!(!result.is_inserted());
    }

    #[test]
    fn test_write_result_into_iter() {
        let result = WriteResult::new(vec!["x".to_string(), "y".to_string()]);
        let ids: Vec<String> = result.into_iter().collect();
        assert_eq!(ids, vec!["x", "y"]);
    }
}

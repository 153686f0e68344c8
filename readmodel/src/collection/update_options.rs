/// How [update_with_options](super::DocumentCollectionProvider::update_with_options)
/// treats the documents its filter selects.
///
/// The default replaces every match and inserts nothing. The two switches
/// are set with the `with_*` methods:
///
/// ```rust,ignore
/// use readmodel::collection::UpdateOptions;
///
/// let options = UpdateOptions::default()
///     .with_insert_if_absent(true)
///     .with_just_once(true);
/// assert_eq!(options, readmodel::collection::upsert_one());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    insert_if_absent: bool,
    just_once: bool,
}

impl UpdateOptions {
    /// When nothing matches, insert the update merged with the filter's
    /// equality fields.
    pub fn with_insert_if_absent(mut self, enabled: bool) -> Self {
        self.insert_if_absent = enabled;
        self
    }

    /// Replace at most the first match.
    pub fn with_just_once(mut self, enabled: bool) -> Self {
        self.just_once = enabled;
        self
    }

    pub fn is_insert_if_absent(&self) -> bool {
        self.insert_if_absent
    }

    pub fn is_just_once(&self) -> bool {
        self.just_once
    }
}

/// Replaces every match, or inserts when nothing matches.
pub fn insert_if_absent() -> UpdateOptions {
    UpdateOptions::default().with_insert_if_absent(true)
}

/// Replaces the first match, or inserts when nothing matches.
///
/// This is the write a repository issues for one identifier.
pub fn upsert_one() -> UpdateOptions {
    insert_if_absent().with_just_once(true)
}

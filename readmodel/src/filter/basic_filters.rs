use super::FilterProvider;
use crate::collection::Document;
use crate::common::Value;
use std::fmt::Display;

/// A filter that matches every document.
pub(crate) struct AllFilter;

impl FilterProvider for AllFilter {
    fn apply(&self, _entry: &Document) -> bool {
        true
    }

    fn is_all(&self) -> bool {
        true
    }
}

impl Display for AllFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllFilter")
    }
}

/// A filter that matches documents where a field equals a specific value.
///
/// The field may be a dotted path into nested documents. A missing field
/// only matches a `Null` value.
pub(crate) struct EqualsFilter {
    field_name: String,
    field_value: Value,
}

impl EqualsFilter {
    #[inline]
    pub(crate) fn new(field_name: String, field_value: Value) -> Self {
        EqualsFilter {
            field_name,
            field_value,
        }
    }
}

impl Display for EqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} == {})", self.field_name, self.field_value)
    }
}

impl FilterProvider for EqualsFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> bool {
        match entry.get(&self.field_name) {
            Some(value) => value == &self.field_value,
            None => self.field_value.is_null(),
        }
    }

    fn equalities(&self) -> Vec<(String, Value)> {
        vec![(self.field_name.clone(), self.field_value.clone())]
    }
}

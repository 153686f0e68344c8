use super::{Filter, FilterProvider};
use crate::collection::Document;
use crate::common::Value;
use std::fmt::Display;

/// A filter that matches documents satisfying every inner filter.
///
/// Evaluation stops at the first inner filter that fails.
pub(crate) struct AndFilter {
    filters: Vec<Filter>,
}

impl AndFilter {
    pub(crate) fn new(filters: Vec<Filter>) -> Self {
        AndFilter { filters }
    }
}

impl Display for AndFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut filters = String::with_capacity(self.filters.len() * 16);
        for (i, filter) in self.filters.iter().enumerate() {
            filters.push_str(&format!("{}", filter));
            if i < self.filters.len() - 1 {
                filters.push_str(" && ");
            }
        }
        write!(f, "({})", filters)
    }
}

impl FilterProvider for AndFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> bool {
        self.filters.iter().all(|filter| filter.matches(entry))
    }

    fn equalities(&self) -> Vec<(String, Value)> {
        self.filters
            .iter()
            .flat_map(|filter| filter.equalities())
            .collect()
    }

    fn is_all(&self) -> bool {
        self.filters.iter().all(|filter| filter.is_all())
    }
}

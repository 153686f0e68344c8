use crate::collection::Document;
use crate::common::Value;
use std::fmt::{Debug, Display};
use std::ops::Deref;
use std::sync::Arc;

use super::AllFilter;
use super::AndFilter;

/// Trait for implementing document filters.
///
/// A `FilterProvider` decides whether a document matches and can describe
/// itself as a list of field equalities, which stores use when they insert
/// a document that matched nothing.
pub trait FilterProvider: Send + Sync + Display {
    /// Applies the filter to a document and returns whether it matches.
    fn apply(&self, entry: &Document) -> bool;

    /// Returns the field equalities this filter requires, in declaration order.
    fn equalities(&self) -> Vec<(String, Value)> {
        Vec::new()
    }

    /// Checks if this filter accepts every document.
    #[inline]
    fn is_all(&self) -> bool {
        false
    }
}

/// A query filter for selecting documents from a collection.
///
/// `Filter` wraps a [FilterProvider] and is cheap to clone.
///
/// # Examples
///
/// ```rust,ignore
/// use readmodel::filter::field;
///
/// let filter = field("_id").eq("42").and(field("kind").eq("order"));
/// assert_eq!(filter.equalities().len(), 2);
/// ```
#[derive(Clone)]
pub struct Filter {
    inner: Arc<dyn FilterProvider>,
}

impl Filter {
    /// Creates a new filter from a filter provider implementation.
    pub fn new<T: FilterProvider + 'static>(inner: T) -> Self {
        Filter {
            inner: Arc::new(inner),
        }
    }

    /// Combines this filter with another using logical AND.
    pub fn and(&self, filter: Filter) -> Self {
        Filter::new(AndFilter::new(vec![self.clone(), filter]))
    }

    /// Returns whether the document satisfies this filter.
    #[inline]
    pub fn matches(&self, entry: &Document) -> bool {
        self.inner.apply(entry)
    }
}

impl Display for Filter {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Debug for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Filter{}", self.inner)
    }
}

impl Deref for Filter {
    type Target = Arc<dyn FilterProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Creates a filter that matches all documents.
pub fn all() -> Filter {
    Filter::new(AllFilter)
}

/// Combines multiple filters using logical AND.
///
/// An empty list matches every document.
pub fn and(filters: Vec<Filter>) -> Filter {
    Filter::new(AndFilter::new(filters))
}

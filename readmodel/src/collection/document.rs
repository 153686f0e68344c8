use im::OrdMap;

use crate::common::{Value, DOC_ID};
use crate::errors::{ErrorKind, ReadModelError, ReadModelResult};
use std::borrow::Cow;
use std::fmt::{Debug, Display};

const FIELD_SEPARATOR: char = '.';

/// Represents a document as the store keeps it.
///
/// A document is a set of key-value pairs. The key is always a [String] and
/// the value is a store-native [Value], which may itself be a nested document.
/// Values inside nested documents can be read with a dotted path, so for
/// `{"a": {"b": 1}}` the call `document.get("a.b")` returns `1`.
///
/// Documents the repository writes always carry the reserved `_id` field
/// holding the string form of the model identifier.
///
/// Uses `im::OrdMap`, so cloning is O(1) and a mutated clone never affects
/// the original.
#[derive(Clone, PartialEq, Default)]
pub struct Document {
    data: OrdMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: OrdMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Associates the specified [Value] with the specified top-level key.
    ///
    /// If the key already exists its value is replaced. Dots in the key are
    /// stored verbatim; use a nested document to build a nested structure.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidFieldName] if the key is empty.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut doc = Document::new();
    /// doc.put("name", "Alice")?;
    /// doc.put("age", 30)?;
    /// assert_eq!(doc.size(), 2);
    /// ```
    pub fn put<'a, T: Into<Value>>(
        &mut self,
        key: impl Into<Cow<'a, str>>,
        value: T,
    ) -> ReadModelResult<()> {
        let key = key.into();
        // key cannot be empty
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(ReadModelError::new(
                "Document does not support empty key",
                ErrorKind::InvalidFieldName,
            ));
        }

        self.data.insert(key.into_owned(), value.into());
        Ok(())
    }

    /// Returns the value stored under `key`.
    ///
    /// A top-level key wins over a dotted path. When no top-level key
    /// matches, a key containing `.` is resolved through nested documents.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self.data.get(key) {
            Some(value) => Some(value),
            None if key.contains(FIELD_SEPARATOR) => self.deep_get(key),
            None => None,
        }
    }

    /// Returns the reserved `_id` value, if present.
    pub fn id(&self) -> Option<&Value> {
        self.data.get(DOC_ID)
    }

    pub fn has_id(&self) -> bool {
        self.data.contains_key(DOC_ID)
    }

    /// Removes a top-level key and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns the top-level field names in key order.
    pub fn fields(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    /// Copies every top-level entry of `other` into this document,
    /// replacing values under keys both documents share.
    pub fn merge(&mut self, other: &Document) {
        for (key, value) in other.data.iter() {
            self.data.insert(key.clone(), value.clone());
        }
    }

    /// Iterates over the top-level entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    fn deep_get(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split(FIELD_SEPARATOR);
        let first = segments.next()?;
        let mut current = self.data.get(first)?;
        for segment in segments {
            current = current.as_document()?.data.get(segment)?;
        }
        Some(current)
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.data.iter()).finish()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, (key, value)) in self.data.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{}\": {}", key, value)?;
        }
        write!(f, "}}")
    }
}

pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Document] with JSON-like syntax.
///
/// # Examples
///
/// ```rust
/// use readmodel::doc;
///
/// let empty = doc!{};
///
/// let simple = doc!{
///     name: "Alice",
///     age: 30
/// };
///
/// let nested = doc!{
///     "user": {
///         "name": "Charlie",
///         "tags": ["admin", "user"]
///     },
///     "score": (100 * 2)
/// };
/// assert_eq!(nested.size(), 2);
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document (with braces)
    ({}) => {
        $crate::collection::Document::new()
    };

    // match an empty document
    () => {
        $crate::collection::Document::new()
    };

    // match a document with key value pairs wrapped in braces
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    // match a document with key value pairs
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put($crate::collection::normalize(stringify!($key)), $crate::doc_value!($value))
                .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro converting values for the [doc!] macro.
#[macro_export]
macro_rules! doc_value {
    // match a nested document
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
        }
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    // match an expression (variable, function call, arithmetic in parens, literals, etc.)
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}

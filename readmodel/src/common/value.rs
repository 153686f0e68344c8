use crate::collection::Document;
use chrono::{DateTime, Utc};
use std::fmt::{Debug, Display, Formatter};
use uuid::Uuid;

/// Represents a store-native [Document] value.
///
/// A document store hands back more than the plain JSON kinds: integers of
/// several widths, binary blobs, instants, uuids and internal timestamps. Each
/// of them has its own variant so the repository can convert them to a plain
/// value tree explicitly (see [crate::common::to_plain]).
///
/// # Variants
/// - Null: Absence of a value
/// - Bool, I32, I64, U64, I128, U128, F32, F64: scalars of a specific width
/// - Char(char): Single Unicode character
/// - String(String): Text value
/// - Document(Document): Nested document
/// - Array(Vec<Value>): Ordered sequence of values
/// - Bytes(Vec<u8>): Binary data
/// - DateTime(DateTime<Utc>): A UTC instant
/// - Uuid(Uuid): A 128-bit identifier
/// - Timestamp: The store's internal (seconds, increment) write marker
/// - Unknown: A kind the store could not describe
///
/// # Equality
/// Integers compare by numeric value regardless of width, so
/// `Value::I32(42) == Value::I64(42)`. Floats compare among themselves
/// (`NaN == NaN` to keep filters deterministic). An integer never equals a
/// float.
#[derive(Clone, Default)]
pub enum Value {
    /// Represents a null value.
    #[default]
    Null,
    /// Represents a boolean value.
    Bool(bool),
    /// Represents a signed 32-bit integer value.
    I32(i32),
    /// Represents a signed 64-bit integer value.
    I64(i64),
    /// Represents an unsigned 64-bit integer value.
    U64(u64),
    /// Represents a signed 128-bit integer value.
    I128(i128),
    /// Represents an unsigned 128-bit integer value.
    U128(u128),
    /// Represents a 32-bit floating point value.
    F32(f32),
    /// Represents a 64-bit floating point value.
    F64(f64),
    /// Represents a character value.
    Char(char),
    /// Represents a string value.
    String(String),
    /// Represents a document value.
    Document(Document),
    /// Represents an array value.
    Array(Vec<Value>),
    /// Represents a byte array value.
    Bytes(Vec<u8>),
    /// Represents a point in time.
    DateTime(DateTime<Utc>),
    /// Represents a uuid value.
    Uuid(Uuid),
    /// Represents a store write marker.
    Timestamp { seconds: u32, increment: u32 },
    /// Represents an unknown value.
    Unknown,
}

impl Value {
    /// Wraps binary data.
    ///
    /// There is no `From<Vec<u8>>` because a `Vec<T>` converts into an
    /// [Value::Array] element by element.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Value {
        Value::Bytes(data.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Value::I32(_) | Value::I64(_) | Value::U64(_) | Value::I128(_) | Value::U128(_)
        )
    }

    pub fn is_decimal(&self) -> bool {
        matches!(self, Value::F32(_) | Value::F64(_))
    }

    pub fn is_document(&self) -> bool {
        matches!(self, Value::Document(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(data) => Some(data),
            _ => None,
        }
    }

    /// Returns the integer as `i128`, or `None` for non-integers and for
    /// `u128` values above `i128::MAX`.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::I32(v) => Some(*v as i128),
            Value::I64(v) => Some(*v as i128),
            Value::U64(v) => Some(*v as i128),
            Value::I128(v) => Some(*v),
            Value::U128(v) => i128::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F32(v) => Some(*v as f64),
            Value::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Useful for moving a value out of a structure while leaving `Null`
    /// behind.
    pub fn take(&mut self) -> Value {
        std::mem::replace(self, Value::Null)
    }

    /// Name of the value kind, used in log and error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::U64(_) => "u64",
            Value::I128(_) => "i128",
            Value::U128(_) => "u128",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Char(_) => "char",
            Value::String(_) => "string",
            Value::Document(_) => "document",
            Value::Array(_) => "array",
            Value::Bytes(_) => "bytes",
            Value::DateTime(_) => "datetime",
            Value::Uuid(_) => "uuid",
            Value::Timestamp { .. } => "timestamp",
            Value::Unknown => "unknown",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if self.is_integer() && other.is_integer() {
            return match (self, other) {
                (Value::U128(a), Value::U128(b)) => a == b,
                _ => match (self.as_i128(), other.as_i128()) {
                    (Some(a), Some(b)) => a == b,
                    // one side is a u128 beyond i128::MAX
                    _ => false,
                },
            };
        }

        if self.is_decimal() && other.is_decimal() {
            if let (Some(a), Some(b)) = (self.as_f64(), other.as_f64()) {
                return (a.is_nan() && b.is_nan()) || a == b;
            }
        }

        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Document(a), Value::Document(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            (
                Value::Timestamp { seconds: s1, increment: i1 },
                Value::Timestamp { seconds: s2, increment: i2 },
            ) => s1 == s2 && i1 == i2,
            (Value::Unknown, Value::Unknown) => true,
            _ => false,
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "bool({})", v),
            Value::I32(v) => write!(f, "i32({})", v),
            Value::I64(v) => write!(f, "i64({})", v),
            Value::U64(v) => write!(f, "u64({})", v),
            Value::I128(v) => write!(f, "i128({})", v),
            Value::U128(v) => write!(f, "u128({})", v),
            Value::F32(v) => write!(f, "f32({})", v),
            Value::F64(v) => write!(f, "f64({})", v),
            Value::Char(v) => write!(f, "char({:?})", v),
            Value::String(v) => write!(f, "string({:?})", v),
            Value::Document(v) => write!(f, "object({:?})", v),
            Value::Array(v) => f.debug_list().entries(v.iter()).finish(),
            Value::Bytes(v) => write!(f, "bytes({:?})", v),
            Value::DateTime(v) => write!(f, "datetime({})", v.to_rfc3339()),
            Value::Uuid(v) => write!(f, "uuid({})", v),
            Value::Timestamp { seconds, increment } => {
                write!(f, "timestamp({}, {})", seconds, increment)
            }
            Value::Unknown => write!(f, "unknown"),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::I128(v) => write!(f, "{}", v),
            Value::U128(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::Char(v) => write!(f, "\"{}\"", v),
            Value::String(v) => write!(f, "\"{}\"", v),
            Value::Document(v) => write!(f, "{}", v),
            Value::Array(values) => {
                write!(f, "[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
            Value::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            Value::DateTime(v) => write!(f, "\"{}\"", v.to_rfc3339()),
            Value::Uuid(v) => write!(f, "\"{}\"", v),
            Value::Timestamp { seconds, increment } => {
                write!(f, "Timestamp({}, {})", seconds, increment)
            }
            Value::Unknown => write!(f, "unknown"),
        }
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Value::I32(value)
    }
}

impl From<u32> for Value {
    #[inline]
    fn from(value: u32) -> Self {
        Value::I64(value as i64)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<u64> for Value {
    #[inline]
    fn from(value: u64) -> Self {
        Value::U64(value)
    }
}

impl From<i128> for Value {
    #[inline]
    fn from(value: i128) -> Self {
        Value::I128(value)
    }
}

impl From<u128> for Value {
    #[inline]
    fn from(value: u128) -> Self {
        Value::U128(value)
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Value::F32(value)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<char> for Value {
    #[inline]
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<&String> for Value {
    #[inline]
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl From<Document> for Value {
    #[inline]
    fn from(value: Document) -> Self {
        Value::Document(value)
    }
}

impl From<DateTime<Utc>> for Value {
    #[inline]
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl From<Uuid> for Value {
    #[inline]
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(values: Vec<T>) -> Self {
        Value::Array(values.into_iter().map(Into::into).collect())
    }
}

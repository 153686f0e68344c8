use backtrace::Backtrace;
use serde::{de, ser};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for read-model repository operations.
///
/// Each kind names one failure category so callers can decide on a retry
/// policy without parsing messages. There is no not-found kind; lookups
/// report a missing document as `Ok(None)` or an empty vector.
///
/// # Examples
///
/// ```rust,ignore
/// use readmodel::errors::{ErrorKind, ReadModelError, ReadModelResult};
///
/// fn example() -> ReadModelResult<()> {
///     Err(ReadModelError::new("Collection is gone", ErrorKind::StoreError))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Contract Errors
    /// The object's runtime class differs from the class the repository serves
    TypeMismatch,
    /// The payload carries no usable identifier
    InvalidId,
    /// A document or payload contains an unusable field name
    InvalidFieldName,

    // Store Errors - raised by the store gateway and passed through unchanged
    /// Driver or storage failure while executing a request
    StoreError,
    /// The store cannot be reached or has been closed
    StoreUnavailable,
    /// The named collection does not exist
    CollectionNotFound,

    // Data Errors
    /// The serializer could not produce or consume an envelope
    SerializationError,
    /// A store-native value has no lossless plain representation
    UnconvertibleValue,

    // Generic/Internal Errors - used as fallback
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::TypeMismatch => write!(f, "Type mismatch"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::InvalidFieldName => write!(f, "Invalid field name"),
            ErrorKind::StoreError => write!(f, "Store error"),
            ErrorKind::StoreUnavailable => write!(f, "Store unavailable"),
            ErrorKind::CollectionNotFound => write!(f, "Collection not found"),
            ErrorKind::SerializationError => write!(f, "Serialization error"),
            ErrorKind::UnconvertibleValue => write!(f, "Unconvertible value"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Error type for every fallible read-model operation.
///
/// `ReadModelError` carries a message, an [ErrorKind], an optional cause and
/// the backtrace captured when it was created.
///
/// # Examples
///
/// ```rust,ignore
/// use readmodel::errors::{ErrorKind, ReadModelError};
///
/// let cause = ReadModelError::new("connection reset", ErrorKind::StoreUnavailable);
/// let err = ReadModelError::new_with_cause("upsert failed", ErrorKind::StoreError, cause);
/// ```
#[derive(Clone)]
pub struct ReadModelError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<ReadModelError>>,
    backtrace: Atomic<Backtrace>,
}

impl ReadModelError {
    /// Creates a new `ReadModelError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        ReadModelError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `ReadModelError` that wraps an underlying cause.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: ReadModelError) -> Self {
        ReadModelError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&ReadModelError> {
        self.cause.as_deref()
    }
}

impl Display for ReadModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for ReadModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for ReadModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// Shorthand for `Result<T, ReadModelError>`.
pub type ReadModelResult<T> = Result<T, ReadModelError>;

impl de::Error for ReadModelError {
    fn custom<T: Display>(msg: T) -> Self {
        ReadModelError::new(&msg.to_string(), ErrorKind::SerializationError)
    }
}

impl ser::Error for ReadModelError {
    fn custom<T: Display>(msg: T) -> Self {
        ReadModelError::new(&msg.to_string(), ErrorKind::SerializationError)
    }
}

impl From<serde_json::Error> for ReadModelError {
    fn from(err: serde_json::Error) -> Self {
        ReadModelError::new(
            &format!("JSON mapping error: {}", err),
            ErrorKind::SerializationError,
        )
    }
}

impl From<std::fmt::Error> for ReadModelError {
    fn from(err: std::fmt::Error) -> Self {
        ReadModelError::new(
            &format!("Formatting error: {}", err),
            ErrorKind::InternalError,
        )
    }
}

//! Conversion between read models and serialized envelopes.
//!
//! The repository never encodes objects itself. It hands every object to a
//! [Serializer], which produces a [SerializedEnvelope] carrying the object's
//! identifier, its class tag and a plain payload, and later rebuilds the
//! object from such an envelope.
//!
//! [SerdeSerializer] covers any read model that implements `serde`'s
//! `Serialize` and `DeserializeOwned`.
//!
//! ```rust,ignore
//! use readmodel::serializer::{SerdeSerializer, Serializer};
//!
//! let serializer = SerdeSerializer::<Order>::new();
//! let envelope = serializer.serialize(&order)?;
//! assert_eq!(envelope.class(), "Order");
//! let back = serializer.deserialize(envelope)?;
//! ```

mod envelope;
mod serde_serializer;
mod serializer;

pub use envelope::*;
pub use serde_serializer::*;
pub use serializer::*;

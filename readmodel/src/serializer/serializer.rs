use super::SerializedEnvelope;
use crate::errors::ReadModelResult;

/// Converts read models of type `T` to and from [SerializedEnvelope]s.
///
/// # Contract
/// - `serialize` returns an envelope whose payload contains an `id` key.
/// - `deserialize` fails with `SerializationError` when the class tag is
///   unknown or the payload does not fit `T`.
pub trait Serializer<T>: Send + Sync {
    fn serialize(&self, object: &T) -> ReadModelResult<SerializedEnvelope>;

    fn deserialize(&self, envelope: SerializedEnvelope) -> ReadModelResult<T>;
}

use super::{SerializedEnvelope, Serializer};
use crate::common::{PlainMap, PlainValue, MODEL_ID};
use crate::errors::{ErrorKind, ReadModelError, ReadModelResult};
use crate::repository::Identifiable;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// A [Serializer] backed by `serde_json`.
///
/// The payload is the object's `serde` representation, which must be a
/// mapping. When the representation has no `id` key the string form of
/// [Identifiable::id] is added under `id`.
///
/// Deserialization accepts `T::model_class()` and every class registered
/// with [accepting](SerdeSerializer::accepting).
///
/// # Examples
///
/// ```rust,ignore
/// use readmodel::serializer::SerdeSerializer;
///
/// // also rebuild documents written under a former class name
/// let serializer = SerdeSerializer::<Order>::new().accepting("LegacyOrder");
/// ```
pub struct SerdeSerializer<T> {
    accepted_classes: Vec<String>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeSerializer<T>
where
    T: Identifiable + Serialize + DeserializeOwned,
{
    pub fn new() -> Self {
        SerdeSerializer {
            accepted_classes: vec![T::model_class()],
            _marker: PhantomData,
        }
    }

    /// Registers one more class tag this serializer can rebuild `T` from.
    pub fn accepting(mut self, class: &str) -> Self {
        if !self.accepts(class) {
            self.accepted_classes.push(class.to_string());
        }
        self
    }

    pub fn accepts(&self, class: &str) -> bool {
        self.accepted_classes.iter().any(|accepted| accepted == class)
    }

    pub fn accepted_classes(&self) -> &[String] {
        &self.accepted_classes
    }
}

impl<T> Default for SerdeSerializer<T>
where
    T: Identifiable + Serialize + DeserializeOwned,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SerdeSerializer<T> {
    fn clone(&self) -> Self {
        SerdeSerializer {
            accepted_classes: self.accepted_classes.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> Serializer<T> for SerdeSerializer<T>
where
    T: Identifiable + Serialize + DeserializeOwned,
{
    fn serialize(&self, object: &T) -> ReadModelResult<SerializedEnvelope> {
        let class = object.class_name();
        let mut payload = match serde_json::to_value(object)? {
            PlainValue::Object(map) => map,
            other => {
                log::error!(
                    "Object of class {} serialized to a non-mapping value {}",
                    class,
                    other
                );
                return Err(ReadModelError::new(
                    &format!("Object of class {} must serialize to a mapping", class),
                    ErrorKind::SerializationError,
                ));
            }
        };

        let id = object.id();
        if !payload.contains_key(MODEL_ID) {
            payload.insert(MODEL_ID.to_string(), PlainValue::String(id.clone()));
        }
        Ok(SerializedEnvelope::new(id, class, payload))
    }

    fn deserialize(&self, envelope: SerializedEnvelope) -> ReadModelResult<T> {
        if !self.accepts(envelope.class()) {
            log::error!(
                "Unknown class {} for envelope {}, expected one of {:?}",
                envelope.class(),
                envelope.id(),
                self.accepted_classes
            );
            return Err(ReadModelError::new(
                &format!("Unknown class {}", envelope.class()),
                ErrorKind::SerializationError,
            ));
        }

        let id = envelope.id().to_string();
        let payload = envelope.into_payload();
        match serde_json::from_value(PlainValue::Object(payload.clone())) {
            Ok(object) => Ok(object),
            Err(err) => match typed_id(payload) {
                Some(payload) => serde_json::from_value(PlainValue::Object(payload)).map_err(|_| {
                    log::error!("Failed to deserialize object {}: {}", id, err);
                    ReadModelError::from(err)
                }),
                None => {
                    log::error!("Failed to deserialize object {}: {}", id, err);
                    Err(ReadModelError::from(err))
                }
            },
        }
    }
}

/// Replaces a string `id` with the scalar it spells: an integer, a
/// boolean or a finite float, tried in that order.
///
/// Stored identifiers are strings, so models with scalar identifiers get
/// a second chance with the scalar restored.
fn typed_id(mut payload: PlainMap) -> Option<PlainMap> {
    let scalar = match payload.get(MODEL_ID) {
        Some(PlainValue::String(s)) => {
            if let Ok(i) = s.parse::<i64>() {
                PlainValue::from(i)
            } else if let Ok(u) = s.parse::<u64>() {
                PlainValue::from(u)
            } else if let Ok(b) = s.parse::<bool>() {
                PlainValue::Bool(b)
            } else {
                let f = s.parse::<f64>().ok()?;
                PlainValue::Number(serde_json::Number::from_f64(f)?)
            }
        }
        _ => return None,
    };
    payload.insert(MODEL_ID.to_string(), scalar);
    Some(payload)
}

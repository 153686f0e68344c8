use crate::common::PlainMap;
use serde::{Deserialize, Serialize};

/// The unit exchanged with a [Serializer](super::Serializer).
///
/// `payload` is a plain mapping; it never holds store-native wrapper values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedEnvelope {
    id: String,
    class: String,
    payload: PlainMap,
}

impl SerializedEnvelope {
    pub fn new(id: impl Into<String>, class: impl Into<String>, payload: PlainMap) -> Self {
        SerializedEnvelope {
            id: id.into(),
            class: class.into(),
            payload,
        }
    }

    /// Returns the string form of the object identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the class tag of the serialized object.
    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn payload(&self) -> &PlainMap {
        &self.payload
    }

    pub fn into_payload(self) -> PlainMap {
        self.payload
    }

    /// Splits the envelope into `(id, class, payload)`.
    pub fn into_parts(self) -> (String, String, PlainMap) {
        (self.id, self.class, self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors() {
        let payload = json!({ "id": "1", "total": 10 }).as_object().cloned().unwrap();
        let envelope = SerializedEnvelope::new("1", "Order", payload.clone());
        assert_eq!(envelope.id(), "1");
        assert_eq!(envelope.class(), "Order");
        assert_eq!(envelope.payload(), &payload);

        let (id, class, rest) = envelope.into_parts();
        assert_eq!((id.as_str(), class.as_str()), ("1", "Order"));
        assert_eq!(rest, payload);
    }

    #[test]
    fn test_serializes_as_three_fields() {
        let envelope = SerializedEnvelope::new("7", "Invoice", PlainMap::new());
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json, json!({ "id": "7", "class": "Invoice", "payload": {} }));
    }
}

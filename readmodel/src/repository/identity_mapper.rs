use crate::collection::Document;
use crate::common::{PlainMap, PlainValue, Value};
use crate::errors::{ErrorKind, ReadModelError, ReadModelResult};
use crate::filter::{and, field, Filter};

/// Translates identifiers between the object side and the store side.
///
/// Objects carry their identifier under the model id field (`id` by default);
/// stored documents carry its string form under the reserved field (`_id`
/// by default). The mapper is pure: it only holds the two field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityMapper {
    model_id_field: String,
    store_id_field: String,
}

impl IdentityMapper {
    pub fn new(model_id_field: &str, store_id_field: &str) -> Self {
        IdentityMapper {
            model_id_field: model_id_field.to_string(),
            store_id_field: store_id_field.to_string(),
        }
    }

    pub fn model_id_field(&self) -> &str {
        &self.model_id_field
    }

    pub fn store_id_field(&self) -> &str {
        &self.store_id_field
    }

    /// Renames the model id field of a serialized payload to the reserved
    /// field and turns its value into the canonical identifier string.
    ///
    /// Returns the identifier together with the remapped payload.
    ///
    /// # Errors
    /// * `InvalidId` if the payload has no identifier, or it is not a
    ///   string, number or boolean
    pub fn outbound(&self, mut payload: PlainMap) -> ReadModelResult<(String, PlainMap)> {
        let id = match payload.remove(&self.model_id_field) {
            Some(value) => plain_id(&value).ok_or_else(|| {
                invalid_id(&format!(
                    "Identifier field {} holds a non-scalar value {}",
                    self.model_id_field, value
                ))
            })?,
            None => {
                return Err(invalid_id(&format!(
                    "Payload has no identifier field {}",
                    self.model_id_field
                )))
            }
        };

        payload.insert(self.store_id_field.clone(), PlainValue::String(id.clone()));
        Ok((id, payload))
    }

    /// Splits a coerced store document into its identifier and the payload
    /// the serializer rebuilds the object from.
    ///
    /// The reserved field stays in the payload as stored, and the identifier
    /// string is added under the model id field.
    ///
    /// # Errors
    /// * `InvalidId` if the document has no usable reserved field
    pub fn inbound(&self, mut document: PlainMap) -> ReadModelResult<(String, PlainMap)> {
        let id = match document.get(&self.store_id_field) {
            Some(value) => plain_id(value).ok_or_else(|| {
                invalid_id(&format!(
                    "Document field {} holds a non-scalar value {}",
                    self.store_id_field, value
                ))
            })?,
            None => {
                return Err(invalid_id(&format!(
                    "Document has no identifier field {}",
                    self.store_id_field
                )))
            }
        };

        document.insert(self.model_id_field.clone(), PlainValue::String(id.clone()));
        Ok((id, document))
    }

    /// Builds the filter selecting the document with the given identifier.
    pub fn id_filter(&self, id: &str) -> Filter {
        field(&self.store_id_field).eq(id)
    }

    /// Builds an equality filter from `fields`.
    ///
    /// A constraint on the model id field or on the reserved field targets
    /// the reserved field with the identifier's string form. Every other
    /// value is compared as given.
    ///
    /// # Errors
    /// * `InvalidId` if an identifier constraint has no string form
    pub fn filter(&self, fields: &Document) -> ReadModelResult<Filter> {
        let mut filters = Vec::with_capacity(fields.size());
        for (name, value) in fields.iter() {
            if name == &self.model_id_field || name == &self.store_id_field {
                let id = value_id(value).ok_or_else(|| {
                    invalid_id(&format!(
                        "Cannot filter {} by value {} of kind {}",
                        name,
                        value,
                        value.kind_name()
                    ))
                })?;
                filters.push(self.id_filter(&id));
            } else {
                filters.push(field(name).eq(value.clone()));
            }
        }

        if filters.len() == 1 {
            Ok(filters.remove(0))
        } else {
            Ok(and(filters))
        }
    }
}

impl Default for IdentityMapper {
    fn default() -> Self {
        IdentityMapper::new(crate::common::MODEL_ID, crate::common::DOC_ID)
    }
}

fn invalid_id(message: &str) -> ReadModelError {
    log::error!("{}", message);
    ReadModelError::new(message, ErrorKind::InvalidId)
}

/// Canonical string form of a plain identifier.
fn plain_id(value: &PlainValue) -> Option<String> {
    match value {
        PlainValue::String(s) => Some(s.clone()),
        PlainValue::Bool(b) => Some(b.to_string()),
        PlainValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                n.as_f64().map(|f| f.to_string())
            }
        }
        _ => None,
    }
}

/// Canonical string form of a store-native identifier, matching [plain_id].
fn value_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Char(c) => Some(c.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::I32(i) => Some(i.to_string()),
        Value::I64(i) => Some(i.to_string()),
        Value::U64(u) => Some(u.to_string()),
        Value::I128(i) => Some(i.to_string()),
        Value::U128(u) => Some(u.to_string()),
        Value::F32(f) if f.is_finite() => Some((*f as f64).to_string()),
        Value::F64(f) if f.is_finite() => Some(f.to_string()),
        Value::Uuid(uuid) => Some(uuid.hyphenated().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use serde_json::json;

    fn plain(value: PlainValue) -> PlainMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_outbound_renames_id() {
        let mapper = IdentityMapper::default();
        let (id, payload) = mapper
            .outbound(plain(json!({ "id": "abc", "name": "Ada" })))
            .unwrap();
        assert_eq!(id, "abc");
        assert_eq!(
            PlainValue::Object(payload),
            json!({ "_id": "abc", "name": "Ada" })
        );
    }

    #[test]
    fn test_outbound_stringifies_scalars() {
        let mapper = IdentityMapper::default();
        for (raw, expected) in [
            (json!(42), "42"),
            (json!(-7), "-7"),
            (json!(u64::MAX), "18446744073709551615"),
            (json!(1.5), "1.5"),
            (json!(true), "true"),
        ] {
            let (id, payload) = mapper.outbound(plain(json!({ "id": raw }))).unwrap();
            assert_eq!(id, expected);
            assert_eq!(payload.get("_id"), Some(&json!(expected)));
        }
    }

    #[test]
    fn test_outbound_rejects_missing_or_structured_id() {
        let mapper = IdentityMapper::default();
        let err = mapper.outbound(plain(json!({ "name": "x" }))).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidId);

        for raw in [json!(null), json!([1]), json!({ "a": 1 })] {
            let err = mapper.outbound(plain(json!({ "id": raw }))).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidId);
        }
    }

    #[test]
    fn test_inbound_restores_id() {
        let mapper = IdentityMapper::default();
        let (id, payload) = mapper
            .inbound(plain(json!({ "_id": "abc", "name": "Ada" })))
            .unwrap();
        assert_eq!(id, "abc");
        assert_eq!(
            PlainValue::Object(payload),
            json!({ "_id": "abc", "id": "abc", "name": "Ada" })
        );
    }

    #[test]
    fn test_inbound_keeps_reserved_value_as_stored() {
        let mapper = IdentityMapper::default();
        let (id, payload) = mapper.inbound(plain(json!({ "_id": 42, "n": 1 }))).unwrap();
        assert_eq!(id, "42");
        assert_eq!(payload.get("_id"), Some(&json!(42)));
        assert_eq!(payload.get("id"), Some(&json!("42")));
        assert_eq!(payload.get("n"), Some(&json!(1)));
    }

    #[test]
    fn test_inbound_requires_reserved_field() {
        let mapper = IdentityMapper::default();
        let err = mapper.inbound(plain(json!({ "id": "abc" }))).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidId);
    }

    #[test]
    fn test_custom_field_names() {
        let mapper = IdentityMapper::new("uuid", "key");
        let (_, payload) = mapper.outbound(plain(json!({ "uuid": "u-1" }))).unwrap();
        assert_eq!(PlainValue::Object(payload.clone()), json!({ "key": "u-1" }));

        let (id, back) = mapper.inbound(payload).unwrap();
        assert_eq!(id, "u-1");
        assert_eq!(PlainValue::Object(back), json!({ "key": "u-1", "uuid": "u-1" }));
    }

    #[test]
    fn test_filter_coerces_identifier() {
        let mapper = IdentityMapper::default();
        let stored = doc! { "_id": "42", "status": "open" };

        for fields in [doc! { "id": 42 }, doc! { "id": "42" }, doc! { "_id": (42u64) }] {
            let filter = mapper.filter(&fields).unwrap();
            assert_eq!(
                filter.equalities(),
                vec![("_id".to_string(), Value::from("42"))]
            );
            assert!(filter.matches(&stored));
        }
    }

    #[test]
    fn test_filter_passes_other_values_through() {
        let mapper = IdentityMapper::default();
        let filter = mapper.filter(&doc! { "status": "open", "count": 3 }).unwrap();
        assert!(filter.matches(&doc! { "_id": "1", "status": "open", "count": (3i64) }));
        assert!(!filter.matches(&doc! { "_id": "1", "status": "open", "count": "3" }));
    }

    #[test]
    fn test_filter_rejects_structured_identifier() {
        let mapper = IdentityMapper::default();
        let err = mapper.filter(&doc! { "id": { "a": 1 } }).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidId);
    }
}

use crate::collection::Document;
use crate::common::{Value, TIMESTAMP_INCREMENT, TIMESTAMP_SECONDS};
use crate::errors::{ErrorKind, ReadModelError, ReadModelResult};
use chrono::SecondsFormat;
use serde_json::{Map, Number};

/// A plain value tree: null, bool, number, string, sequence or mapping.
///
/// This is the only shape the serializer ever sees; no store wrapper type
/// crosses that boundary.
pub type PlainValue = serde_json::Value;

/// A plain mapping from field name to [PlainValue].
pub type PlainMap = Map<String, PlainValue>;

/// Converts a store-native [Value] into a [PlainValue].
///
/// Every kind has exactly one conversion:
///
/// | kind | plain form |
/// |---|---|
/// | null, bool, string | itself |
/// | i32, i64, u64 | number |
/// | i128, u128 | number when it fits 64 bits, decimal string otherwise |
/// | f32, f64 | number; NaN and infinities fail |
/// | char | one-character string |
/// | document | mapping |
/// | array | sequence |
/// | bytes | sequence of byte numbers |
/// | datetime | RFC 3339 string in UTC with sub-second digits kept |
/// | uuid | hyphenated string |
/// | timestamp | `{ "t": seconds, "i": increment }` |
/// | unknown | fails |
///
/// # Errors
///
/// Returns [ErrorKind::UnconvertibleValue] naming the offending field path
/// when a value has no lossless plain representation.
pub fn to_plain(value: &Value) -> ReadModelResult<PlainValue> {
    coerce(value, "")
}

/// Converts every field of a [Document] with [to_plain].
pub fn document_to_plain(document: &Document) -> ReadModelResult<PlainMap> {
    coerce_document(document, "")
}

/// Converts a [PlainValue] into the store-native [Value] used for writes.
///
/// Numbers become `I64` when they fit, then `U64`, then `F64`; mappings
/// become documents and sequences become arrays.
///
/// # Errors
///
/// Returns [ErrorKind::InvalidFieldName] when a nested mapping has an empty
/// key.
pub fn from_plain(value: &PlainValue) -> ReadModelResult<Value> {
    let value = match value {
        PlainValue::Null => Value::Null,
        PlainValue::Bool(b) => Value::Bool(*b),
        PlainValue::Number(n) => number_to_value(n),
        PlainValue::String(s) => Value::String(s.clone()),
        PlainValue::Array(values) => {
            let mut array = Vec::with_capacity(values.len());
            for value in values {
                array.push(from_plain(value)?);
            }
            Value::Array(array)
        }
        PlainValue::Object(map) => Value::Document(document_from_plain(map)?),
    };
    Ok(value)
}

/// Builds a [Document] from a [PlainMap], converting values with
/// [from_plain].
pub fn document_from_plain(map: &PlainMap) -> ReadModelResult<Document> {
    let mut document = Document::new();
    for (key, value) in map {
        document.put(key.as_str(), from_plain(value)?)?;
    }
    Ok(document)
}

fn number_to_value(number: &Number) -> Value {
    if let Some(i) = number.as_i64() {
        Value::I64(i)
    } else if let Some(u) = number.as_u64() {
        Value::U64(u)
    } else {
        // without arbitrary precision every remaining number is an f64
        Value::F64(number.as_f64().unwrap_or_default())
    }
}

fn coerce_document(document: &Document, path: &str) -> ReadModelResult<PlainMap> {
    let mut map = PlainMap::new();
    for (key, value) in document.iter() {
        let field_path = if path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", path, key)
        };
        map.insert(key.to_string(), coerce(value, &field_path)?);
    }
    Ok(map)
}

fn coerce(value: &Value, path: &str) -> ReadModelResult<PlainValue> {
    let plain = match value {
        Value::Null => PlainValue::Null,
        Value::Bool(b) => PlainValue::Bool(*b),
        Value::I32(i) => PlainValue::from(*i),
        Value::I64(i) => PlainValue::from(*i),
        Value::U64(u) => PlainValue::from(*u),
        Value::I128(i) => wide_integer(i64::try_from(*i).ok(), u64::try_from(*i).ok(), i),
        Value::U128(u) => wide_integer(i64::try_from(*u).ok(), u64::try_from(*u).ok(), u),
        Value::F32(f) => float(*f as f64, value, path)?,
        Value::F64(f) => float(*f, value, path)?,
        Value::Char(c) => PlainValue::String(c.to_string()),
        Value::String(s) => PlainValue::String(s.clone()),
        Value::Document(doc) => PlainValue::Object(coerce_document(doc, path)?),
        Value::Array(values) => {
            let mut sequence = Vec::with_capacity(values.len());
            for (index, value) in values.iter().enumerate() {
                sequence.push(coerce(value, &format!("{}[{}]", path, index))?);
            }
            PlainValue::Array(sequence)
        }
        Value::Bytes(data) => {
            PlainValue::Array(data.iter().map(|b| PlainValue::from(*b)).collect())
        }
        Value::DateTime(instant) => {
            PlainValue::String(instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }
        Value::Uuid(uuid) => PlainValue::String(uuid.hyphenated().to_string()),
        Value::Timestamp { seconds, increment } => {
            let mut map = PlainMap::new();
            map.insert(TIMESTAMP_SECONDS.to_string(), PlainValue::from(*seconds));
            map.insert(TIMESTAMP_INCREMENT.to_string(), PlainValue::from(*increment));
            PlainValue::Object(map)
        }
        Value::Unknown => return Err(unconvertible(value, path)),
    };
    Ok(plain)
}

fn wide_integer<T: ToString>(as_i64: Option<i64>, as_u64: Option<u64>, raw: &T) -> PlainValue {
    match (as_i64, as_u64) {
        (Some(i), _) => PlainValue::from(i),
        (None, Some(u)) => PlainValue::from(u),
        // beyond 64 bits a json number would round, the decimal text does not
        (None, None) => PlainValue::String(raw.to_string()),
    }
}

fn float(f: f64, value: &Value, path: &str) -> ReadModelResult<PlainValue> {
    match Number::from_f64(f) {
        Some(number) => Ok(PlainValue::Number(number)),
        None => Err(unconvertible(value, path)),
    }
}

fn unconvertible(value: &Value, path: &str) -> ReadModelError {
    let location = if path.is_empty() { "<root>" } else { path };
    log::error!(
        "Value {:?} of kind {} at '{}' has no lossless plain representation",
        value,
        value.kind_name(),
        location
    );
    ReadModelError::new(
        &format!(
            "Value of kind {} at '{}' has no lossless plain representation",
            value.kind_name(),
            location
        ),
        ErrorKind::UnconvertibleValue,
    )
}

impl TryFrom<PlainValue> for Value {
    type Error = ReadModelError;

    fn try_from(value: PlainValue) -> Result<Self, Self::Error> {
        from_plain(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn scalars_map_to_themselves() {
        assert_eq!(to_plain(&Value::Null).unwrap(), json!(null));
        assert_eq!(to_plain(&Value::Bool(true)).unwrap(), json!(true));
        assert_eq!(to_plain(&Value::from("abc")).unwrap(), json!("abc"));
        assert_eq!(to_plain(&Value::I32(-5)).unwrap(), json!(-5));
        assert_eq!(to_plain(&Value::U64(u64::MAX)).unwrap(), json!(u64::MAX));
        assert_eq!(to_plain(&Value::F64(2.5)).unwrap(), json!(2.5));
        assert_eq!(to_plain(&Value::Char('x')).unwrap(), json!("x"));
    }

    #[test]
    fn f32_widens_without_loss() {
        let plain = to_plain(&Value::F32(0.1)).unwrap();
        let back: f32 = serde_json::from_value(plain).unwrap();
        assert_eq!(back, 0.1f32);
    }

    #[test]
    fn wide_integers_fall_back_to_decimal_text() {
        assert_eq!(to_plain(&Value::I128(42)).unwrap(), json!(42));
        assert_eq!(to_plain(&Value::U128(u64::MAX as u128)).unwrap(), json!(u64::MAX));
        assert_eq!(
            to_plain(&Value::I128(i128::MIN)).unwrap(),
            json!(i128::MIN.to_string())
        );
        assert_eq!(
            to_plain(&Value::U128(u128::MAX)).unwrap(),
            json!("340282366920938463463374607431768211455")
        );
    }

    #[test]
    fn datetime_keeps_sub_second_precision() {
        let instant = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let plain = to_plain(&Value::DateTime(instant)).unwrap();
        assert_eq!(plain, json!("2023-11-14T22:13:20.123456789Z"));

        let back: DateTime<Utc> = serde_json::from_value(plain).unwrap();
        assert_eq!(back, instant);
    }

    #[test]
    fn bytes_become_a_byte_sequence() {
        let plain = to_plain(&Value::bytes(vec![0u8, 7, 255])).unwrap();
        assert_eq!(plain, json!([0, 7, 255]));

        let back: Vec<u8> = serde_json::from_value(plain).unwrap();
        assert_eq!(back, vec![0u8, 7, 255]);
    }

    #[test]
    fn uuid_becomes_hyphenated_text() {
        let uuid = Uuid::new_v4();
        let plain = to_plain(&Value::Uuid(uuid)).unwrap();
        assert_eq!(plain, json!(uuid.to_string()));
        assert_eq!(Uuid::parse_str(plain.as_str().unwrap()).unwrap(), uuid);
    }

    #[test]
    fn timestamp_becomes_a_mapping() {
        let plain = to_plain(&Value::Timestamp { seconds: 9, increment: 3 }).unwrap();
        assert_eq!(plain, json!({ "t": 9, "i": 3 }));
    }

    #[test]
    fn nested_wrappers_are_converted_recursively() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let document = doc! {
            "meta": {
                "created": (Value::DateTime(instant)),
                "blobs": [(Value::bytes(vec![1u8])), (Value::I128(7))]
            }
        };
        let plain = document_to_plain(&document).unwrap();
        assert_eq!(
            PlainValue::Object(plain),
            json!({ "meta": { "created": "2024-01-02T03:04:05Z", "blobs": [[1], 7] } })
        );
    }

    #[test]
    fn non_finite_floats_are_rejected_with_their_path() {
        let document = doc! { "stats": { "ratios": [1.0, (f64::NAN)] } };
        let err = document_to_plain(&document).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnconvertibleValue);
        assert!(err.message().contains("stats.ratios[1]"));

        let err = to_plain(&Value::F32(f32::INFINITY)).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnconvertibleValue);
    }

    #[test]
    fn unknown_is_rejected() {
        let err = to_plain(&Value::Unknown).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnconvertibleValue);
        assert!(err.message().contains("<root>"));
    }

    #[test]
    fn plain_numbers_pick_the_narrowest_store_kind() {
        assert!(matches!(from_plain(&json!(1)).unwrap(), Value::I64(1)));
        assert!(matches!(from_plain(&json!(u64::MAX)).unwrap(), Value::U64(u64::MAX)));
        assert!(matches!(from_plain(&json!(1.5)).unwrap(), Value::F64(_)));
    }

    #[test]
    fn plain_tree_survives_a_round_trip() {
        let plain = json!({
            "name": "Ada",
            "age": 36,
            "balance": -12.75,
            "active": true,
            "nickname": null,
            "tags": ["math", "engines"],
            "address": { "city": "London", "lines": [1, { "x": [] }] }
        });
        let document = document_from_plain(plain.as_object().unwrap()).unwrap();
        let back = document_to_plain(&document).unwrap();
        assert_eq!(PlainValue::Object(back), plain);
    }

    #[test]
    fn empty_keys_are_rejected_on_write() {
        let err = from_plain(&json!({ "outer": { "": 1 } })).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidFieldName);
    }

    #[test]
    fn try_from_plain() {
        let value = Value::try_from(json!("42")).unwrap();
        assert_eq!(value, Value::from("42"));
    }
}

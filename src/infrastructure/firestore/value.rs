//! Decoding of Firestore typed values into plain JSON

use serde_json::{Map, Number, Value};

use crate::domain::Document;
use crate::store::StoreError;

/// Convert a Firestore `Value` (`{"stringValue": ..}`, `{"integerValue": ..}`, ...)
/// into plain JSON. Unknown tags decode to `null`.
pub fn decode_value(value: &Value) -> Value {
    let Some(obj) = value.as_object() else {
        return Value::Null;
    };
    let Some((tag, inner)) = obj.iter().next() else {
        return Value::Null;
    };

    match tag.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" => Value::Bool(inner.as_bool().unwrap_or(false)),
        // int64 is sent as a decimal string
        "integerValue" => inner
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .or_else(|| inner.as_i64())
            .map(|n| Value::Number(n.into()))
            .unwrap_or(Value::Null),
        "doubleValue" => inner
            .as_f64()
            .or_else(|| inner.as_str().and_then(|s| s.parse::<f64>().ok()))
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "geoPointValue" => inner.clone(),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => Value::Object(
            inner
                .get("fields")
                .map(decode_fields)
                .unwrap_or_default(),
        ),
        _ => Value::Null,
    }
}

/// Decode a Firestore `fields` object.
pub fn decode_fields(fields: &Value) -> Map<String, Value> {
    fields
        .as_object()
        .map(|fields| {
            fields
                .iter()
                .map(|(key, value)| (key.clone(), decode_value(value)))
                .collect()
        })
        .unwrap_or_default()
}

/// Decode one REST document. The id is the last segment of its resource name.
pub fn decode_document(raw: &Value) -> Result<Document, StoreError> {
    let name = raw
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Decode {
            id: "<unnamed>".to_string(),
            reason: "missing resource name".to_string(),
        })?;
    let id = name.rsplit('/').next().unwrap_or(name).to_string();
    let fields = raw.get("fields").map(decode_fields).unwrap_or_default();
    Ok(Document::new(id, fields))
}

//! Conversions between JSON payloads and Qdrant's protobuf values.

use hcore::Payload;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{ListValue, Struct, Value};
use std::collections::HashMap;

/// Convert a record payload into Qdrant's payload map.
pub fn payload_to_qdrant(payload: Payload) -> HashMap<String, Value> {
    payload
        .into_iter()
        .map(|(key, value)| (key, json_to_qdrant(value)))
        .collect()
}

/// Convert a Qdrant payload map back into a record payload.
pub fn payload_from_qdrant(payload: HashMap<String, Value>) -> Payload {
    payload
        .into_iter()
        .map(|(key, value)| (key, qdrant_to_json(value)))
        .collect()
}

fn json_to_qdrant(value: serde_json::Value) -> Value {
    let kind = match value {
        serde_json::Value::Null => Kind::NullValue(0),
        serde_json::Value::Bool(b) => Kind::BoolValue(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Kind::IntegerValue(i)
            } else {
                Kind::DoubleValue(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => Kind::StringValue(s),
        serde_json::Value::Array(values) => Kind::ListValue(ListValue {
            values: values.into_iter().map(json_to_qdrant).collect(),
        }),
        serde_json::Value::Object(fields) => Kind::StructValue(Struct {
            fields: fields
                .into_iter()
                .map(|(key, value)| (key, json_to_qdrant(value)))
                .collect(),
        }),
    };
    Value { kind: Some(kind) }
}

fn qdrant_to_json(value: Value) -> serde_json::Value {
    match value.kind {
        None | Some(Kind::NullValue(_)) => serde_json::Value::Null,
        Some(Kind::BoolValue(b)) => serde_json::Value::Bool(b),
        Some(Kind::IntegerValue(i)) => serde_json::Value::Number(i.into()),
        Some(Kind::DoubleValue(d)) => serde_json::Number::from_f64(d)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Some(Kind::StringValue(s)) => serde_json::Value::String(s),
        Some(Kind::ListValue(list)) => {
            serde_json::Value::Array(list.values.into_iter().map(qdrant_to_json).collect())
        }
        Some(Kind::StructValue(fields)) => serde_json::Value::Object(
            fields
                .fields
                .into_iter()
                .map(|(key, value)| (key, qdrant_to_json(value)))
                .collect(),
        ),
    }
}

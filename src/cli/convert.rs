//! JSON <-> Record conversion utilities

use super::CliError;
use crate::{Record, Value};

/// Convert one scalar serde_json::Value to a column Value.
///
/// Records are flat, so nested arrays and objects are kept as their JSON text.
pub fn json_to_value(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
        },
        serde_json::Value::String(s) => Value::String(s),
        nested => Value::String(nested.to_string()),
    }
}

/// Convert a JSON object to a Record
pub fn json_to_record(v: serde_json::Value) -> Result<Record, CliError> {
    match v {
        serde_json::Value::Object(obj) => Ok(obj
            .into_iter()
            .map(|(k, v)| (k, json_to_value(v)))
            .collect()),
        other => Err(CliError::NotARecord(type_name(&other).to_string())),
    }
}

/// Convert a JSON array of objects, or a single object, to Records
pub fn json_to_records(v: serde_json::Value) -> Result<Vec<Record>, CliError> {
    match v {
        serde_json::Value::Array(arr) => arr.into_iter().map(json_to_record).collect(),
        single => Ok(vec![json_to_record(single)?]),
    }
}

/// Convert a Record back to a JSON object
pub fn record_to_json(record: &Record) -> serde_json::Value {
    serde_json::Value::Object(
        record
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), value_to_json(v)))
            .collect(),
    )
}

fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
    }
}

fn type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

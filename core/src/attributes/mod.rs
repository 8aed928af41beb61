//! Attribute maps and their serialization at the API boundary.
//!
//! Typed attribute objects never travel past this module: anything that
//! implements `serde::Serialize` is turned into a flat [`AttributeMap`] once,
//! and the rest of the crate only ever sees maps.

mod keys;
mod values;

pub use keys::KeyAttributes;
pub use values::{EmptyAttributes, KeyValueAttribute};

use serde::Serialize;
use serde_json::Value;

use crate::error::TentaclesError;

/// Flat attribute map: top-level keys of the serialized object, values may be
/// scalars or nested JSON.
pub type AttributeMap = serde_json::Map<String, Value>;

pub use serde_json::Value as AttributeValue;

/// Serializes an attribute object into an [`AttributeMap`].
///
/// The value must serialize to a JSON object (or `null`, read as "no
/// attributes"). Anything else is an `AttributeSerialization` error; failures
/// are never replaced by an empty map.
pub fn serialize_attributes<T>(attributes: &T, scope: &'static str) -> Result<AttributeMap, TentaclesError>
where
    T: Serialize + ?Sized,
{
    let value = serde_json::to_value(attributes).map_err(|e| {
        TentaclesError::AttributeSerialization {
            scope,
            reason: e.to_string(),
        }
    })?;

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(AttributeMap::new()),
        other => Err(TentaclesError::AttributeSerialization {
            scope,
            reason: format!("expected an object, got {}", value_kind(&other)),
        }),
    }
}

/// Copies every entry of `source` into `target`, overriding existing keys.
pub fn merge_into(target: &mut AttributeMap, source: &AttributeMap) {
    for (key, value) in source {
        target.insert(key.clone(), value.clone());
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

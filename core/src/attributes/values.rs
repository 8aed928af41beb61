use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Attributes with no entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmptyAttributes {}

/// A single `key = value` attribute, for call sites that don't want to
/// declare a struct.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueAttribute<V> {
    pub key: String,
    pub value: V,
}

impl<V> KeyValueAttribute<V> {
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl<V: Serialize> Serialize for KeyValueAttribute<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.value)?;
        map.end()
    }
}

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::attributes::{AttributeMap, AttributeValue};
use crate::error::TentaclesError;

/// The unit passed through the middleware pipeline and delivered to sinks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    pub name: String,
    #[serde(default)]
    pub attributes: AttributeMap,
}

impl RawEvent {
    pub fn new(name: impl Into<String>, attributes: AttributeMap) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Reads an attribute and converts it into `T`.
    pub fn attribute_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, TentaclesError> {
        let value = self
            .attributes
            .get(key)
            .ok_or_else(|| TentaclesError::MissingAttribute {
                key: key.to_string(),
            })?;
        T::deserialize(value).map_err(|e| TentaclesError::AttributeType {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.insert(key.into(), value.into());
    }
}

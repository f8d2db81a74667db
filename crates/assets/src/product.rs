//! Product specification input model (TMF catalog JSON).

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A product specification as submitted to the catalog.
///
/// Only the fields the validators inspect are modelled; everything else in the
/// incoming document is ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSpecification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub is_bundle: bool,

    #[serde(default, rename = "productSpecCharacteristic")]
    pub characteristics: Vec<Characteristic>,

    #[serde(default, rename = "bundledProductSpecification")]
    pub bundled: Vec<ProductRef>,
}

impl ProductSpecification {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// A named characteristic with its declared values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Characteristic {
    pub name: String,

    #[serde(default, rename = "productSpecCharacteristicValue")]
    pub values: Vec<CharacteristicValue>,
}

impl Characteristic {
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            values: values
                .into_iter()
                .map(|v| CharacteristicValue {
                    value: JsonValue::String(v.into()),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicValue {
    pub value: JsonValue,
}

impl CharacteristicValue {
    /// Textual form of the value (strings unquoted, anything else as JSON).
    pub fn as_text(&self) -> String {
        match &self.value {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Reference to another catalog element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl ProductRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            href: None,
        }
    }
}

//! Extraction of the digital asset characteristics from a product specification.

use bae_core::{DomainError, DomainResult};

use crate::product::{Characteristic, ProductSpecification};

const MEDIA_TYPE: &str = "media type";
const ASSET_TYPE: &str = "asset type";
const LOCATION: &str = "location";

/// Digital characteristics as declared (each optional).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitalCharacteristics {
    pub media_type: Option<String>,
    pub asset_type: Option<String>,
    pub location: Option<String>,
}

/// Digital characteristics of a product known to be complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    pub media_type: String,
    pub asset_type: String,
    pub location: String,
}

impl DigitalCharacteristics {
    /// Collect the `media type`, `asset type` and `location` characteristics.
    ///
    /// Names are matched case-insensitively. Each may appear at most once and
    /// must carry exactly one value.
    pub fn parse(spec: &ProductSpecification) -> DomainResult<Self> {
        let mut media_type = Vec::new();
        let mut asset_type = Vec::new();
        let mut location = Vec::new();

        for characteristic in &spec.characteristics {
            let slot = match characteristic.name.to_lowercase().as_str() {
                MEDIA_TYPE => &mut media_type,
                ASSET_TYPE => &mut asset_type,
                LOCATION => &mut location,
                _ => continue,
            };
            slot.push(single_value(characteristic)?);
        }

        Ok(Self {
            media_type: at_most_one(media_type, MEDIA_TYPE)?,
            asset_type: at_most_one(asset_type, ASSET_TYPE)?,
            location: at_most_one(location, LOCATION)?,
        })
    }

    pub fn is_digital(&self) -> bool {
        self.media_type.is_some() || self.asset_type.is_some() || self.location.is_some()
    }

    /// Require all three characteristics.
    pub fn into_descriptor(self) -> DomainResult<AssetDescriptor> {
        Ok(AssetDescriptor {
            media_type: required(self.media_type, MEDIA_TYPE)?,
            asset_type: required(self.asset_type, ASSET_TYPE)?,
            location: required(self.location, LOCATION)?,
        })
    }
}

fn single_value(characteristic: &Characteristic) -> DomainResult<String> {
    match characteristic.values.as_slice() {
        [value] => Ok(value.as_text()),
        [] => Err(DomainError::product(format!(
            "The characteristic {} must contain a value",
            characteristic.name
        ))),
        _ => Err(DomainError::product(format!(
            "The characteristic {} must not contain multiple values",
            characteristic.name
        ))),
    }
}

fn at_most_one(mut values: Vec<String>, name: &str) -> DomainResult<Option<String>> {
    if values.len() > 1 {
        return Err(DomainError::product(format!(
            "The product specification must not contain more than one {name} characteristic"
        )));
    }
    Ok(values.pop())
}

fn required(value: Option<String>, name: &str) -> DomainResult<String> {
    value.ok_or_else(|| {
        DomainError::product(format!(
            "Digital product specifications must contain a {name} characteristic"
        ))
    })
}

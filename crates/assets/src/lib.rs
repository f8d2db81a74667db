//! Catalog validation module.
//!
//! Business rules applied to product specifications and product offerings before
//! they are accepted into the catalog. Storage, plugin discovery and site
//! information are reached only through the traits in [`ports`].

pub mod action;
pub mod asset;
pub mod characteristics;
pub mod in_memory;
pub mod offering;
pub mod offering_validator;
pub mod ports;
pub mod pricing;
pub mod product;
pub mod product_validator;

#[cfg(test)]
pub(crate) mod test_support;

pub use action::Action;
pub use asset::{AssetFormat, DigitalAsset, NewAsset, PluginInfo, BUNDLE_CONTENT_TYPE};
pub use characteristics::{AssetDescriptor, DigitalCharacteristics};
pub use in_memory::{InMemoryAssetRepository, InMemoryPluginRegistry, InMemoryProductCatalog};
pub use offering::{OfferingPrice, PriceAmount, ProductOffering};
pub use offering_validator::OfferingValidator;
pub use ports::{AssetRepository, PluginRegistry, ProductCatalog, SiteContext};
pub use pricing::{ChargePeriod, CurrencyCode, PriceType};
pub use product::{Characteristic, CharacteristicValue, ProductRef, ProductSpecification};
pub use product_validator::ProductValidator;

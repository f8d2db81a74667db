//! Collaborators the validators depend on.
//!
//! Implementations live outside this module (see [`crate::in_memory`] for the
//! test/dev versions). All lookups are single-record operations; atomicity is the
//! implementation's concern.

use std::sync::Arc;

use bae_core::{AssetId, DomainResult, Settings};

use crate::asset::{DigitalAsset, NewAsset, PluginInfo};

/// Registry of asset-type plugins keyed by asset type name.
pub trait PluginRegistry: Send + Sync {
    fn get(&self, asset_type: &str) -> Option<PluginInfo>;
}

/// Storage of digital asset records.
pub trait AssetRepository: Send + Sync {
    /// The asset served from `download_link`, if any.
    fn get_by_download_link(&self, download_link: &str) -> DomainResult<Option<DigitalAsset>>;

    /// Every asset recorded for `download_link`.
    fn assets_by_download_link(&self, download_link: &str) -> DomainResult<Vec<DigitalAsset>>;

    /// Assets claimed by the given product specification.
    fn assets_by_product(&self, product_id: &str) -> DomainResult<Vec<DigitalAsset>>;

    /// Bundle assets listing `asset_id` among their members.
    fn bundles_containing(&self, asset_id: AssetId) -> DomainResult<Vec<DigitalAsset>>;

    fn create(&self, asset: NewAsset) -> DomainResult<DigitalAsset>;

    /// Record `product_id` as the product specification claiming the asset.
    fn link_to_product(&self, asset_id: AssetId, product_id: &str) -> DomainResult<DigitalAsset>;
}

/// Information about the site this store is served from.
pub trait SiteContext: Send + Sync {
    /// Base URL of the site, ending with `/`.
    fn domain(&self) -> String;

    /// Path under [`SiteContext::domain`] where uploaded assets are served.
    fn media_path(&self) -> String {
        "media/resources/".to_string()
    }
}

/// Read access to the product catalog, used when validating offerings.
pub trait ProductCatalog: Send + Sync {
    fn exists(&self, product_id: &str) -> DomainResult<bool>;
}

impl SiteContext for Settings {
    fn domain(&self) -> String {
        self.site_domain.clone()
    }

    fn media_path(&self) -> String {
        self.media_path.clone()
    }
}

impl<S> PluginRegistry for Arc<S>
where
    S: PluginRegistry + ?Sized,
{
    fn get(&self, asset_type: &str) -> Option<PluginInfo> {
        (**self).get(asset_type)
    }
}

impl<S> AssetRepository for Arc<S>
where
    S: AssetRepository + ?Sized,
{
    fn get_by_download_link(&self, download_link: &str) -> DomainResult<Option<DigitalAsset>> {
        (**self).get_by_download_link(download_link)
    }

    fn assets_by_download_link(&self, download_link: &str) -> DomainResult<Vec<DigitalAsset>> {
        (**self).assets_by_download_link(download_link)
    }

    fn assets_by_product(&self, product_id: &str) -> DomainResult<Vec<DigitalAsset>> {
        (**self).assets_by_product(product_id)
    }

    fn bundles_containing(&self, asset_id: AssetId) -> DomainResult<Vec<DigitalAsset>> {
        (**self).bundles_containing(asset_id)
    }

    fn create(&self, asset: NewAsset) -> DomainResult<DigitalAsset> {
        (**self).create(asset)
    }

    fn link_to_product(&self, asset_id: AssetId, product_id: &str) -> DomainResult<DigitalAsset> {
        (**self).link_to_product(asset_id, product_id)
    }
}

impl<S> SiteContext for Arc<S>
where
    S: SiteContext + ?Sized,
{
    fn domain(&self) -> String {
        (**self).domain()
    }

    fn media_path(&self) -> String {
        (**self).media_path()
    }
}

impl<S> ProductCatalog for Arc<S>
where
    S: ProductCatalog + ?Sized,
{
    fn exists(&self, product_id: &str) -> DomainResult<bool> {
        (**self).exists(product_id)
    }
}

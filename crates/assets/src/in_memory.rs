//! In-memory collaborators for tests/dev.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use chrono::Utc;

use bae_core::{AssetId, DomainError, DomainResult};

use crate::asset::{DigitalAsset, NewAsset, PluginInfo};
use crate::ports::{AssetRepository, PluginRegistry, ProductCatalog};

fn poisoned() -> DomainError {
    DomainError::repository("lock poisoned")
}

/// In-memory asset storage preserving insertion order.
#[derive(Debug, Default)]
pub struct InMemoryAssetRepository {
    assets: RwLock<Vec<DigitalAsset>>,
}

impl InMemoryAssetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fully-formed record (fixtures).
    pub fn insert(&self, asset: DigitalAsset) -> DomainResult<()> {
        self.assets.write().map_err(|_| poisoned())?.push(asset);
        Ok(())
    }

    pub fn all(&self) -> DomainResult<Vec<DigitalAsset>> {
        Ok(self.assets.read().map_err(|_| poisoned())?.clone())
    }

    fn filter<F>(&self, predicate: F) -> DomainResult<Vec<DigitalAsset>>
    where
        F: Fn(&DigitalAsset) -> bool,
    {
        let assets = self.assets.read().map_err(|_| poisoned())?;
        Ok(assets.iter().filter(|a| predicate(a)).cloned().collect())
    }
}

impl AssetRepository for InMemoryAssetRepository {
    fn get_by_download_link(&self, download_link: &str) -> DomainResult<Option<DigitalAsset>> {
        Ok(self
            .filter(|a| a.download_link == download_link)?
            .into_iter()
            .next())
    }

    fn assets_by_download_link(&self, download_link: &str) -> DomainResult<Vec<DigitalAsset>> {
        self.filter(|a| a.download_link == download_link)
    }

    fn assets_by_product(&self, product_id: &str) -> DomainResult<Vec<DigitalAsset>> {
        self.filter(|a| a.product_id.as_deref() == Some(product_id))
    }

    fn bundles_containing(&self, asset_id: AssetId) -> DomainResult<Vec<DigitalAsset>> {
        self.filter(|a| a.bundled_assets.contains(&asset_id))
    }

    fn create(&self, asset: NewAsset) -> DomainResult<DigitalAsset> {
        let record = DigitalAsset {
            id: AssetId::new(),
            provider: asset.provider,
            content_type: asset.content_type,
            download_link: asset.download_link,
            resource_path: asset.resource_path,
            product_id: None,
            bundled_assets: asset.bundled_assets,
            created_at: Utc::now(),
        };
        self.insert(record.clone())?;
        Ok(record)
    }

    fn link_to_product(&self, asset_id: AssetId, product_id: &str) -> DomainResult<DigitalAsset> {
        let mut assets = self.assets.write().map_err(|_| poisoned())?;
        let asset = assets
            .iter_mut()
            .find(|a| a.id == asset_id)
            .ok_or_else(|| DomainError::not_found(format!("asset {asset_id} not found")))?;
        asset.product_id = Some(product_id.to_string());
        Ok(asset.clone())
    }
}

/// Plugin registry backed by a map keyed on plugin name.
#[derive(Debug, Default)]
pub struct InMemoryPluginRegistry {
    plugins: RwLock<HashMap<String, PluginInfo>>,
}

impl InMemoryPluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plugins(plugins: impl IntoIterator<Item = PluginInfo>) -> Self {
        let registry = Self::new();
        for plugin in plugins {
            registry.register(plugin);
        }
        registry
    }

    pub fn register(&self, plugin: PluginInfo) {
        if let Ok(mut map) = self.plugins.write() {
            map.insert(plugin.name.clone(), plugin);
        }
    }
}

impl PluginRegistry for InMemoryPluginRegistry {
    fn get(&self, asset_type: &str) -> Option<PluginInfo> {
        let map = self.plugins.read().ok()?;
        map.get(asset_type).cloned()
    }
}

/// Set of known product specification ids.
#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    products: RwLock<HashSet<String>>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            products: RwLock::new(ids.into_iter().map(Into::into).collect()),
        }
    }
}

impl ProductCatalog for InMemoryProductCatalog {
    fn exists(&self, product_id: &str) -> DomainResult<bool> {
        Ok(self
            .products
            .read()
            .map_err(|_| poisoned())?
            .contains(product_id))
    }
}

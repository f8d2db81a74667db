//! Shared fixtures for the validator unit tests.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde_json::json;

use bae_core::{AssetId, DomainResult, ProviderId, Settings};

use crate::asset::{AssetFormat, DigitalAsset, NewAsset, PluginInfo};
use crate::in_memory::{InMemoryAssetRepository, InMemoryPluginRegistry};
use crate::ports::AssetRepository;
use crate::product::ProductSpecification;

pub const WIDGET_URL: &str = "http://testlocation.org/media/resources/test_user/widget.wgt";
pub const WIDGET_MEDIA: &str = "application/x-widget";

/// Repository decorator recording every call as `"<op>:<arg>"`.
#[derive(Debug, Default)]
pub struct RecordingAssetRepository {
    pub inner: InMemoryAssetRepository,
    calls: Mutex<Vec<String>>,
}

impl RecordingAssetRepository {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, op: &str) -> Vec<String> {
        let prefix = format!("{op}:");
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(&prefix))
            .collect()
    }

    pub fn created(&self) -> Vec<DigitalAsset> {
        self.inner.all().unwrap()
    }
}

impl AssetRepository for RecordingAssetRepository {
    fn get_by_download_link(&self, download_link: &str) -> DomainResult<Option<DigitalAsset>> {
        self.record(format!("get_by_download_link:{download_link}"));
        self.inner.get_by_download_link(download_link)
    }

    fn assets_by_download_link(&self, download_link: &str) -> DomainResult<Vec<DigitalAsset>> {
        self.record(format!("assets_by_download_link:{download_link}"));
        self.inner.assets_by_download_link(download_link)
    }

    fn assets_by_product(&self, product_id: &str) -> DomainResult<Vec<DigitalAsset>> {
        self.record(format!("assets_by_product:{product_id}"));
        self.inner.assets_by_product(product_id)
    }

    fn bundles_containing(&self, asset_id: AssetId) -> DomainResult<Vec<DigitalAsset>> {
        self.record(format!("bundles_containing:{asset_id}"));
        self.inner.bundles_containing(asset_id)
    }

    fn create(&self, asset: NewAsset) -> DomainResult<DigitalAsset> {
        self.record(format!("create:{}", asset.download_link));
        self.inner.create(asset)
    }

    fn link_to_product(&self, asset_id: AssetId, product_id: &str) -> DomainResult<DigitalAsset> {
        self.record(format!("link_to_product:{product_id}"));
        self.inner.link_to_product(asset_id, product_id)
    }
}

pub struct Fixture {
    pub provider: ProviderId,
    pub plugins: Arc<InMemoryPluginRegistry>,
    pub assets: Arc<RecordingAssetRepository>,
    pub settings: Settings,
}

impl Fixture {
    /// Widget plugin (file only), site at `http://testlocation.org/`.
    pub fn new() -> Self {
        let fixture = Self {
            provider: ProviderId::new(),
            plugins: Arc::new(InMemoryPluginRegistry::new()),
            assets: Arc::new(RecordingAssetRepository::default()),
            settings: Settings {
                site_domain: "http://testlocation.org/".to_string(),
                ..Settings::default()
            },
        };
        fixture.widget_plugin([WIDGET_MEDIA], [AssetFormat::File]);
        fixture
    }

    pub fn widget_plugin<const N: usize, const M: usize>(
        &self,
        media_types: [&str; N],
        formats: [AssetFormat; M],
    ) {
        self.plugins
            .register(PluginInfo::new("Widget", media_types, formats));
    }

    /// Store an uploaded asset at `download_link`.
    pub fn seed_asset(
        &self,
        provider: ProviderId,
        download_link: &str,
        content_type: &str,
        product_id: Option<&str>,
    ) -> DigitalAsset {
        let asset = DigitalAsset {
            id: AssetId::new(),
            provider,
            content_type: content_type.to_string(),
            download_link: download_link.to_string(),
            resource_path: "media/resources/test_user/widget.wgt".to_string(),
            product_id: product_id.map(str::to_string),
            bundled_assets: vec![],
            created_at: Utc::now(),
        };
        self.assets.inner.insert(asset.clone()).unwrap();
        asset
    }

    pub fn seed_widget(&self) -> DigitalAsset {
        self.seed_asset(self.provider, WIDGET_URL, WIDGET_MEDIA, None)
    }
}

pub fn spec(value: serde_json::Value) -> ProductSpecification {
    serde_json::from_value(value).unwrap()
}

pub fn basic_product() -> serde_json::Value {
    json!({
        "name": "Widget",
        "version": "1.0",
        "isBundle": false,
        "productSpecCharacteristic": [{
            "name": "Media Type",
            "productSpecCharacteristicValue": [{"value": WIDGET_MEDIA}]
        }, {
            "name": "Asset Type",
            "productSpecCharacteristicValue": [{"value": "Widget"}]
        }, {
            "name": "Location",
            "productSpecCharacteristicValue": [{"value": WIDGET_URL}]
        }]
    })
}

pub fn basic_bundle() -> serde_json::Value {
    json!({
        "name": "Bundle",
        "isBundle": true,
        "bundledProductSpecification": [{"id": "8"}, {"id": "9"}]
    })
}

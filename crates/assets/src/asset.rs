//! Digital asset records and asset-type plugin descriptors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bae_core::{AssetId, ProviderId};

/// Content type stored on assets that aggregate other assets.
pub const BUNDLE_CONTENT_TYPE: &str = "bundle";

/// A stored resource (uploaded file or external URL) backing a digital product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitalAsset {
    pub id: AssetId,
    pub provider: ProviderId,
    pub content_type: String,
    pub download_link: String,
    pub resource_path: String,
    /// Product specification claiming this asset, once attached.
    pub product_id: Option<String>,
    pub bundled_assets: Vec<AssetId>,
    pub created_at: DateTime<Utc>,
}

impl DigitalAsset {
    pub fn is_bundle(&self) -> bool {
        self.content_type == BUNDLE_CONTENT_TYPE
    }

    /// True when a product other than `claimant` already references this asset.
    pub fn is_claimed_by_other(&self, claimant: Option<&str>) -> bool {
        match self.product_id.as_deref() {
            None => false,
            Some(owner) => Some(owner) != claimant,
        }
    }
}

/// Fields required to create an asset record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAsset {
    pub provider: ProviderId,
    pub content_type: String,
    pub download_link: String,
    pub resource_path: String,
    pub bundled_assets: Vec<AssetId>,
}

impl NewAsset {
    /// An asset served from an external URL.
    pub fn url(provider: ProviderId, download_link: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            provider,
            content_type: content_type.into(),
            download_link: download_link.into(),
            resource_path: String::new(),
            bundled_assets: Vec::new(),
        }
    }

    /// An asset grouping the assets of a product bundle.
    pub fn bundle(provider: ProviderId, bundled_assets: Vec<AssetId>) -> Self {
        Self {
            provider,
            content_type: BUNDLE_CONTENT_TYPE.to_string(),
            download_link: String::new(),
            resource_path: String::new(),
            bundled_assets,
        }
    }
}

/// How a plugin's assets are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetFormat {
    /// Uploaded to this store and served from its media path.
    File,
    /// Hosted elsewhere; only the link is recorded.
    Url,
}

/// Registered handler describing which media types and formats an asset type supports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub name: String,
    /// Accepted media types; empty means any.
    pub media_types: Vec<String>,
    pub formats: Vec<AssetFormat>,
}

impl PluginInfo {
    pub fn new(
        name: impl Into<String>,
        media_types: impl IntoIterator<Item = impl Into<String>>,
        formats: impl IntoIterator<Item = AssetFormat>,
    ) -> Self {
        Self {
            name: name.into(),
            media_types: media_types.into_iter().map(Into::into).collect(),
            formats: formats.into_iter().collect(),
        }
    }

    pub fn supports(&self, format: AssetFormat) -> bool {
        self.formats.contains(&format)
    }

    pub fn accepts_media_type(&self, media_type: &str) -> bool {
        self.media_types.is_empty() || self.media_types.iter().any(|m| m == media_type)
    }
}

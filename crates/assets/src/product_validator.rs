//! Product specification validation.
//!
//! Checks the digital characteristics of a product specification and resolves
//! (or creates) the digital asset record backing it. Bundles aggregate the
//! assets of their bundled product specifications into a bundle asset.
//!
//! ```text
//! action ─ parse ─┬─ create ─┬─ bundle ──── aggregate member assets ── create bundle asset
//!                 │          ├─ physical ── nothing to do
//!                 │          └─ digital ─── plugin ── media type ── location ── file? lookup : create
//!                 ├─ attach ─── link resolved asset to the spec id
//!                 ├─ update ─── digital characteristics must be unchanged
//!                 ├─ upgrade ── create checks, tolerating the spec's own claim
//!                 └─ delete ─── assets in a bundle cannot go away
//! ```

use tracing::{debug, info, warn};
use url::Url;

use bae_core::{AssetId, DomainError, DomainResult, ProviderId};

use crate::action::Action;
use crate::asset::{AssetFormat, DigitalAsset, NewAsset, PluginInfo};
use crate::characteristics::{AssetDescriptor, DigitalCharacteristics};
use crate::ports::{AssetRepository, PluginRegistry, SiteContext};
use crate::product::ProductSpecification;

/// Validator for product specifications.
///
/// - `P`: plugin registry resolving asset types
/// - `R`: digital asset storage
/// - `S`: site information (decides whether a location is a local upload)
#[derive(Debug)]
pub struct ProductValidator<P, R, S> {
    plugins: P,
    assets: R,
    site: S,
}

impl<P, R, S> ProductValidator<P, R, S> {
    pub fn new(plugins: P, assets: R, site: S) -> Self {
        Self {
            plugins,
            assets,
            site,
        }
    }
}

impl<P, R, S> ProductValidator<P, R, S>
where
    P: PluginRegistry,
    R: AssetRepository,
    S: SiteContext,
{
    /// Validate `spec` for the given textual action on behalf of `owner`.
    pub fn validate(
        &self,
        action: &str,
        owner: ProviderId,
        spec: &ProductSpecification,
    ) -> DomainResult<()> {
        let parsed = action.parse::<Action>().inspect_err(|_| {
            warn!(action, "rejected product specification with unknown action");
        })?;
        self.validate_action(parsed, owner, spec)
    }

    pub fn validate_action(
        &self,
        action: Action,
        owner: ProviderId,
        spec: &ProductSpecification,
    ) -> DomainResult<()> {
        debug!(%action, %owner, product_id = ?spec.id(), "validating product specification");

        let result = match action {
            Action::Create => self.validate_creation(owner, spec),
            Action::Attach => self.attach_info(owner, spec),
            Action::Update => self.validate_update(spec),
            Action::Upgrade => self.validate_upgrade(owner, spec),
            Action::Delete => self.validate_deletion(spec),
        };

        if let Err(err) = &result {
            warn!(%action, kind = err.kind(), error = %err, "product specification rejected");
        }
        result
    }

    fn validate_creation(&self, owner: ProviderId, spec: &ProductSpecification) -> DomainResult<()> {
        let chars = DigitalCharacteristics::parse(spec)?;

        if spec.is_bundle {
            check_bundle(spec, &chars)?;
            self.create_bundle_asset(owner, spec)?;
            return Ok(());
        }

        if !chars.is_digital() {
            debug!("physical product specification; no asset to resolve");
            return Ok(());
        }

        let descriptor = chars.into_descriptor()?;
        self.resolve_asset(owner, &descriptor, None)?;
        Ok(())
    }

    fn attach_info(&self, owner: ProviderId, spec: &ProductSpecification) -> DomainResult<()> {
        let product_id = required_id(spec)?;
        let chars = DigitalCharacteristics::parse(spec)?;

        if spec.is_bundle {
            let members = self.bundle_members(spec)?;
            let Some(first) = members.first() else {
                return Ok(());
            };

            let bundle = self
                .assets
                .bundles_containing(*first)?
                .into_iter()
                .find(|b| {
                    b.provider == owner
                        && b.bundled_assets == members
                        && !b.is_claimed_by_other(Some(product_id))
                })
                .ok_or_else(|| {
                    DomainError::product(
                        "The digital asset bundle of the product specification has not been created",
                    )
                })?;

            self.assets.link_to_product(bundle.id, product_id)?;
            info!(asset_id = %bundle.id, product_id, "bundle asset attached");
            return Ok(());
        }

        if !chars.is_digital() {
            return Ok(());
        }

        let descriptor = chars.into_descriptor()?;
        let candidates = self.assets.assets_by_download_link(&descriptor.location)?;
        if candidates.is_empty() {
            return Err(not_an_asset());
        }

        let asset = candidates
            .iter()
            .find(|a| a.provider == owner && !a.is_claimed_by_other(Some(product_id)))
            .ok_or_else(|| {
                if candidates.iter().any(|a| a.is_claimed_by_other(Some(product_id))) {
                    already_claimed()
                } else {
                    not_authorized()
                }
            })?;

        self.assets.link_to_product(asset.id, product_id)?;
        info!(asset_id = %asset.id, product_id, "digital asset attached");
        Ok(())
    }

    fn validate_update(&self, spec: &ProductSpecification) -> DomainResult<()> {
        let chars = DigitalCharacteristics::parse(spec)?;

        if spec.is_bundle {
            return check_bundle(spec, &chars);
        }

        let linked: Vec<DigitalAsset> = match spec.id() {
            Some(id) => self
                .assets
                .assets_by_product(id)?
                .into_iter()
                .filter(|a| !a.is_bundle())
                .collect(),
            None => Vec::new(),
        };

        if !chars.is_digital() {
            if linked.is_empty() {
                return Ok(());
            }
            return Err(asset_changed());
        }

        let descriptor = chars.into_descriptor()?;
        required_id(spec)?;

        let unchanged = linked.iter().any(|a| {
            a.download_link == descriptor.location && a.content_type == descriptor.media_type
        });
        if unchanged {
            Ok(())
        } else {
            Err(asset_changed())
        }
    }

    fn validate_upgrade(&self, owner: ProviderId, spec: &ProductSpecification) -> DomainResult<()> {
        let product_id = required_id(spec)?;
        let chars = DigitalCharacteristics::parse(spec)?;

        if spec.is_bundle {
            return check_bundle(spec, &chars);
        }

        if !chars.is_digital() {
            return Ok(());
        }

        let descriptor = chars.into_descriptor()?;
        self.resolve_asset(owner, &descriptor, Some(product_id))?;
        Ok(())
    }

    fn validate_deletion(&self, spec: &ProductSpecification) -> DomainResult<()> {
        let product_id = required_id(spec)?;

        for asset in self.assets.assets_by_product(product_id)? {
            if !self.assets.bundles_containing(asset.id)?.is_empty() {
                return Err(DomainError::product(
                    "The digital asset of the product specification is included in a bundle",
                ));
            }
        }
        Ok(())
    }

    /// First asset of every bundled product specification that has one.
    fn bundle_members(&self, spec: &ProductSpecification) -> DomainResult<Vec<AssetId>> {
        let mut members = Vec::new();
        for bundled in &spec.bundled {
            if let Some(asset) = self.assets.assets_by_product(&bundled.id)?.into_iter().next() {
                members.push(asset.id);
            }
        }
        Ok(members)
    }

    fn create_bundle_asset(
        &self,
        owner: ProviderId,
        spec: &ProductSpecification,
    ) -> DomainResult<Option<DigitalAsset>> {
        let members = self.bundle_members(spec)?;
        if members.is_empty() {
            debug!("bundle of physical products; no bundle asset");
            return Ok(None);
        }

        let bundle = self.assets.create(NewAsset::bundle(owner, members))?;
        info!(asset_id = %bundle.id, members = bundle.bundled_assets.len(), "bundle asset created");
        Ok(Some(bundle))
    }

    /// Resolve the asset described by `descriptor`.
    ///
    /// `claimant` is the product specification allowed to already own the asset.
    fn resolve_asset(
        &self,
        owner: ProviderId,
        descriptor: &AssetDescriptor,
        claimant: Option<&str>,
    ) -> DomainResult<DigitalAsset> {
        let plugin = self.plugins.get(&descriptor.asset_type).ok_or_else(|| {
            DomainError::product(format!(
                "The given product specification contains a not supported asset type: {}",
                descriptor.asset_type
            ))
        })?;

        if !plugin.accepts_media_type(&descriptor.media_type) {
            return Err(DomainError::product(
                "The media type characteristic included in the product specification is not valid for the given asset type",
            ));
        }

        if !is_valid_url(&descriptor.location) {
            return Err(DomainError::product(
                "The location characteristic included in the product specification is not a valid URL",
            ));
        }

        if self.is_file_backed(&plugin, &descriptor.location) {
            self.uploaded_asset(owner, descriptor, claimant)
        } else {
            self.url_asset(owner, descriptor, claimant)
        }
    }

    fn is_file_backed(&self, plugin: &PluginInfo, location: &str) -> bool {
        if !plugin.supports(AssetFormat::File) {
            return false;
        }
        if !plugin.supports(AssetFormat::Url) {
            return true;
        }
        let prefix = format!("{}{}", self.site.domain(), self.site.media_path());
        location.starts_with(&prefix)
    }

    fn uploaded_asset(
        &self,
        owner: ProviderId,
        descriptor: &AssetDescriptor,
        claimant: Option<&str>,
    ) -> DomainResult<DigitalAsset> {
        let asset = self
            .assets
            .get_by_download_link(&descriptor.location)?
            .ok_or_else(not_an_asset)?;

        if asset.provider != owner {
            return Err(not_authorized());
        }

        if asset.content_type != descriptor.media_type {
            return Err(DomainError::product(
                "The specified media type characteristic is different from the one of the provided digital asset",
            ));
        }

        if asset.is_claimed_by_other(claimant) {
            return Err(already_claimed());
        }

        debug!(asset_id = %asset.id, "uploaded asset resolved");
        Ok(asset)
    }

    fn url_asset(
        &self,
        owner: ProviderId,
        descriptor: &AssetDescriptor,
        claimant: Option<&str>,
    ) -> DomainResult<DigitalAsset> {
        let existing = self.assets.assets_by_download_link(&descriptor.location)?;

        if existing.iter().any(|a| a.is_claimed_by_other(claimant)) {
            return Err(already_claimed());
        }

        if let Some(claimant) = claimant {
            if let Some(own) = existing
                .iter()
                .find(|a| a.product_id.as_deref() == Some(claimant))
            {
                return Ok(own.clone());
            }
        }

        // Records are keyed by location: a retried create reuses the pending one.
        if let Some(pending) = existing.into_iter().find(|a| {
            a.product_id.is_none()
                && a.provider == owner
                && a.content_type == descriptor.media_type
        }) {
            debug!(asset_id = %pending.id, "reusing unclaimed url asset");
            return Ok(pending);
        }

        let asset = self.assets.create(NewAsset::url(
            owner,
            descriptor.location.as_str(),
            descriptor.media_type.as_str(),
        ))?;
        info!(asset_id = %asset.id, location = %asset.download_link, "url asset created");
        Ok(asset)
    }
}

fn check_bundle(spec: &ProductSpecification, chars: &DigitalCharacteristics) -> DomainResult<()> {
    if chars.is_digital() {
        return Err(DomainError::product(
            "Product spec bundles cannot define digital assets",
        ));
    }
    if spec.bundled.len() < 2 {
        return Err(DomainError::product(
            "A product spec bundle must contain at least two bundled product specs",
        ));
    }
    Ok(())
}

fn required_id(spec: &ProductSpecification) -> DomainResult<&str> {
    spec.id()
        .ok_or_else(|| DomainError::validation("Missing required field id in product specification"))
}

fn is_valid_url(location: &str) -> bool {
    match Url::parse(location) {
        Ok(url) => matches!(url.scheme(), "http" | "https" | "ftp") && url.has_host(),
        Err(_) => false,
    }
}

fn not_an_asset() -> DomainError {
    DomainError::product(
        "The URL specified in the location characteristic does not point to a valid digital asset",
    )
}

fn not_authorized() -> DomainError {
    DomainError::permission_denied(
        "You are not authorized to use the digital asset specified in the location characteristic",
    )
}

fn already_claimed() -> DomainError {
    DomainError::conflict(
        "There is already an existing product specification defined for the given digital asset",
    )
}

fn asset_changed() -> DomainError {
    DomainError::product("Digital assets cannot be changed in an update, use upgrade instead")
}

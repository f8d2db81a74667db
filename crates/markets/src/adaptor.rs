//! Remote marketplace operations.

use std::sync::Arc;

use serde::Serialize;

/// Store description sent to a marketplace on registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreInfo {
    pub store_name: String,
    pub store_uri: String,
}

/// Offering published by this store on a marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    /// Location of the offering description in this store.
    pub url: String,
}

/// Client for a marketplace's store and service management API.
///
/// `host` is the marketplace base URL, always ending with `/`.
pub trait MarketAdaptor: Send + Sync {
    fn add_store(&self, host: &str, store: &StoreInfo) -> anyhow::Result<()>;
    fn delete_store(&self, host: &str, store_name: &str) -> anyhow::Result<()>;
    fn add_service(&self, host: &str, store_name: &str, service: &ServiceInfo) -> anyhow::Result<()>;
    fn delete_service(&self, host: &str, store_name: &str, service: &str) -> anyhow::Result<()>;
}

impl<A> MarketAdaptor for Arc<A>
where
    A: MarketAdaptor + ?Sized,
{
    fn add_store(&self, host: &str, store: &StoreInfo) -> anyhow::Result<()> {
        (**self).add_store(host, store)
    }

    fn delete_store(&self, host: &str, store_name: &str) -> anyhow::Result<()> {
        (**self).delete_store(host, store_name)
    }

    fn add_service(&self, host: &str, store_name: &str, service: &ServiceInfo) -> anyhow::Result<()> {
        (**self).add_service(host, store_name, service)
    }

    fn delete_service(&self, host: &str, store_name: &str, service: &str) -> anyhow::Result<()> {
        (**self).delete_service(host, store_name, service)
    }
}

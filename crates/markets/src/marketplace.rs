//! Marketplace records.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use bae_core::{DomainError, DomainResult};

/// A marketplace this store is registered on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marketplace {
    pub name: String,
    pub host: String,
    pub registered_at: DateTime<Utc>,
}

/// Public view of a marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketplaceInfo {
    pub name: String,
    pub host: String,
}

impl From<&Marketplace> for MarketplaceInfo {
    fn from(value: &Marketplace) -> Self {
        Self {
            name: value.name.clone(),
            host: value.host.clone(),
        }
    }
}

/// Storage of marketplace records, unique by name.
pub trait MarketplaceStore: Send + Sync {
    fn get(&self, name: &str) -> DomainResult<Option<Marketplace>>;
    fn insert(&self, marketplace: Marketplace) -> DomainResult<()>;
    /// All records in registration order.
    fn list(&self) -> DomainResult<Vec<Marketplace>>;
    fn remove(&self, name: &str) -> DomainResult<()>;
}

impl<S> MarketplaceStore for Arc<S>
where
    S: MarketplaceStore + ?Sized,
{
    fn get(&self, name: &str) -> DomainResult<Option<Marketplace>> {
        (**self).get(name)
    }

    fn insert(&self, marketplace: Marketplace) -> DomainResult<()> {
        (**self).insert(marketplace)
    }

    fn list(&self) -> DomainResult<Vec<Marketplace>> {
        (**self).list()
    }

    fn remove(&self, name: &str) -> DomainResult<()> {
        (**self).remove(name)
    }
}

/// In-memory marketplace records for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryMarketplaceStore {
    inner: RwLock<Vec<Marketplace>>,
}

impl InMemoryMarketplaceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> DomainError {
    DomainError::repository("lock poisoned")
}

impl MarketplaceStore for InMemoryMarketplaceStore {
    fn get(&self, name: &str) -> DomainResult<Option<Marketplace>> {
        let markets = self.inner.read().map_err(|_| poisoned())?;
        Ok(markets.iter().find(|m| m.name == name).cloned())
    }

    fn insert(&self, marketplace: Marketplace) -> DomainResult<()> {
        let mut markets = self.inner.write().map_err(|_| poisoned())?;
        if markets.iter().any(|m| m.name == marketplace.name) {
            return Err(DomainError::conflict(format!(
                "marketplace {} already stored",
                marketplace.name
            )));
        }
        markets.push(marketplace);
        Ok(())
    }

    fn list(&self) -> DomainResult<Vec<Marketplace>> {
        Ok(self.inner.read().map_err(|_| poisoned())?.clone())
    }

    fn remove(&self, name: &str) -> DomainResult<()> {
        let mut markets = self.inner.write().map_err(|_| poisoned())?;
        let before = markets.len();
        markets.retain(|m| m.name != name);
        if markets.len() == before {
            return Err(DomainError::not_found(format!("marketplace {name} not found")));
        }
        Ok(())
    }
}

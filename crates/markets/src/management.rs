//! Register/unregister this store on marketplaces.

use chrono::Utc;
use tracing::{info, warn};

use crate::adaptor::{MarketAdaptor, ServiceInfo, StoreInfo};
use crate::error::MarketError;
use crate::marketplace::{Marketplace, MarketplaceInfo, MarketplaceStore};

/// Marketplace registration service.
///
/// - `A`: remote marketplace client
/// - `S`: local marketplace records
#[derive(Debug)]
pub struct MarketManager<A, S> {
    adaptor: A,
    store: S,
    store_name: String,
}

impl<A, S> MarketManager<A, S> {
    /// `store_name` is the name this store registers itself under
    /// (see `bae_core::Settings::store_name`).
    pub fn new(adaptor: A, store: S, store_name: impl Into<String>) -> Self {
        Self {
            adaptor,
            store,
            store_name: store_name.into(),
        }
    }
}

impl<A, S> MarketManager<A, S>
where
    A: MarketAdaptor,
    S: MarketplaceStore,
{
    /// Register this store (reachable at `site`) on the marketplace at `host`.
    ///
    /// The marketplace is contacted before the local record is written; if the
    /// write fails the remote registration is withdrawn again.
    pub fn register_on_market(&self, name: &str, host: &str, site: &str) -> Result<(), MarketError> {
        if name.trim().is_empty() {
            return Err(MarketError::Validation(
                "Missing required field name".to_string(),
            ));
        }
        if host.trim().is_empty() {
            return Err(MarketError::Validation(
                "Missing required field host".to_string(),
            ));
        }

        let host = normalize_host(host);

        if self.store.get(name)?.is_some() {
            return Err(MarketError::NameInUse);
        }

        let store_info = StoreInfo {
            store_name: self.store_name.clone(),
            store_uri: site.to_string(),
        };

        self.adaptor.add_store(&host, &store_info).map_err(|e| {
            warn!(market = name, %host, error = %e, "marketplace rejected store registration");
            MarketError::BadGateway(e)
        })?;

        let stored = self.store.insert(Marketplace {
            name: name.to_string(),
            host: host.clone(),
            registered_at: Utc::now(),
        });
        if let Err(err) = stored {
            warn!(market = name, %host, error = %err, "could not record marketplace; withdrawing registration");
            if let Err(e) = self.adaptor.delete_store(&host, &self.store_name) {
                warn!(market = name, %host, error = %e, "marketplace registration left behind");
            }
            return Err(err.into());
        }

        info!(market = name, %host, "registered on marketplace");
        Ok(())
    }

    /// Marketplaces this store is registered on, in registration order.
    pub fn get_marketplaces(&self) -> Result<Vec<MarketplaceInfo>, MarketError> {
        Ok(self.store.list()?.iter().map(MarketplaceInfo::from).collect())
    }

    pub fn unregister_from_market(&self, name: &str) -> Result<(), MarketError> {
        let market = self.registered(name)?;

        self.adaptor
            .delete_store(&market.host, &self.store_name)
            .map_err(|e| {
                warn!(market = name, host = %market.host, error = %e, "marketplace rejected store removal");
                MarketError::BadGateway(e)
            })?;

        self.store.remove(name)?;
        info!(market = name, "unregistered from marketplace");
        Ok(())
    }

    /// Publish `service` on a marketplace this store is registered on.
    pub fn add_service(&self, market_name: &str, service: &ServiceInfo) -> Result<(), MarketError> {
        let market = self.registered(market_name)?;

        self.adaptor
            .add_service(&market.host, &self.store_name, service)
            .map_err(|e| {
                warn!(market = market_name, service = %service.name, error = %e, "marketplace rejected service");
                MarketError::BadGateway(e)
            })?;

        info!(market = market_name, service = %service.name, "service published");
        Ok(())
    }

    pub fn delete_service(&self, market_name: &str, service: &str) -> Result<(), MarketError> {
        let market = self.registered(market_name)?;

        self.adaptor
            .delete_service(&market.host, &self.store_name, service)
            .map_err(|e| {
                warn!(market = market_name, service, error = %e, "marketplace rejected service removal");
                MarketError::BadGateway(e)
            })?;

        info!(market = market_name, service, "service withdrawn");
        Ok(())
    }

    fn registered(&self, name: &str) -> Result<Marketplace, MarketError> {
        self.store
            .get(name)?
            .ok_or_else(|| MarketError::NotFound(name.to_string()))
    }
}

fn normalize_host(host: &str) -> String {
    if host.ends_with('/') {
        host.to_string()
    } else {
        format!("{host}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use anyhow::bail;

    use crate::marketplace::InMemoryMarketplaceStore;

    const FAILING_SITE: &str = "http://currentsiteerr.com";

    #[derive(Debug, Default)]
    struct FakeMarketAdaptor {
        calls: Mutex<Vec<String>>,
        fail_delete: bool,
    }

    impl MarketAdaptor for FakeMarketAdaptor {
        fn add_store(&self, host: &str, store: &StoreInfo) -> anyhow::Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("add:{host}:{}:{}", store.store_name, store.store_uri));
            if store.store_uri == FAILING_SITE {
                bail!("500 Internal server error");
            }
            Ok(())
        }

        fn delete_store(&self, host: &str, store_name: &str) -> anyhow::Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("delete:{host}:{store_name}"));
            if self.fail_delete {
                bail!("503 Service unavailable");
            }
            Ok(())
        }

        fn add_service(&self, host: &str, store_name: &str, service: &ServiceInfo) -> anyhow::Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("add_service:{host}:{store_name}:{}:{}", service.name, service.url));
            if service.url.starts_with(FAILING_SITE) {
                bail!("500 Internal server error");
            }
            Ok(())
        }

        fn delete_service(&self, host: &str, store_name: &str, service: &str) -> anyhow::Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("delete_service:{host}:{store_name}:{service}"));
            if self.fail_delete {
                bail!("503 Service unavailable");
            }
            Ok(())
        }
    }

    /// Marketplace store whose writes always fail.
    #[derive(Debug, Default)]
    struct ReadOnlyMarketplaceStore;

    impl MarketplaceStore for ReadOnlyMarketplaceStore {
        fn get(&self, _name: &str) -> bae_core::DomainResult<Option<Marketplace>> {
            Ok(None)
        }

        fn insert(&self, _marketplace: Marketplace) -> bae_core::DomainResult<()> {
            Err(bae_core::DomainError::repository("marketplace store is read-only"))
        }

        fn list(&self) -> bae_core::DomainResult<Vec<Marketplace>> {
            Ok(Vec::new())
        }

        fn remove(&self, name: &str) -> bae_core::DomainResult<()> {
            Err(bae_core::DomainError::not_found(name))
        }
    }

    type Manager = MarketManager<Arc<FakeMarketAdaptor>, Arc<InMemoryMarketplaceStore>>;

    fn manager(adaptor: FakeMarketAdaptor) -> (Manager, Arc<FakeMarketAdaptor>) {
        let adaptor = Arc::new(adaptor);
        let manager = MarketManager::new(
            adaptor.clone(),
            Arc::new(InMemoryMarketplaceStore::new()),
            "WStore",
        );
        (manager, adaptor)
    }

    #[test]
    fn basic_registering_on_market() {
        let (manager, adaptor) = manager(FakeMarketAdaptor::default());

        manager
            .register_on_market("test_market", "http://testmarket.com", "http://currentsite.com")
            .unwrap();

        let markets = manager.get_marketplaces().unwrap();
        assert_eq!(
            markets,
            vec![MarketplaceInfo {
                name: "test_market".to_string(),
                host: "http://testmarket.com/".to_string(),
            }]
        );
        assert_eq!(
            adaptor.calls.lock().unwrap().clone(),
            vec!["add:http://testmarket.com/:WStore:http://currentsite.com"]
        );
    }

    #[test]
    fn adaptor_failure_is_bad_gateway() {
        let (manager, _) = manager(FakeMarketAdaptor::default());

        let err = manager
            .register_on_market("test_market", "http://testmarket.com", FAILING_SITE)
            .unwrap_err();

        assert_eq!(err.to_string(), "Bad Gateway");
        assert!(manager.get_marketplaces().unwrap().is_empty());
    }

    #[test]
    fn registering_existing_name() {
        let (manager, adaptor) = manager(FakeMarketAdaptor::default());
        manager
            .register_on_market("test_market1", "http://examplemarketplace1.com/", "http://currentsite.com")
            .unwrap();

        let err = manager
            .register_on_market("test_market1", "http://testmarket.com", "http://currentsite.com")
            .unwrap_err();

        assert_eq!(err.to_string(), "Marketplace name already in use");
        assert_eq!(adaptor.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn missing_fields_are_rejected() {
        let (manager, _) = manager(FakeMarketAdaptor::default());
        let err = manager
            .register_on_market(" ", "http://testmarket.com", "http://currentsite.com")
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing required field name");
    }

    #[test]
    fn retrieving_markets_keeps_registration_order() {
        let (manager, _) = manager(FakeMarketAdaptor::default());
        for i in 1..=3 {
            manager
                .register_on_market(
                    &format!("test_market{i}"),
                    &format!("http://examplemarketplace{i}.com"),
                    "http://currentsite.com",
                )
                .unwrap();
        }

        let markets = manager.get_marketplaces().unwrap();
        assert_eq!(markets.len(), 3);
        for (i, market) in markets.iter().enumerate() {
            assert_eq!(market.name, format!("test_market{}", i + 1));
            assert_eq!(market.host, format!("http://examplemarketplace{}.com/", i + 1));
        }
    }

    #[test]
    fn basic_unregistering_from_market() {
        let (manager, adaptor) = manager(FakeMarketAdaptor::default());
        manager
            .register_on_market("test_market", "http://testmarket.com", "http://currentsite.com")
            .unwrap();

        manager.unregister_from_market("test_market").unwrap();

        assert!(manager.get_marketplaces().unwrap().is_empty());
        assert_eq!(
            adaptor.calls.lock().unwrap().last().cloned(),
            Some("delete:http://testmarket.com/:WStore".to_string())
        );
    }

    #[test]
    fn unregistering_unknown_market() {
        let (manager, _) = manager(FakeMarketAdaptor::default());

        let err = manager.unregister_from_market("test_market1").unwrap_err();
        assert!(matches!(err, MarketError::NotFound(_)));
    }

    #[test]
    fn failed_removal_keeps_record() {
        let (manager, _) = manager(FakeMarketAdaptor {
            fail_delete: true,
            ..Default::default()
        });
        manager
            .register_on_market("test_market", "http://testmarket.com", "http://currentsite.com")
            .unwrap();

        let err = manager.unregister_from_market("test_market").unwrap_err();
        assert_eq!(err.to_string(), "Bad Gateway");
        assert_eq!(manager.get_marketplaces().unwrap().len(), 1);
    }

    #[test]
    fn failed_record_withdraws_registration() {
        let adaptor = Arc::new(FakeMarketAdaptor::default());
        let manager = MarketManager::new(adaptor.clone(), ReadOnlyMarketplaceStore, "WStore");

        let err = manager
            .register_on_market("test_market", "http://testmarket.com", "http://currentsite.com")
            .unwrap_err();

        assert!(matches!(err, MarketError::Store(_)));
        assert_eq!(
            adaptor.calls.lock().unwrap().clone(),
            vec![
                "add:http://testmarket.com/:WStore:http://currentsite.com",
                "delete:http://testmarket.com/:WStore",
            ]
        );
    }

    #[test]
    fn failed_withdrawal_still_reports_store_error() {
        let adaptor = Arc::new(FakeMarketAdaptor {
            fail_delete: true,
            ..Default::default()
        });
        let manager = MarketManager::new(adaptor.clone(), ReadOnlyMarketplaceStore, "WStore");

        let err = manager
            .register_on_market("test_market", "http://testmarket.com", "http://currentsite.com")
            .unwrap_err();

        assert!(matches!(err, MarketError::Store(_)));
        assert_eq!(adaptor.calls.lock().unwrap().len(), 2);
    }

    fn service(url: &str) -> ServiceInfo {
        ServiceInfo {
            name: "test_offering".to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn publishing_and_withdrawing_a_service() {
        let (manager, adaptor) = manager(FakeMarketAdaptor::default());
        manager
            .register_on_market("test_market", "http://testmarket.com", "http://currentsite.com")
            .unwrap();

        manager
            .add_service("test_market", &service("http://currentsite.com/offering/1"))
            .unwrap();
        manager.delete_service("test_market", "test_offering").unwrap();

        let calls = adaptor.calls.lock().unwrap().clone();
        assert_eq!(
            calls[1..],
            [
                "add_service:http://testmarket.com/:WStore:test_offering:http://currentsite.com/offering/1",
                "delete_service:http://testmarket.com/:WStore:test_offering",
            ]
        );
    }

    #[test]
    fn service_on_unknown_market() {
        let (manager, adaptor) = manager(FakeMarketAdaptor::default());

        let err = manager
            .add_service("test_market", &service("http://currentsite.com/offering/1"))
            .unwrap_err();
        assert!(matches!(err, MarketError::NotFound(_)));

        let err = manager.delete_service("test_market", "test_offering").unwrap_err();
        assert_eq!(err.to_string(), "Marketplace not found: test_market");
        assert!(adaptor.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn service_adaptor_failures_are_bad_gateway() {
        let (manager, _) = manager(FakeMarketAdaptor {
            fail_delete: true,
            ..Default::default()
        });
        manager
            .register_on_market("test_market", "http://testmarket.com", "http://currentsite.com")
            .unwrap();

        let err = manager
            .add_service("test_market", &service(&format!("{FAILING_SITE}/offering/1")))
            .unwrap_err();
        assert_eq!(err.to_string(), "Bad Gateway");

        let err = manager.delete_service("test_market", "test_offering").unwrap_err();
        assert!(matches!(err, MarketError::BadGateway(_)));
    }
}

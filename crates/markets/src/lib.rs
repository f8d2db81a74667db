//! `bae-markets` — registration of this store on external marketplaces.
//!
//! The marketplace HTTP protocol is behind [`MarketAdaptor`]; records of the
//! marketplaces we are registered on live behind [`MarketplaceStore`].

pub mod adaptor;
pub mod error;
pub mod management;
pub mod marketplace;

pub use adaptor::{MarketAdaptor, ServiceInfo, StoreInfo};
pub use error::MarketError;
pub use management::MarketManager;
pub use marketplace::{InMemoryMarketplaceStore, Marketplace, MarketplaceInfo, MarketplaceStore};

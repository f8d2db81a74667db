use thiserror::Error;

use bae_core::DomainError;

/// Marketplace management failure.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("Marketplace name already in use")]
    NameInUse,

    #[error("Marketplace not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    /// The remote marketplace rejected or failed the request.
    #[error("Bad Gateway")]
    BadGateway(#[source] anyhow::Error),

    #[error("marketplace store failure: {0}")]
    Store(#[from] DomainError),
}

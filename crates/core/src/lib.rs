//! `bae-core` — foundation shared by the catalog validators and marketplace glue.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod config;
pub mod error;
pub mod id;

pub use config::Settings;
pub use error::{DomainError, DomainResult};
pub use id::{AssetId, ProviderId};

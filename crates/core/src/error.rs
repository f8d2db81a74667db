//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant carries the user-facing message verbatim; callers surface
/// `to_string()` directly to API clients.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed input (unknown action, missing/invalid pricing fields).
    #[error("{0}")]
    Validation(String),

    /// A product specification is structurally invalid.
    #[error("ProductError: {0}")]
    Product(String),

    /// The caller may not use the referenced resource.
    #[error("{0}")]
    PermissionDenied(String),

    /// The referenced resource is already claimed by another record.
    #[error("ProductError: {0}")]
    Conflict(String),

    /// A requested record was not found.
    #[error("{0}")]
    NotFound(String),

    /// A collaborator (repository, registry) failed.
    #[error("repository failure: {0}")]
    Repository(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn product(msg: impl Into<String>) -> Self {
        Self::Product(msg.into())
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }

    /// Stable machine-readable category, used for logging and status mapping.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "validation_error",
            DomainError::Product(_) => "product_error",
            DomainError::PermissionDenied(_) => "permission_denied",
            DomainError::Conflict(_) => "conflict",
            DomainError::NotFound(_) => "not_found",
            DomainError::Repository(_) => "repository_error",
        }
    }
}

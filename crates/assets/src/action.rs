//! Catalog lifecycle actions.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use bae_core::DomainError;

/// Lifecycle step a catalog element is being validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Attach,
    Update,
    Upgrade,
    Delete,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Create,
        Action::Attach,
        Action::Update,
        Action::Upgrade,
        Action::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Attach => "attach",
            Action::Update => "update",
            Action::Upgrade => "upgrade",
            Action::Delete => "delete",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "The provided action ({s}) is not valid. Allowed values are create, attach, update, upgrade, and delete"
                ))
            })
    }
}

//! Closed vocabularies used by offering prices.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use bae_core::DomainError;

/// How a price component is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceType {
    #[serde(rename = "one time")]
    OneTime,
    #[serde(rename = "recurring")]
    Recurring,
    #[serde(rename = "usage")]
    Usage,
}

impl FromStr for PriceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "one time" => Ok(PriceType::OneTime),
            "recurring" => Ok(PriceType::Recurring),
            "usage" => Ok(PriceType::Usage),
            _ => Err(DomainError::validation(
                "Invalid priceType, it must be one time, recurring, or usage",
            )),
        }
    }
}

/// Billing period of a recurring price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargePeriod {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    Quinquennial,
}

impl FromStr for ChargePeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(ChargePeriod::Daily),
            "weekly" => Ok(ChargePeriod::Weekly),
            "monthly" => Ok(ChargePeriod::Monthly),
            "quarterly" => Ok(ChargePeriod::Quarterly),
            "yearly" => Ok(ChargePeriod::Yearly),
            "quinquennial" => Ok(ChargePeriod::Quinquennial),
            _ => Err(DomainError::validation(format!(
                "Unrecognized recurringChargePeriod: {s}"
            ))),
        }
    }
}

/// ISO 4217 codes accepted in offering prices.
pub const SUPPORTED_CURRENCIES: &[&str] = &[
    "AUD", "BGN", "BRL", "CAD", "CHF", "CLP", "CNY", "COP", "CZK", "DKK", "EUR", "GBP", "HKD",
    "HRK", "HUF", "IDR", "ILS", "INR", "ISK", "JPY", "KRW", "MXN", "MYR", "NOK", "NZD", "PEN",
    "PHP", "PLN", "RON", "RUB", "SEK", "SGD", "THB", "TRY", "USD", "ZAR",
];

/// A supported currency code (always upper case).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyCode(&'static str);

impl CurrencyCode {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl core::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        SUPPORTED_CURRENCIES
            .iter()
            .copied()
            .find(|c| *c == upper)
            .map(CurrencyCode)
            .ok_or_else(|| DomainError::validation(format!("Unrecognized currency: {s}")))
    }
}

//! Product offering validation (pricing model, bundles, product reference).

use tracing::{debug, warn};

use bae_core::{DomainError, DomainResult, ProviderId};

use crate::action::Action;
use crate::offering::{OfferingPrice, ProductOffering};
use crate::ports::ProductCatalog;
use crate::pricing::{ChargePeriod, CurrencyCode, PriceType};

/// Validator for product offerings.
#[derive(Debug)]
pub struct OfferingValidator<C> {
    catalog: C,
}

impl<C> OfferingValidator<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }
}

impl<C> OfferingValidator<C>
where
    C: ProductCatalog,
{
    pub fn validate(
        &self,
        action: &str,
        owner: ProviderId,
        offering: &ProductOffering,
    ) -> DomainResult<()> {
        let parsed = action.parse::<Action>()?;
        debug!(action = %parsed, %owner, offering_id = ?offering.id, "validating product offering");

        let result = match parsed {
            Action::Create => self
                .check_composition(offering)
                .and_then(|()| validate_prices(&offering.product_offering_price)),
            Action::Update | Action::Upgrade => {
                validate_prices(&offering.product_offering_price)
            }
            Action::Attach | Action::Delete => Ok(()),
        };

        if let Err(err) = &result {
            warn!(action = %parsed, error = %err, "product offering rejected");
        }
        result
    }

    fn check_composition(&self, offering: &ProductOffering) -> DomainResult<()> {
        if offering.is_bundle {
            if offering.bundled_product_offering.len() < 2 {
                return Err(DomainError::validation(
                    "Offering bundles must contain at least two bundled offerings",
                ));
            }
            return Ok(());
        }

        if let Some(product) = &offering.product_specification {
            if !self.catalog.exists(&product.id)? {
                return Err(DomainError::validation(
                    "The product specification included in the offering does not exist",
                ));
            }
        }
        Ok(())
    }
}

/// Validate every price component and require a single currency across them.
fn validate_prices(prices: &[OfferingPrice]) -> DomainResult<()> {
    let mut currency: Option<CurrencyCode> = None;

    for price in prices {
        let code = validate_price(price)?;
        match currency {
            Some(existing) if existing != code => {
                return Err(DomainError::validation(
                    "All the price components must use the same currency",
                ));
            }
            _ => currency = Some(code),
        }
    }
    Ok(())
}

fn validate_price(price: &OfferingPrice) -> DomainResult<CurrencyCode> {
    let price_type: PriceType = price
        .price_type
        .as_deref()
        .ok_or_else(|| {
            DomainError::validation("Missing required field priceType in productOfferingPrice")
        })?
        .parse()?;

    match price_type {
        PriceType::Recurring => {
            let period = price.recurring_charge_period.as_deref().ok_or_else(|| {
                DomainError::validation(
                    "Missing required field recurringChargePeriod for recurring priceType",
                )
            })?;
            period.parse::<ChargePeriod>()?;
        }
        PriceType::Usage => {
            if price.unit_of_measure.as_deref().is_none_or(str::is_empty) {
                return Err(DomainError::validation(
                    "Missing required field unitOfMeasure for usage priceType",
                ));
            }
        }
        PriceType::OneTime => {}
    }

    let amount = price.price.as_ref().ok_or_else(|| {
        DomainError::validation("Missing required field price in productOfferingPrice")
    })?;

    amount
        .currency_code
        .as_deref()
        .ok_or_else(|| DomainError::validation("Missing required field currencyCode in price"))?
        .parse()
}

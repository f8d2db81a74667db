//! Product offering input model (TMF catalog JSON).

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::product::ProductRef;

/// A product offering as submitted to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOffering {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub is_bundle: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_specification: Option<ProductRef>,

    #[serde(default)]
    pub bundled_product_offering: Vec<ProductRef>,

    /// Absent or empty for free offerings.
    #[serde(default)]
    pub product_offering_price: Vec<OfferingPrice>,
}

/// One price component of an offering. Every field is optional on input so
/// that missing fields can be reported with a precise message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferingPrice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_charge_period: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_of_measure: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceAmount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAmount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_included_amount: Option<JsonValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duty_free_amount: Option<JsonValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
}

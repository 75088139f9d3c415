//! Priced line item

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::value_objects::round2;
use crate::{PricingError, Result};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub variation_id: i64,
    pub quantity: u32,
    /// Displayed price, derived from `original_price` on every pricing pass.
    #[serde(rename = "price", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub original_price: Decimal,
}

impl LineItem {
    /// New item priced at its original (undiscounted) price.
    pub fn new(variation_id: i64, quantity: u32, original_price: Decimal) -> Self {
        Self { variation_id, quantity, unit_price: original_price, original_price }
    }

    /// Copy of this item carrying `unit_price`; the original price is never touched.
    pub fn with_unit_price(&self, unit_price: Decimal) -> Self {
        Self { unit_price, ..self.clone() }
    }

    pub fn line_total(&self) -> Result<Decimal> { self.extend(self.unit_price) }
    pub fn original_line_total(&self) -> Result<Decimal> { self.extend(self.original_price) }
    pub fn is_discounted(&self) -> bool { self.unit_price < self.original_price }

    fn extend(&self, price: Decimal) -> Result<Decimal> {
        price.checked_mul(Decimal::from(self.quantity))
            .map(round2)
            .ok_or(PricingError::Overflow { variation_id: self.variation_id })
    }
}

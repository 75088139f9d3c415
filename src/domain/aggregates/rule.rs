//! Rule-based price adjustment

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::aggregates::LineItem;
use crate::domain::value_objects::DiscountFraction;
use crate::Result;

/// A named percentage adjustment, scoped to some variations or to the whole list.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRule {
    name: String,
    discount: DiscountFraction,
    variation_ids: Vec<i64>,
}

impl PriceRule {
    pub fn new(name: impl Into<String>, discount: Decimal, variation_ids: Vec<i64>) -> Result<Self> {
        Ok(Self { name: name.into(), discount: DiscountFraction::new(discount)?, variation_ids })
    }

    /// Rule applying to every item.
    pub fn global(name: impl Into<String>, discount: Decimal) -> Result<Self> { Self::new(name, discount, vec![]) }

    pub fn name(&self) -> &str { &self.name }
    pub fn discount(&self) -> DiscountFraction { self.discount }
    pub fn variation_ids(&self) -> &[i64] { &self.variation_ids }

    pub fn applies_to(&self, item: &LineItem) -> bool {
        self.variation_ids.is_empty() || self.variation_ids.contains(&item.variation_id)
    }
}

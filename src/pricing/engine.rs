//! Price adjustment engine.
//!
//! Every pass recomputes `unit_price` from `original_price`, so running the
//! engine twice with the same inputs never compounds a discount.

use rust_decimal::Decimal;

use crate::domain::aggregates::{LineItem, PriceRule};
use crate::domain::value_objects::{round2, DiscountFraction};
use crate::{PricingError, Result};

/// Apply a single discount fraction in `[0, 1)` to every item.
pub fn apply_discount(items: &[LineItem], discount: Decimal) -> Result<Vec<LineItem>> {
    let discount = DiscountFraction::new(discount)?;
    apply_adjustments(items, discount, &[])
}

/// Apply the tier discount stacked with every rule matching each item.
/// Output has the same length and order as `items`.
pub fn apply_adjustments(items: &[LineItem], tier_discount: DiscountFraction, rules: &[PriceRule]) -> Result<Vec<LineItem>> {
    items.iter().map(|item| {
        if item.original_price.is_sign_negative() && !item.original_price.is_zero() {
            return Err(PricingError::InvalidPrice { variation_id: item.variation_id, price: item.original_price });
        }
        let effective = rules.iter()
            .filter(|r| r.applies_to(item))
            .fold(tier_discount, |acc, r| acc.combine(&r.discount()));
        Ok(item.with_unit_price(round2(item.original_price * effective.multiplier())))
    }).collect()
}

//! Price Quote Aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::aggregates::{LineItem, LoyaltyTier};
use crate::domain::value_objects::Points;
use crate::{PricingError, Result};

/// Which tier (if any) priced the quote.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub points: Points,
    pub tier: Option<String>,
    pub discount_percent_label: Option<String>,
}

impl QuoteSummary {
    pub fn new(points: Points, tier: Option<&LoyaltyTier>) -> Self {
        Self {
            points,
            tier: tier.map(|t| t.label.clone()),
            discount_percent_label: tier.map(LoyaltyTier::discount_label),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    items: Vec<LineItem>,
    summary: QuoteSummary,
    #[serde(with = "rust_decimal::serde::float")]
    subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    original_subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    savings: Decimal,
    priced_at: DateTime<Utc>,
}

impl PriceQuote {
    /// Fails with `Overflow` when a line or subtotal leaves the decimal range.
    pub fn new(items: Vec<LineItem>, summary: QuoteSummary) -> Result<Self> {
        let mut quote = Self {
            items, summary,
            subtotal: Decimal::ZERO, original_subtotal: Decimal::ZERO, savings: Decimal::ZERO,
            priced_at: Utc::now(),
        };
        quote.recalculate()?;
        Ok(quote)
    }

    pub fn items(&self) -> &[LineItem] { &self.items }
    pub fn into_items(self) -> Vec<LineItem> { self.items }
    pub fn summary(&self) -> &QuoteSummary { &self.summary }
    pub fn subtotal(&self) -> Decimal { self.subtotal }
    pub fn original_subtotal(&self) -> Decimal { self.original_subtotal }
    pub fn savings(&self) -> Decimal { self.savings }
    pub fn priced_at(&self) -> DateTime<Utc> { self.priced_at }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    fn recalculate(&mut self) -> Result<()> {
        let mut subtotal = Decimal::ZERO;
        let mut original_subtotal = Decimal::ZERO;
        for item in &self.items {
            let overflow = || PricingError::Overflow { variation_id: item.variation_id };
            subtotal = subtotal.checked_add(item.line_total()?).ok_or_else(overflow)?;
            original_subtotal = original_subtotal.checked_add(item.original_line_total()?).ok_or_else(overflow)?;
        }
        self.subtotal = subtotal;
        self.original_subtotal = original_subtotal;
        self.savings = original_subtotal - subtotal;
        Ok(())
    }
}

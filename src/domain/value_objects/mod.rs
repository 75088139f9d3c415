//! Value Objects for pricing

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{PricingError, Result};

/// Round a currency amount to cents, midpoint away from zero.
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Discount fraction value object, always in `[0, 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DiscountFraction(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl DiscountFraction {
    pub const NONE: DiscountFraction = DiscountFraction(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self> {
        if value.is_sign_negative() && !value.is_zero() { return Err(PricingError::InvalidDiscount(value)); }
        if value >= Decimal::ONE { return Err(PricingError::InvalidDiscount(value)); }
        Ok(Self(value.normalize()))
    }

    /// Whole-percent constructor for static configuration (`percent(15)` is 0.15).
    pub fn percent(pct: u32) -> Result<Self> { Self::new(Decimal::new(pct as i64, 2)) }

    pub fn value(&self) -> Decimal { self.0 }
    pub fn is_zero(&self) -> bool { self.0.is_zero() }
    pub fn multiplier(&self) -> Decimal { Decimal::ONE - self.0 }

    /// Stack two discounts: `1 - (1 - a)(1 - b)`.
    pub fn combine(&self, other: &DiscountFraction) -> DiscountFraction {
        DiscountFraction((Decimal::ONE - self.multiplier() * other.multiplier()).normalize())
    }

    pub fn percent_label(&self) -> String { format!("{}%", (self.0 * Decimal::ONE_HUNDRED).normalize()) }
}

impl Default for DiscountFraction { fn default() -> Self { Self::NONE } }

impl fmt::Display for DiscountFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.percent_label()) }
}

/// Loyalty points balance. Negative balances clamp to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Points(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Points {
    pub const ZERO: Points = Points(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        if value.is_sign_negative() { Self::ZERO } else { Self(value) }
    }
    pub fn value(&self) -> Decimal { self.0 }
}

impl Default for Points { fn default() -> Self { Self::ZERO } }

impl From<Decimal> for Points { fn from(value: Decimal) -> Self { Self::new(value) } }

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

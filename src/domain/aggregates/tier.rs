//! Loyalty tier table

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::value_objects::{DiscountFraction, Points};
use crate::{PricingError, Result};

/// One contiguous points range mapped to a fixed discount.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyTier {
    pub level: u8,
    pub label: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub lower_bound: Decimal,
    /// Displayed inclusive upper bound (cent before the next tier); `None` for the top tier.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub upper_bound: Option<Decimal>,
    #[serde(rename = "discountFraction")]
    pub discount: DiscountFraction,
    #[serde(skip)]
    next_lower_bound: Option<Decimal>,
}

impl LoyaltyTier {
    /// Matching is half-open `[lower_bound, next_lower_bound)` so fractional
    /// balances between the displayed `.99` bound and the next tier never fall into a gap.
    pub fn contains(&self, points: Points) -> bool {
        let p = points.value();
        p >= self.lower_bound && self.next_lower_bound.map_or(true, |next| p < next)
    }

    pub fn discount_label(&self) -> String { self.discount.percent_label() }
}

/// Ordered, gap-free tier table. Built once per process and shared.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TierTable { tiers: Vec<LoyaltyTier> }

impl TierTable {
    /// Build a table from `(lower_bound, discount, label)` rows in ascending order.
    /// Each tier ends where the next begins; the last tier is unbounded.
    pub fn new(rows: Vec<(Decimal, DiscountFraction, String)>) -> Result<Self> {
        if rows.is_empty() { return Err(PricingError::InvalidTierTable("no tiers".into())); }
        if u8::try_from(rows.len()).is_err() {
            return Err(PricingError::InvalidTierTable(format!("{} tiers, at most {} supported", rows.len(), u8::MAX)));
        }
        if rows[0].0.is_sign_negative() && !rows[0].0.is_zero() {
            return Err(PricingError::InvalidTierTable(format!("negative lower bound {}", rows[0].0)));
        }
        for pair in rows.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(PricingError::InvalidTierTable(format!("bounds not ascending: {} then {}", pair[0].0, pair[1].0)));
            }
        }
        if rows.iter().any(|(_, d, _)| d.is_zero()) {
            return Err(PricingError::InvalidTierTable("tier with zero discount".into()));
        }

        let cent = Decimal::new(1, 2);
        let next_bounds: Vec<Option<Decimal>> = rows.iter().skip(1).map(|r| Some(r.0)).chain(std::iter::once(None)).collect();
        let tiers = rows.into_iter().zip(next_bounds).enumerate()
            .map(|(i, ((lower_bound, discount, label), next))| LoyaltyTier {
                level: u8::try_from(i + 1).unwrap_or(u8::MAX),
                label,
                lower_bound,
                upper_bound: next.map(|n| n - cent),
                discount,
                next_lower_bound: next,
            })
            .collect();
        Ok(Self { tiers })
    }

    /// The storefront table: 150 / 750 / 1500 / 3000 points at 5 / 10 / 15 / 30 percent.
    pub fn standard() -> Self {
        let row = |lower: i64, pct: u32, label: &str| {
            (Decimal::from(lower), DiscountFraction::percent(pct).unwrap_or_default(), label.to_string())
        };
        let rows = vec![row(150, 5, "Level 1"), row(750, 10, "Level 2"), row(1500, 15, "Level 3"), row(3000, 30, "Level 4")];
        // Constant rows, validated by test_standard_table_is_valid.
        Self::new(rows).unwrap_or(Self { tiers: vec![] })
    }

    /// First tier (ascending) containing `points`, or `None` below the lowest tier.
    pub fn resolve(&self, points: Points) -> Option<&LoyaltyTier> {
        self.tiers.iter().find(|t| t.contains(points))
    }

    /// Discount for `points`, zero when no tier matches.
    pub fn discount_for(&self, points: Points) -> DiscountFraction {
        self.resolve(points).map(|t| t.discount).unwrap_or_default()
    }

    pub fn tiers(&self) -> &[LoyaltyTier] { &self.tiers }
    pub fn len(&self) -> usize { self.tiers.len() }
    pub fn is_empty(&self) -> bool { self.tiers.is_empty() }
}

impl Default for TierTable { fn default() -> Self { Self::standard() } }

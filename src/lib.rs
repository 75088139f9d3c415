//! OpenSASE Pricing
//!
//! Loyalty-aware price adjustment for the storefront and back office.
//!
//! ## Features
//! - Single shared loyalty tier table (points → discount tier)
//! - Price adjustment engine that always recomputes from the original price
//! - Rule-based adjustments stacked on top of the tier discount
//! - Customer profile lookup that degrades to "no discount" on failure
//! - Thin JSON API for quotes and the tier table

pub mod api;
pub mod config;
pub mod domain;
pub mod pricing;
pub mod profiles;

use rust_decimal::Decimal;
use thiserror::Error;

pub use config::Config;
pub use domain::aggregates::{LineItem, LoyaltyTier, PriceQuote, PriceRule, QuoteSummary, TierTable};
pub use domain::value_objects::{DiscountFraction, Points};
pub use pricing::{apply_adjustments, apply_discount, PricingService, QuoteRequest};
pub use profiles::{InMemoryProfileLookup, PgProfileLookup, ProfileLookup};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("Invalid discount fraction {0}, expected a value in [0, 1)")]
    InvalidDiscount(Decimal),

    #[error("Invalid price {price} for variation {variation_id}")]
    InvalidPrice { variation_id: i64, price: Decimal },

    #[error("Amount overflow pricing variation {variation_id}")]
    Overflow { variation_id: i64 },

    #[error("Invalid tier table: {0}")]
    InvalidTierTable(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

pub type Result<T> = std::result::Result<T, PricingError>;

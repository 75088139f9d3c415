//! Aggregates module
pub mod line_item;
pub mod quote;
pub mod rule;
pub mod tier;

pub use line_item::LineItem;
pub use quote::{PriceQuote, QuoteSummary};
pub use rule::PriceRule;
pub use tier::{LoyaltyTier, TierTable};

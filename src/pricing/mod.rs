//! Pricing core: the adjustment engine and the quote orchestration around it.
pub mod engine;
pub mod service;

pub use engine::{apply_adjustments, apply_discount};
pub use service::{PricingService, QuoteRequest};

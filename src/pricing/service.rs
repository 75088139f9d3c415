//! Quote orchestration: points → tier → adjusted items.

use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::domain::aggregates::{LineItem, PriceQuote, PriceRule, QuoteSummary, TierTable};
use crate::domain::value_objects::Points;
use crate::pricing::engine::apply_adjustments;
use crate::profiles::ProfileLookup;
use crate::Result;

/// Everything needed to price one request.
#[derive(Clone, Debug, Default)]
pub struct QuoteRequest {
    pub user_id: Option<Uuid>,
    /// Explicit balance; takes precedence over `user_id`.
    pub points: Option<Decimal>,
    pub items: Vec<LineItem>,
    pub rules: Vec<PriceRule>,
}

#[derive(Clone)]
pub struct PricingService {
    tiers: Arc<TierTable>,
    profiles: Arc<dyn ProfileLookup>,
    lookup_timeout: Duration,
}

impl PricingService {
    pub fn new(tiers: Arc<TierTable>, profiles: Arc<dyn ProfileLookup>, lookup_timeout: Duration) -> Self {
        Self { tiers, profiles, lookup_timeout }
    }

    pub fn tiers(&self) -> &TierTable { &self.tiers }

    /// Price `request.items`. Profile problems degrade to zero points; only
    /// invalid price or rule data fails.
    #[instrument(skip(self, request), fields(user_id = ?request.user_id, items = request.items.len()))]
    pub async fn quote(&self, request: QuoteRequest) -> Result<PriceQuote> {
        let points = match (request.points, request.user_id) {
            (Some(points), _) => Points::new(points),
            (None, Some(user_id)) => self.points_for(user_id).await,
            (None, None) => Points::ZERO,
        };
        let tier = self.tiers.resolve(points);
        let discount = tier.map(|t| t.discount).unwrap_or_default();
        let items = apply_adjustments(&request.items, discount, &request.rules)?;
        tracing::debug!(%points, tier = tier.map(|t| t.level), %discount, "Quote priced");
        PriceQuote::new(items, QuoteSummary::new(points, tier))
    }

    /// Point balance for `user_id`, zero when the profile is missing, unreadable or slow.
    pub async fn points_for(&self, user_id: Uuid) -> Points {
        match tokio::time::timeout(self.lookup_timeout, self.profiles.points_for(user_id)).await {
            Ok(Ok(Some(points))) => Points::new(points),
            Ok(Ok(None)) => Points::ZERO,
            Ok(Err(e)) => {
                warn!(%user_id, error = %e, "Profile lookup failed, pricing without loyalty discount");
                Points::ZERO
            }
            Err(_) => {
                warn!(%user_id, timeout_ms = self.lookup_timeout.as_millis() as u64, "Profile lookup timed out, pricing without loyalty discount");
                Points::ZERO
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::InMemoryProfileLookup;
    use crate::PricingError;
    use async_trait::async_trait;

    struct FailingLookup;

    #[async_trait]
    impl ProfileLookup for FailingLookup {
        async fn points_for(&self, _user_id: Uuid) -> Result<Option<Decimal>> {
            Err(PricingError::StorageError("connection refused".into()))
        }
    }

    struct SlowLookup;

    #[async_trait]
    impl ProfileLookup for SlowLookup {
        async fn points_for(&self, _user_id: Uuid) -> Result<Option<Decimal>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Some(Decimal::from(5000)))
        }
    }

    fn service(profiles: Arc<dyn ProfileLookup>) -> PricingService {
        PricingService::new(Arc::new(TierTable::standard()), profiles, Duration::from_millis(50))
    }

    fn cart() -> Vec<LineItem> { vec![LineItem::new(1, 2, Decimal::new(10000, 2))] }

    #[tokio::test]
    async fn test_level_three_quote() {
        let svc = service(Arc::new(InMemoryProfileLookup::new()));
        let quote = svc.quote(QuoteRequest { points: Some(Decimal::from(2000)), items: cart(), ..Default::default() }).await.unwrap();
        assert_eq!(quote.summary().tier.as_deref(), Some("Level 3"));
        assert_eq!(quote.summary().discount_percent_label.as_deref(), Some("15%"));
        assert_eq!(quote.items()[0].unit_price, Decimal::new(8500, 2));
        assert_eq!(quote.items()[0].original_price, Decimal::new(10000, 2));
        assert_eq!(quote.items()[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_zero_points_no_tier() {
        let svc = service(Arc::new(InMemoryProfileLookup::new()));
        let quote = svc.quote(QuoteRequest { points: Some(Decimal::ZERO), items: cart(), ..Default::default() }).await.unwrap();
        assert_eq!(quote.summary().tier, None);
        assert_eq!(quote.items()[0].unit_price, quote.items()[0].original_price);
        assert_eq!(quote.savings(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_points_resolved_from_profile() {
        let user = Uuid::new_v4();
        let svc = service(Arc::new(InMemoryProfileLookup::new().with_points(user, Decimal::from(800))));
        let quote = svc.quote(QuoteRequest { user_id: Some(user), items: cart(), ..Default::default() }).await.unwrap();
        assert_eq!(quote.summary().tier.as_deref(), Some("Level 2"));
        assert_eq!(quote.items()[0].unit_price, Decimal::new(9000, 2));
    }

    #[tokio::test]
    async fn test_missing_profile_degrades() {
        let svc = service(Arc::new(InMemoryProfileLookup::new()));
        let quote = svc.quote(QuoteRequest { user_id: Some(Uuid::new_v4()), items: cart(), ..Default::default() }).await.unwrap();
        assert_eq!(quote.summary().points, Points::ZERO);
        assert_eq!(quote.items()[0].unit_price, Decimal::new(10000, 2));
    }

    #[tokio::test]
    async fn test_failing_lookup_degrades() {
        let svc = service(Arc::new(FailingLookup));
        let quote = svc.quote(QuoteRequest { user_id: Some(Uuid::new_v4()), items: cart(), ..Default::default() }).await.unwrap();
        assert_eq!(quote.summary().tier, None);
        assert_eq!(quote.items()[0].unit_price, Decimal::new(10000, 2));
    }

    #[tokio::test]
    async fn test_slow_lookup_degrades() {
        let svc = service(Arc::new(SlowLookup));
        assert_eq!(svc.points_for(Uuid::new_v4()).await, Points::ZERO);
    }

    #[tokio::test]
    async fn test_negative_points_clamped() {
        let svc = service(Arc::new(InMemoryProfileLookup::new()));
        let quote = svc.quote(QuoteRequest { points: Some(Decimal::from(-300)), items: cart(), ..Default::default() }).await.unwrap();
        assert_eq!(quote.summary().points, Points::ZERO);
    }

    #[tokio::test]
    async fn test_invalid_price_fails_request() {
        let svc = service(Arc::new(InMemoryProfileLookup::new()));
        let items = vec![LineItem::new(4, 1, Decimal::new(-100, 2))];
        let err = svc.quote(QuoteRequest { points: Some(Decimal::from(2000)), items, ..Default::default() }).await.unwrap_err();
        assert!(matches!(err, PricingError::InvalidPrice { variation_id: 4, .. }));
    }

    #[tokio::test]
    async fn test_oversized_line_fails_request() {
        let svc = service(Arc::new(InMemoryProfileLookup::new()));
        let items = vec![LineItem::new(1, 4_000_000_000, Decimal::from(u64::MAX) * Decimal::from(1_000_000))];
        let err = svc.quote(QuoteRequest { points: Some(Decimal::ZERO), items, ..Default::default() }).await.unwrap_err();
        assert_eq!(err, PricingError::Overflow { variation_id: 1 });
    }
}

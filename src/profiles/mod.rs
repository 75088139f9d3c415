//! Customer profile lookup: where loyalty point balances come from.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{PricingError, Result};

/// Source of accumulated loyalty points for a user.
///
/// `Ok(None)` means the user has no profile; callers treat that as zero points.
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    async fn points_for(&self, user_id: Uuid) -> Result<Option<Decimal>>;
}

/// Postgres-backed lookup against the `customer_profiles` table.
#[derive(Clone)]
pub struct PgProfileLookup { db: PgPool }

impl PgProfileLookup {
    pub fn new(db: PgPool) -> Self { Self { db } }
}

#[async_trait]
impl ProfileLookup for PgProfileLookup {
    async fn points_for(&self, user_id: Uuid) -> Result<Option<Decimal>> {
        let row = sqlx::query_scalar::<_, Option<Decimal>>("SELECT points::numeric FROM customer_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| PricingError::StorageError(e.to_string()))?;
        Ok(row.flatten())
    }
}

/// Fixed point balances, used when no database is configured.
#[derive(Clone, Debug, Default)]
pub struct InMemoryProfileLookup { points: HashMap<Uuid, Decimal> }

impl InMemoryProfileLookup {
    pub fn new() -> Self { Self::default() }

    pub fn with_points(mut self, user_id: Uuid, points: Decimal) -> Self {
        self.points.insert(user_id, points);
        self
    }
}

#[async_trait]
impl ProfileLookup for InMemoryProfileLookup {
    async fn points_for(&self, user_id: Uuid) -> Result<Option<Decimal>> {
        Ok(self.points.get(&user_id).copied())
    }
}

//! OpenSASE Pricing - loyalty tier pricing service

use anyhow::{Context, Result};
use opensase_pricing::api::{self, AppState};
use opensase_pricing::{Config, InMemoryProfileLookup, PgProfileLookup, PricingService, ProfileLookup, TierTable};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();
    let config = Config::from_env()?;

    let profiles: Arc<dyn ProfileLookup> = match &config.database_url {
        Some(url) => {
            let db = PgPoolOptions::new().max_connections(config.database_max_connections).connect(url).await.context("connecting to DATABASE_URL")?;
            Arc::new(PgProfileLookup::new(db))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, every customer prices at zero loyalty points");
            Arc::new(InMemoryProfileLookup::new())
        }
    };

    let tiers = Arc::new(TierTable::standard());
    anyhow::ensure!(!tiers.is_empty(), "loyalty tier table failed validation");
    for t in tiers.tiers() {
        tracing::info!(level = t.level, lower_bound = %t.lower_bound, discount = %t.discount, "Loyalty tier loaded");
    }
    let pricing = PricingService::new(tiers, profiles, config.profile_lookup_timeout);
    let app = api::router(AppState { pricing });

    tracing::info!("🚀 OpenSASE Pricing listening on 0.0.0.0:{}", config.port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?, app).await?;
    Ok(())
}

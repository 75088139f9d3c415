//! JSON API: quote pricing and the tier table.

use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;
use validator::Validate;

use crate::domain::aggregates::{LineItem, PriceQuote, PriceRule, TierTable};
use crate::pricing::{PricingService, QuoteRequest};
use crate::PricingError;

#[derive(Clone)] pub struct AppState { pub pricing: PricingService }

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "opensase-pricing"})) }))
        .route("/api/v1/pricing/tiers", get(list_tiers))
        .route("/api/v1/pricing/quote", post(quote))
        .layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()).with_state(state)
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBody {
    pub user_id: Option<Uuid>,
    pub points: Option<Decimal>,
    #[validate(length(max = 500))]
    pub items: Vec<QuoteItemBody>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub rules: Vec<PriceRuleBody>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItemBody { pub variation_id: i64, pub quantity: u32, pub price: Decimal, pub original_price: Option<Decimal> }

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRuleBody { pub name: String, pub discount: Decimal, #[serde(default)] pub variation_ids: Vec<i64> }

impl QuoteBody {
    fn into_request(self) -> Result<QuoteRequest, PricingError> {
        let items = self.items.into_iter()
            .map(|i| LineItem::new(i.variation_id, i.quantity, i.original_price.unwrap_or(i.price)))
            .collect();
        let rules = self.rules.into_iter()
            .map(|r| PriceRule::new(r.name, r.discount, r.variation_ids))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(QuoteRequest { user_id: self.user_id, points: self.points, items, rules })
    }
}

fn pricing_error(e: PricingError) -> (StatusCode, String) {
    match e {
        PricingError::InvalidDiscount(_) | PricingError::InvalidPrice { .. } | PricingError::Overflow { .. } => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        PricingError::InvalidTierTable(_) | PricingError::StorageError(_) => {
            tracing::error!(error = %e, "Pricing failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

async fn list_tiers(State(s): State<AppState>) -> Json<TierTable> {
    Json(s.pricing.tiers().clone())
}

async fn quote(State(s): State<AppState>, Json(r): Json<QuoteBody>) -> Result<Json<PriceQuote>, (StatusCode, String)> {
    r.validate().map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    let request = r.into_request().map_err(pricing_error)?;
    let quote = s.pricing.quote(request).await.map_err(pricing_error)?;
    Ok(Json(quote))
}

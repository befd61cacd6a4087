use std::sync::Arc;

use agrione_core::ActionState;
use agrione_domain::{CommodityPrices, MarketPriceRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::context::AppContext;
use crate::error::ApiResult;

/// Mandi prices for one market; sample prices when Fasal is not configured.
async fn market_prices(
    State(context): State<Arc<AppContext>>,
    payload: Result<Json<MarketPriceRequest>, JsonRejection>,
) -> ApiResult<Json<ActionState<CommodityPrices>>> {
    let Json(request) = payload?;
    Ok(Json(context.actions.get_commodity_prices(&request).await))
}

pub fn router() -> Router<Arc<AppContext>> {
    Router::new().route("/market-prices", post(market_prices))
}

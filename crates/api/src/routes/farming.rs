use std::sync::Arc;

use agrione_core::ActionState;
use agrione_domain::{FarmingPlan, FarmingPlanRequest, TranslatePlanRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::context::AppContext;
use crate::error::ApiResult;

async fn farming_plan(
    State(context): State<Arc<AppContext>>,
    payload: Result<Json<FarmingPlanRequest>, JsonRejection>,
) -> ApiResult<Json<ActionState<FarmingPlan>>> {
    let Json(request) = payload?;
    Ok(Json(context.actions.get_farming_plan(&request).await))
}

async fn translate_plan(
    State(context): State<Arc<AppContext>>,
    payload: Result<Json<TranslatePlanRequest>, JsonRejection>,
) -> ApiResult<Json<ActionState<FarmingPlan>>> {
    let Json(request) = payload?;
    Ok(Json(context.actions.get_translated_plan(&request).await))
}

pub fn router() -> Router<Arc<AppContext>> {
    Router::new()
        .route("/farming-plans", post(farming_plan))
        .route("/farming-plans/translate", post(translate_plan))
}

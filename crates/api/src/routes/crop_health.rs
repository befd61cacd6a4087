use std::sync::Arc;

use agrione_core::ActionState;
use agrione_domain::{CropHealthReport, CropHealthRequest, TranslateReportRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::context::AppContext;
use crate::error::ApiResult;

async fn crop_health_report(
    State(context): State<Arc<AppContext>>,
    payload: Result<Json<CropHealthRequest>, JsonRejection>,
) -> ApiResult<Json<ActionState<CropHealthReport>>> {
    let Json(request) = payload?;
    Ok(Json(context.actions.get_crop_health_report(&request).await))
}

async fn translate_report(
    State(context): State<Arc<AppContext>>,
    payload: Result<Json<TranslateReportRequest>, JsonRejection>,
) -> ApiResult<Json<ActionState<CropHealthReport>>> {
    let Json(request) = payload?;
    Ok(Json(context.actions.get_translated_report(&request).await))
}

pub fn router() -> Router<Arc<AppContext>> {
    Router::new()
        .route("/crop-health", post(crop_health_report))
        .route("/crop-health/translate", post(translate_report))
}

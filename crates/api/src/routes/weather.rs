use std::sync::Arc;

use agrione_core::ActionState;
use agrione_domain::{TranslateAlertsRequest, WeatherAlerts, WeatherAlertsRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::context::AppContext;
use crate::error::ApiResult;

/// Current conditions plus pest alerts for a location and crop.
async fn weather_alerts(
    State(context): State<Arc<AppContext>>,
    payload: Result<Json<WeatherAlertsRequest>, JsonRejection>,
) -> ApiResult<Json<ActionState<WeatherAlerts>>> {
    let Json(request) = payload?;
    Ok(Json(context.actions.get_weather_alerts(&request).await))
}

async fn translate_alerts(
    State(context): State<Arc<AppContext>>,
    payload: Result<Json<TranslateAlertsRequest>, JsonRejection>,
) -> ApiResult<Json<ActionState<Vec<String>>>> {
    let Json(request) = payload?;
    Ok(Json(context.actions.get_translated_alerts(&request).await))
}

pub fn router() -> Router<Arc<AppContext>> {
    Router::new()
        .route("/weather-alerts", post(weather_alerts))
        .route("/weather-alerts/translate", post(translate_alerts))
}

use std::sync::Arc;

use agrione_domain::ProviderMode;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::context::AppContext;
use crate::utils::health::HealthStatus;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    mode: ProviderMode,
    #[serde(flatten)]
    health: HealthStatus,
}

/// Liveness plus the provider mode and per-provider credential state.
///
/// Always `200`: a degraded provider still serves fallback data.
async fn health(State(context): State<Arc<AppContext>>) -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok", mode: context.mode(), health: context.health_check() })
}

pub fn router() -> Router<Arc<AppContext>> {
    Router::new().route("/health", get(health))
}

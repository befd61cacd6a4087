//! HTTP routes
//!
//! One module per dashboard feature, each exposing a `router()` merged
//! under `/api`.

mod assistant;
mod crop_health;
mod farming;
mod health;
mod market;
mod weather;

use std::sync::Arc;

use axum::{middleware, Router};

use crate::context::AppContext;
use crate::utils::request_id::trace_request;

pub fn app_router(context: Arc<AppContext>) -> Router {
    let api = Router::new()
        .merge(crop_health::router())
        .merge(weather::router())
        .merge(farming::router())
        .merge(market::router())
        .merge(assistant::router());

    Router::new()
        .merge(health::router())
        .nest("/api", api)
        .layer(middleware::from_fn(trace_request))
        .with_state(context)
}

//! Request-level failures
//!
//! Action failures are not errors here: they travel inside the
//! `ActionState` body with a `200`. Only requests the router cannot hand to
//! an action end up as an `ApiError`.

use agrione_core::ActionState;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidBody(rejection) => rejection.status(),
        };
        tracing::debug!(status = status.as_u16(), error = %self, "Rejected request body");
        // Same shape as an action failure so the dashboard has one error path
        (status, Json(ActionState::<()>::failure(self.to_string()))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

//! Chat and read-aloud routes

use std::sync::Arc;

use agrione_core::ActionState;
use agrione_domain::{AudioClip, ChatRequest, ChatResponse, SpeechRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::context::AppContext;
use crate::error::ApiResult;

async fn audio(
    State(context): State<Arc<AppContext>>,
    payload: Result<Json<SpeechRequest>, JsonRejection>,
) -> ApiResult<Json<ActionState<AudioClip>>> {
    let Json(request) = payload?;
    Ok(Json(context.actions.get_audio_for_text(&request).await))
}

async fn chat(
    State(context): State<Arc<AppContext>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ActionState<ChatResponse>>> {
    let Json(request) = payload?;
    Ok(Json(context.actions.get_text_response(&request).await))
}

pub fn router() -> Router<Arc<AppContext>> {
    Router::new().route("/audio", post(audio)).route("/chat", post(chat))
}

//! Intent REST API Routes
//!
//! `POST /intent` hands the envelope to the [`IntentDispatcher`]. Any
//! well-formed intent gets HTTP 200; success or failure is carried in the
//! body.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use protoai_core::{Intent, IntentResponse};

use crate::{services::IntentDispatcher, state::AppState};

/// POST /intent - Dispatch an intent
#[utoipa::path(
    post,
    path = "/intent",
    tag = "Intents",
    request_body = Intent,
    responses(
        (status = 200, description = "Dispatch outcome", body = IntentResponse),
        (status = 400, description = "Malformed request body"),
        (status = 422, description = "Request body does not match the intent schema"),
    ),
)]
pub async fn dispatch_intent(
    State(dispatcher): State<Arc<IntentDispatcher>>,
    Json(intent): Json<Intent>,
) -> Json<IntentResponse> {
    Json(dispatcher.dispatch(&intent).await)
}

pub fn create_router() -> Router<AppState> {
    Router::new().route("/intent", post(dispatch_intent))
}

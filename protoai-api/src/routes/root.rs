//! Root route

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::constants::WELCOME_MESSAGE;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
}

/// GET / - Welcome message
#[utoipa::path(
    get,
    path = "/",
    tag = "Discovery",
    responses(
        (status = 200, description = "Service is up", body = WelcomeResponse),
    ),
)]
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

pub fn create_router() -> Router<AppState> {
    Router::new().route("/", get(welcome))
}

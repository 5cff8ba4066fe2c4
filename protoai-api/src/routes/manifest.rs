//! Manifest descriptor route
//!
//! Serves the deployment's manifest document unchanged on every request.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use protoai_core::Manifest;

use crate::constants::MANIFEST_ROUTE;
use crate::state::AppState;

/// GET /protoai/readme.protobuf - Manifest descriptor
#[utoipa::path(
    get,
    path = "/protoai/readme.protobuf",
    tag = "Discovery",
    responses(
        (status = 200, description = "Manifest descriptor", body = Manifest),
    ),
)]
pub async fn get_manifest(State(manifest): State<Arc<Manifest>>) -> Json<Manifest> {
    Json(manifest.as_ref().clone())
}

pub fn create_router() -> Router<AppState> {
    Router::new().route(MANIFEST_ROUTE, get(get_manifest))
}

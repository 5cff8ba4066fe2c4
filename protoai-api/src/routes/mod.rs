//! REST API Routes Module
//!
//! Includes:
//! - Discovery routes (`/`, `/search`, `/protoai/readme.protobuf`)
//! - Intent dispatch (`/intent`)
//! - Health check endpoints (Kubernetes-compatible)
//! - Prometheus metrics and the OpenAPI document
//! - CORS support for browser-based clients

pub mod health;
pub mod intent;
pub mod manifest;
pub mod root;
pub mod search;

use std::time::Duration;

use axum::{
    http::{header, request::Parts, HeaderValue, Method},
    middleware::from_fn,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::openapi::ApiDoc;
use crate::state::AppState;
use crate::telemetry::{metrics_handler, observability_middleware, TelemetryConfig};

pub use health::create_router as health_router;
pub use intent::create_router as intent_router;
pub use manifest::create_router as manifest_router;
pub use root::create_router as root_router;
pub use search::create_router as search_router;

// ============================================================================
// OPENAPI ENDPOINT
// ============================================================================

/// Handler for /openapi.json endpoint.
///
/// With the swagger-ui feature the Swagger router serves this path instead.
#[cfg(not(feature = "swagger-ui"))]
async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

// ============================================================================
// CORS LAYER
// ============================================================================

/// Build the CORS layer from ApiConfig.
///
/// Empty origins allow everything; otherwise only origins accepted by
/// [`ApiConfig::is_origin_allowed`], including `*.domain` wildcards.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any)
    } else {
        tracing::info!(
            "CORS: Production mode - allowing origins: {:?}",
            config.cors_origins
        );
        let allowed = config.clone();
        let origins = AllowOrigin::predicate(move |origin: &HeaderValue, _parts: &Parts| {
            origin
                .to_str()
                .map(|o| allowed.is_origin_allowed(o))
                .unwrap_or(false)
        });

        if config.cors_allow_credentials {
            cors.allow_origin(origins).allow_credentials(true)
        } else {
            cors.allow_origin(origins)
        }
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the complete API router.
///
/// - Discovery routes at `/`, `/search` and `/protoai/readme.protobuf`
/// - Intent dispatch at `/intent`
/// - Health checks at `/health/*`
/// - Metrics at `/metrics` (unless disabled)
/// - OpenAPI spec at `/openapi.json`
/// - Swagger UI at `/swagger-ui` (when the swagger-ui feature is enabled)
///
/// In production the API configuration is validated first.
pub fn create_api_router(
    state: AppState,
    api_config: &ApiConfig,
    telemetry: &TelemetryConfig,
) -> ApiResult<Router> {
    api_config.validate_for_production()?;

    let mut router = Router::new()
        .merge(root::create_router())
        .merge(search::create_router())
        .merge(manifest::create_router())
        .merge(intent::create_router())
        .nest("/health", health::create_router());

    if telemetry.metrics_enabled {
        router = router.route("/metrics", get(metrics_handler));
    }

    let router: Router = router.with_state(state);

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa_swagger_ui::SwaggerUi;
        router.merge(SwaggerUi::new("/swagger-ui").url("/openapi.json", ApiDoc::openapi()))
    };

    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route("/openapi.json", get(openapi_json));

    // Execution order: CORS -> Observability -> Trace -> Handler
    Ok(router
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(observability_middleware))
        .layer(build_cors_layer(api_config)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn allow_origin_header(config: &ApiConfig, origin: &str) -> Result<Option<String>, String> {
        let app: Router = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(build_cors_layer(config));
        let request = Request::builder()
            .uri("/")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .map_err(|e| e.to_string())?;
        let response = app.oneshot(request).await.map_err(|e| e.to_string())?;
        assert_eq!(response.status(), StatusCode::OK);
        Ok(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string))
    }

    #[tokio::test]
    async fn test_cors_honours_wildcard_subdomains() -> Result<(), String> {
        let config = ApiConfig {
            cors_origins: vec!["https://protoai.dev".to_string(), "*.protoai.dev".to_string()],
            ..Default::default()
        };

        assert_eq!(
            allow_origin_header(&config, "https://protoai.dev").await?.as_deref(),
            Some("https://protoai.dev")
        );
        assert_eq!(
            allow_origin_header(&config, "https://app.protoai.dev").await?.as_deref(),
            Some("https://app.protoai.dev")
        );
        assert_eq!(allow_origin_header(&config, "https://evil.com").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_cors_open_in_development() -> Result<(), String> {
        assert_eq!(
            allow_origin_header(&ApiConfig::default(), "http://localhost:3000")
                .await?
                .as_deref(),
            Some("*")
        );
        Ok(())
    }

    #[test]
    fn test_cors_layer_builds_for_both_modes() {
        let _ = build_cors_layer(&ApiConfig::default());

        let config = ApiConfig {
            cors_origins: vec!["https://protoai.dev".to_string()],
            cors_allow_credentials: true,
            ..Default::default()
        };
        let _ = build_cors_layer(&config);
    }
}

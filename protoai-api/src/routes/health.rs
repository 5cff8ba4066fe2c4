//! Health Check Endpoints
//!
//! Kubernetes-compatible health checks:
//! - /health/ping - Simple liveness check
//! - /health/ready - Catalog readability check
//! - /health/live - Process alive check

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::{AppState, SharedCatalog};

// ============================================================================
// TYPES
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthDetails {
    pub catalog: ComponentHealth,
    pub version: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    /// Catalog source that was checked
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /health/ping - Simple pong response
#[utoipa::path(
    get,
    path = "/health/ping",
    tag = "Health",
    responses(
        (status = 200, description = "Service is responding", body = String),
    ),
)]
pub async fn ping() -> impl IntoResponse {
    (StatusCode::OK, "pong")
}

/// GET /health/live - Process liveness check
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Process is alive", body = HealthResponse),
    ),
)]
pub async fn liveness() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        message: Some("Process is alive".to_string()),
        details: None,
    };
    (StatusCode::OK, Json(response))
}

/// GET /health/ready - Readiness check (catalog readable)
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = HealthResponse),
        (status = 503, description = "Service is not ready", body = HealthResponse),
    ),
)]
pub async fn readiness(
    State(catalog): State<SharedCatalog>,
    State(start_time): State<Instant>,
) -> impl IntoResponse {
    let catalog_health = check_catalog(catalog).await;
    let overall_status = catalog_health.status;

    let response = HealthResponse {
        status: overall_status,
        message: None,
        details: Some(HealthDetails {
            catalog: catalog_health,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: start_time.elapsed().as_secs(),
        }),
    };

    let status_code = if overall_status == HealthStatus::Healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

async fn check_catalog(catalog: SharedCatalog) -> ComponentHealth {
    let source = catalog.source_name();
    let start = Instant::now();

    let listed = tokio::task::spawn_blocking(move || catalog.list())
        .await
        .map_err(|e| format!("Catalog check task failed: {}", e))
        .and_then(|result| result.map_err(|e| e.to_string()));

    match listed {
        Ok(records) => ComponentHealth {
            status: HealthStatus::Healthy,
            source,
            records: Some(records.len()),
            latency_ms: Some(start.elapsed().as_millis() as u64),
            error: None,
        },
        Err(error) => {
            tracing::warn!(source = %source, error = %error, "Catalog readiness check failed");
            ComponentHealth {
                status: HealthStatus::Unhealthy,
                source,
                records: None,
                latency_ms: None,
                error: Some(error),
            }
        }
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create health check router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
}

#[cfg(test)]
mod tests {
    use super::*;
    use protoai_core::{CatalogError, CatalogRepository, CatalogResult, InMemoryCatalog, ServiceRecord};
    use std::sync::Arc;

    struct MissingCatalog;

    impl CatalogRepository for MissingCatalog {
        fn source_name(&self) -> String {
            "missing.csv".to_string()
        }

        fn list(&self) -> CatalogResult<Vec<ServiceRecord>> {
            Err(CatalogError::NotFound {
                source_name: self.source_name(),
            })
        }
    }

    #[test]
    fn test_health_response_serialization() -> Result<(), serde_json::Error> {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            message: Some("All systems operational".to_string()),
            details: None,
        };

        let json = serde_json::to_string(&response)?;
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(!json.contains("details"));
        Ok(())
    }

    #[tokio::test]
    async fn test_check_catalog_healthy() {
        let catalog: SharedCatalog = Arc::new(InMemoryCatalog::new(vec![
            ServiceRecord::named("a"),
            ServiceRecord::named("b"),
        ]));
        let health = check_catalog(catalog).await;
        assert_eq!(health.status, HealthStatus::Healthy);
        assert_eq!(health.records, Some(2));
        assert_eq!(health.source, "memory");
    }

    #[tokio::test]
    async fn test_check_catalog_missing() {
        let health = check_catalog(Arc::new(MissingCatalog)).await;
        assert_eq!(health.status, HealthStatus::Unhealthy);
        assert!(health.records.is_none());
        assert_eq!(
            health.error.as_deref(),
            Some("Catalog source not found: missing.csv")
        );
    }
}

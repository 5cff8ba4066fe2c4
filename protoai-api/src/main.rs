//! ProtoAi API Server Entry Point
//!
//! Bootstraps telemetry and configuration, assembles the application
//! state and serves the Axum router until interrupted.

use std::net::SocketAddr;

use axum::Router;
use protoai_api::constants::{DEFAULT_BIND_HOST, DEFAULT_PORT};
use protoai_api::telemetry::{init_tracing, TelemetryConfig};
use protoai_api::{create_api_router, ApiConfig, ApiError, ApiResult, AppState, DiscoveryConfig};

#[tokio::main]
async fn main() -> ApiResult<()> {
    let telemetry_config = TelemetryConfig::default();
    init_tracing(&telemetry_config)?;

    let api_config = ApiConfig::from_env();
    let discovery_config = DiscoveryConfig::from_env();
    let state = AppState::from_config(&api_config, &discovery_config)?;

    let app: Router = create_api_router(state, &api_config, &telemetry_config)?;

    let addr = resolve_bind_addr()?;
    tracing::info!(%addr, "Starting ProtoAi API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn resolve_bind_addr() -> ApiResult<SocketAddr> {
    let host = std::env::var("PROTOAI_API_BIND").unwrap_or_else(|_| DEFAULT_BIND_HOST.to_string());
    let port_str = std::env::var("PORT")
        .ok()
        .or_else(|| std::env::var("PROTOAI_API_PORT").ok())
        .unwrap_or_else(|| DEFAULT_PORT.to_string());
    let port = port_str
        .parse::<u16>()
        .map_err(|_| ApiError::invalid_input(format!("Invalid port value: {}", port_str)))?;

    let addr = format!("{}:{}", host, port);
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
}

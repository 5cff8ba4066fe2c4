//! ProtoAi API - HTTP Discovery Layer
//!
//! Exposes the service catalog over REST (Axum): catalog search, the
//! manifest descriptor, and an intent endpoint that routes discovery
//! requests back through a catalog's search endpoint.

pub mod config;
pub mod constants;
pub mod error;
pub mod macros;
pub mod openapi;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::{ApiConfig, DiscoveryConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use services::{
    DiscoveryClient, DiscoveryError, DispatchError, HttpDiscoveryClient, IntentDispatcher,
};
pub use state::{AppState, SharedCatalog};
pub use telemetry::TelemetryConfig;

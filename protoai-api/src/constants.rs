//! Constants for the ProtoAi API
//!
//! Defaults and fixed strings shared by config, routes and the dispatcher.

// ============================================================================
// SERVER
// ============================================================================

/// Default bind host
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";

/// Default listening port
pub const DEFAULT_PORT: u16 = 8000;

/// Development server URL
pub const DEV_SERVER_URL: &str = "http://localhost:8000";

// ============================================================================
// CORS
// ============================================================================

/// Default CORS max age in seconds (24 hours)
pub const DEFAULT_CORS_MAX_AGE_SECS: u64 = 86400;

// ============================================================================
// CATALOG & MANIFEST
// ============================================================================

/// Default location of the catalog table, relative to the working directory
pub const DEFAULT_CATALOG_PATH: &str = "api/repositories.csv";

/// Route serving the manifest descriptor
pub const MANIFEST_ROUTE: &str = "/protoai/readme.protobuf";

/// Body of `GET /`
pub const WELCOME_MESSAGE: &str = "Welcome to the ProtoAi MCP API";

// ============================================================================
// INTENTS
// ============================================================================

/// Message on a successful discovery intent
pub const DISCOVERY_SUCCESS_MESSAGE: &str = "services found";

/// Message on a failed discovery intent
pub const DISCOVERY_FAILURE_MESSAGE: &str = "Service discovery failed";

/// Key under `data` holding discovered services
pub const SERVICES_KEY: &str = "services";

// ============================================================================
// TELEMETRY
// ============================================================================

/// Default service name reported in logs
pub const DEFAULT_SERVICE_NAME: &str = "protoai-api";

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "protoai_api=debug,tower_http=debug,info";

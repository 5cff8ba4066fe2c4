//! Tracing Subscriber Initialization
//!
//! JSON-formatted `tracing` output filtered by `RUST_LOG`, falling back to
//! a crate-level debug filter.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, DEFAULT_SERVICE_NAME};
use crate::error::{ApiError, ApiResult};

/// Telemetry configuration from environment variables.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to startup logs
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (production, staging, development)
    pub environment: String,
    /// Expose `/metrics`
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: std::env::var("PROTOAI_SERVICE_NAME")
                .unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string()),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: std::env::var("PROTOAI_ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            metrics_enabled: std::env::var("PROTOAI_METRICS_ENABLED")
                .map(|s| s == "true" || s == "1")
                .unwrap_or(true),
        }
    }
}

/// Install the global tracing subscriber.
///
/// Call once at startup. A second call fails because a global subscriber
/// is already set.
pub fn init_tracing(config: &TelemetryConfig) -> ApiResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
        .map_err(|e| ApiError::internal_error(format!("Failed to init subscriber: {}", e)))?;

    tracing::info!(
        service_name = config.service_name,
        service_version = config.service_version,
        environment = config.environment,
        metrics_enabled = config.metrics_enabled,
        "Telemetry initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_env::{EnvVarGuard, ENV_LOCK};

    #[test]
    fn test_telemetry_config_default() -> Result<(), String> {
        let _lock = ENV_LOCK.lock().map_err(|e| e.to_string())?;
        let _name = EnvVarGuard::set("PROTOAI_SERVICE_NAME", None);
        let _metrics = EnvVarGuard::set("PROTOAI_METRICS_ENABLED", None);
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "protoai-api");
        assert_eq!(config.service_version, env!("CARGO_PKG_VERSION"));
        assert!(config.metrics_enabled);
        Ok(())
    }

    #[test]
    fn test_metrics_can_be_disabled() -> Result<(), String> {
        let _lock = ENV_LOCK.lock().map_err(|e| e.to_string())?;
        let _metrics = EnvVarGuard::set("PROTOAI_METRICS_ENABLED", Some("false"));
        assert!(!TelemetryConfig::default().metrics_enabled);
        Ok(())
    }
}

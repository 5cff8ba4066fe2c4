//! API Configuration Module
//!
//! Configuration for CORS, the catalog and manifest sources, and the
//! discovery client. Values are loaded from environment variables with
//! defaults suited to local development.

use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CATALOG_PATH, DEFAULT_CORS_MAX_AGE_SECS, DEV_SERVER_URL,
};
use crate::error::{ApiError, ApiResult};

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    // ========================================================================
    // CORS Configuration
    // ========================================================================
    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,

    /// Whether to allow credentials in CORS requests.
    pub cors_allow_credentials: bool,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,

    // ========================================================================
    // Catalog & Manifest
    // ========================================================================
    /// Path of the CSV catalog table.
    pub catalog_path: PathBuf,

    /// Optional JSON manifest file. The built-in document is served when unset.
    pub manifest_path: Option<PathBuf>,

    /// Base address advertised by the built-in manifest.
    pub public_url: String,

    /// Deployment environment name (production, staging, development).
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            cors_allow_credentials: false,
            cors_max_age_secs: DEFAULT_CORS_MAX_AGE_SECS,
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            manifest_path: None,
            public_url: DEV_SERVER_URL.to_string(),
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `PROTOAI_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `PROTOAI_CORS_ALLOW_CREDENTIALS`: "true" or "false" (default: false)
    /// - `PROTOAI_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    /// - `PROTOAI_CATALOG_PATH`: Catalog table (default: api/repositories.csv)
    /// - `PROTOAI_MANIFEST_PATH`: Manifest JSON file (default: built-in document)
    /// - `PROTOAI_PUBLIC_URL`: Advertised base address (default: http://localhost:8000)
    /// - `PROTOAI_ENVIRONMENT`: Deployment environment (default: development)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cors_origins = std::env::var("PROTOAI_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let cors_allow_credentials = std::env::var("PROTOAI_CORS_ALLOW_CREDENTIALS")
            .ok()
            .map(|s| s.to_lowercase() == "true")
            .unwrap_or(false);

        let cors_max_age_secs = std::env::var("PROTOAI_CORS_MAX_AGE_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.cors_max_age_secs);

        let catalog_path = non_empty_var("PROTOAI_CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.catalog_path);

        let manifest_path = non_empty_var("PROTOAI_MANIFEST_PATH").map(PathBuf::from);

        let public_url = non_empty_var("PROTOAI_PUBLIC_URL").unwrap_or(defaults.public_url);

        let environment = non_empty_var("PROTOAI_ENVIRONMENT").unwrap_or(defaults.environment);

        Self {
            cors_origins,
            cors_allow_credentials,
            cors_max_age_secs,
            catalog_path,
            manifest_path,
            public_url,
            environment,
        }
    }

    /// True for `production` or `prod`, case-insensitively.
    pub fn is_production(&self) -> bool {
        matches!(self.environment.to_lowercase().as_str(), "production" | "prod")
    }

    /// Reject settings that are only acceptable during development.
    pub fn validate_for_production(&self) -> ApiResult<()> {
        if !self.is_production() {
            return Ok(());
        }
        if self.cors_origins.is_empty() {
            return Err(ApiError::invalid_input(
                "CORS origins not configured for production. Set PROTOAI_CORS_ORIGINS.",
            ));
        }
        if self.manifest_path.is_none() && self.public_url == DEV_SERVER_URL {
            tracing::warn!(
                public_url = %self.public_url,
                "Built-in manifest advertises the development URL. Set PROTOAI_PUBLIC_URL."
            );
        }
        Ok(())
    }

    /// Check if a given origin is allowed.
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        if self.cors_origins.is_empty() {
            return true;
        }

        self.cors_origins.iter().any(|allowed| {
            if allowed == origin {
                return true;
            }
            // Wildcard subdomains: *.protoai.dev
            if let Some(pattern) = allowed.strip_prefix("*.") {
                if let Some(origin_domain) = origin.strip_prefix("https://") {
                    return origin_domain.ends_with(&format!(".{}", pattern));
                }
            }
            false
        })
    }
}

// ============================================================================
// DISCOVERY CLIENT CONFIGURATION
// ============================================================================

/// Where the intent dispatcher sends discovery searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Base address of the catalog service; `/search` is appended.
    pub catalog_url: String,

    /// Per-request timeout. `None` waits for the catalog indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEV_SERVER_URL.to_string(),
            timeout: None,
        }
    }
}

impl DiscoveryConfig {
    /// Create DiscoveryConfig from environment variables.
    ///
    /// Environment variables:
    /// - `PROTOAI_CATALOG_URL`: Catalog base address (default: http://localhost:8000)
    /// - `PROTOAI_DISCOVERY_TIMEOUT_MS`: Request timeout in milliseconds (default: none)
    pub fn from_env() -> Self {
        let catalog_url =
            non_empty_var("PROTOAI_CATALOG_URL").unwrap_or_else(|| DEV_SERVER_URL.to_string());

        let timeout = std::env::var("PROTOAI_DISCOVERY_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);

        Self {
            catalog_url,
            timeout,
        }
    }

    pub fn with_catalog_url(mut self, catalog_url: impl Into<String>) -> Self {
        self.catalog_url = catalog_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Process-environment helpers shared by every test module that touches
/// `PROTOAI_*` variables.
#[cfg(test)]
pub(crate) mod test_env {
    use std::sync::Mutex;

    /// Serializes tests that read or write environment variables.
    pub(crate) static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Sets (or removes) a variable and restores the previous value on drop.
    pub(crate) struct EnvVarGuard {
        key: &'static str,
        original: Option<String>,
    }

    impl EnvVarGuard {
        pub(crate) fn set(key: &'static str, value: Option<&str>) -> Self {
            let original = std::env::var(key).ok();
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
            Self { key, original }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            match self.original.as_deref() {
                Some(v) => std::env::set_var(self.key, v),
                None => std::env::remove_var(self.key),
            }
        }
    }
}

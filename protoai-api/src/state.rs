//! Shared application state for Axum routers.

use std::sync::Arc;
use std::time::Instant;

use protoai_catalog::CsvCatalog;
use protoai_core::{CatalogRepository, Manifest};

use crate::config::{ApiConfig, DiscoveryConfig};
use crate::error::{ApiError, ApiResult};
use crate::services::{DiscoveryClient, HttpDiscoveryClient, IntentDispatcher};

/// Catalog handle shared by the search and readiness handlers.
pub type SharedCatalog = Arc<dyn CatalogRepository>;

/// Application-wide state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub catalog: SharedCatalog,
    /// Served verbatim at the manifest route.
    pub manifest: Arc<Manifest>,
    pub dispatcher: Arc<IntentDispatcher>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        catalog: SharedCatalog,
        manifest: Manifest,
        discovery: Arc<dyn DiscoveryClient>,
    ) -> Self {
        Self {
            catalog,
            manifest: Arc::new(manifest),
            dispatcher: Arc::new(IntentDispatcher::new(discovery)),
            start_time: Instant::now(),
        }
    }

    /// Assemble production state: CSV catalog, manifest and HTTP discovery.
    ///
    /// The manifest is loaded from `manifest_path` when set, otherwise the
    /// built-in document for `public_url` is used. Either way it must
    /// validate.
    pub fn from_config(api_config: &ApiConfig, discovery_config: &DiscoveryConfig) -> ApiResult<Self> {
        let catalog: SharedCatalog = Arc::new(CsvCatalog::new(&api_config.catalog_path));

        let manifest = match &api_config.manifest_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading manifest");
                Manifest::load(path)?
            }
            None => {
                let manifest = Manifest::builtin(&api_config.public_url);
                manifest.validate()?;
                manifest
            }
        };

        let discovery = HttpDiscoveryClient::from_config(discovery_config)
            .map_err(|e| ApiError::internal_error(e.to_string()))?;

        tracing::info!(
            catalog = %api_config.catalog_path.display(),
            catalog_url = %discovery.base_url(),
            manifest = %manifest.project_info.name,
            "Application state ready"
        );

        Ok(Self::new(catalog, manifest, Arc::new(discovery)))
    }
}

crate::impl_from_ref!(SharedCatalog, catalog);
crate::impl_from_ref!(Arc<Manifest>, manifest);
crate::impl_from_ref!(Arc<IntentDispatcher>, dispatcher);
crate::impl_from_ref!(Instant, start_time);

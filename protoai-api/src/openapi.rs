//! OpenAPI Specification for the ProtoAi Discovery API
//!
//! Generated by utoipa from the handler annotations and the schema derives
//! on the core types.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::health::{ComponentHealth, HealthDetails, HealthResponse, HealthStatus};
use crate::routes::root::WelcomeResponse;
use crate::routes::{health, intent, manifest, root, search};
use crate::telemetry::metrics;

use protoai_core::{
    AccessInterface, CommunicationDetails, ComplianceReference, Documentation, Intent,
    IntentResponse, Manifest, ProjectInfo, SearchFilter, SearchResponse, SearchResult,
    SecurityInfo, ServiceRecord, UpdatePolicy,
};

/// OpenAPI document for the ProtoAi API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ProtoAi Discovery API",
        version = "0.1.0",
        description = "Service catalog search, intent dispatch and the ProtoAi manifest descriptor",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local Development")
    ),
    tags(
        (name = "Discovery", description = "Catalog search and the manifest descriptor"),
        (name = "Intents", description = "Typed request envelopes routed by kind"),
        (name = "Health", description = "Liveness and readiness checks"),
        (name = "Observability", description = "Prometheus metrics")
    ),
    paths(
        // === Discovery ===
        root::welcome,
        search::search_catalog,
        manifest::get_manifest,

        // === Intents ===
        intent::dispatch_intent,

        // === Health ===
        health::ping,
        health::liveness,
        health::readiness,

        // === Observability ===
        metrics::metrics_handler,
    ),
    components(
        schemas(
            // Catalog
            ServiceRecord,
            SearchResult,
            SearchResponse,
            SearchFilter,

            // Intents
            Intent,
            IntentResponse,

            // Manifest
            Manifest,
            ProjectInfo,
            AccessInterface,
            CommunicationDetails,
            SecurityInfo,
            Documentation,
            UpdatePolicy,
            ComplianceReference,

            // Health
            HealthResponse,
            HealthStatus,
            HealthDetails,
            ComponentHealth,

            // Misc
            WelcomeResponse,
            ApiError,
            ErrorCode,
        )
    )
)]
pub struct ApiDoc;

//! Search REST API Routes
//!
//! `GET /search` runs the query engine over the configured catalog. The
//! scan is synchronous file I/O, so it runs on the blocking pool.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use protoai_core::{search, SearchFilter, SearchResponse};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, ApiResult},
    state::{AppState, SharedCatalog},
    telemetry::METRICS,
};

// ============================================================================
// QUERY PARAMETERS
// ============================================================================

/// Query string for `GET /search`. Empty values count as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive term matched against name or description
    pub q: Option<String>,
    /// Comma-separated tags; a record matches if it has any of them (case-sensitive)
    pub tags: Option<String>,
    /// Case-insensitive owner substring
    pub owner: Option<String>,
    /// Case-insensitive license substring
    pub license: Option<String>,
}

impl SearchQuery {
    pub fn to_filter(&self) -> SearchFilter {
        SearchFilter::from_wire(
            self.q.as_deref(),
            self.tags.as_deref(),
            self.owner.as_deref(),
            self.license.as_deref(),
        )
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /search - Filter the service catalog
#[utoipa::path(
    get,
    path = "/search",
    tag = "Discovery",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching catalog records", body = SearchResponse),
        (status = 500, description = "Catalog is malformed", body = ApiError),
        (status = 503, description = "Catalog is unavailable", body = ApiError),
    ),
)]
pub async fn search_catalog(
    State(catalog): State<SharedCatalog>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Json<SearchResponse>> {
    let filter = params.to_filter();

    let outcome = tokio::task::spawn_blocking(move || search(catalog.as_ref(), &filter))
        .await
        .map_err(|e| ApiError::internal_error(format!("Search task failed: {}", e)))?;

    if let Ok(metrics) = METRICS.as_ref() {
        metrics.record_catalog_search(outcome.as_ref().ok().map(|r| r.total_count));
    }

    Ok(Json(outcome?))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

pub fn create_router() -> Router<AppState> {
    Router::new().route("/search", get(search_catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use protoai_test_utils::assertions::assert_names;
    use protoai_test_utils::fixtures::sample_catalog;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_handler_filters_catalog() -> Result<(), String> {
        let catalog: SharedCatalog = Arc::new(sample_catalog());
        let params = SearchQuery {
            tags: Some("api,python".to_string()),
            owner: Some("BOB".to_string()),
            ..Default::default()
        };

        let Json(response) = search_catalog(State(catalog), Query(params))
            .await
            .map_err(|e| e.to_string())?;

        assert_names(&response.results, &["gateway"]);
        assert_eq!(response.total_count, 1);
        Ok(())
    }

    #[test]
    fn test_empty_params_are_not_supplied() {
        let query = SearchQuery {
            q: Some(String::new()),
            tags: Some(String::new()),
            owner: None,
            license: Some(String::new()),
        };
        assert!(query.to_filter().is_empty());
    }

    #[test]
    fn test_tags_param_is_split_and_trimmed() {
        let query = SearchQuery {
            tags: Some("ml, python".to_string()),
            ..Default::default()
        };
        assert_eq!(
            query.to_filter().tags,
            Some(vec!["ml".to_string(), "python".to_string()])
        );
    }
}

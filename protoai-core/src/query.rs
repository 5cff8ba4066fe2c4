//! Discovery query engine
//!
//! A linear scan over the catalog in store order. The scan never fails;
//! only reading the backing store can.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogRepository;
use crate::error::CatalogResult;
use crate::filter::SearchFilter;
use crate::record::{SearchResult, ServiceRecord};

/// Search results with count and construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchResponse {
    /// Matching records in catalog order.
    pub results: Vec<SearchResult>,
    /// Always equal to `results.len()`.
    pub total_count: usize,
    /// When this response was built (ISO-8601).
    pub query_timestamp: DateTime<Utc>,
}

impl SearchResponse {
    /// Wrap results, stamping the count and the current time.
    pub fn new(results: Vec<SearchResult>) -> Self {
        Self {
            total_count: results.len(),
            results,
            query_timestamp: Utc::now(),
        }
    }
}

/// Return every record satisfying `filter`, preserving input order.
pub fn filter_records<'a, I>(records: I, filter: &SearchFilter) -> Vec<SearchResult>
where
    I: IntoIterator<Item = &'a ServiceRecord>,
{
    records
        .into_iter()
        .filter(|record| filter.matches(record))
        .map(SearchResult::from)
        .collect()
}

/// Run `filter` against every record of `catalog`.
pub fn search<C>(catalog: &C, filter: &SearchFilter) -> CatalogResult<SearchResponse>
where
    C: CatalogRepository + ?Sized,
{
    tracing::info!(
        query = ?filter.term,
        tags = ?filter.tags,
        owner = ?filter.owner,
        license = ?filter.license,
        source = %catalog.source_name(),
        "Search started"
    );

    let records = catalog.list()?;
    let response = SearchResponse::new(filter_records(&records, filter));

    tracing::info!(
        total_count = response.total_count,
        scanned = records.len(),
        "Search completed"
    );

    Ok(response)
}

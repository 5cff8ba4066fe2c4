//! Catalog records and their search projection

use serde::{Deserialize, Serialize};

/// One row of the service catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ServiceRecord {
    pub name: String,
    pub description: String,
    pub url: String,
    /// Ordered tag list. An empty source field yields `[""]`.
    pub tags: Vec<String>,
    pub owner: String,
    pub license: String,
    pub version: String,
}

impl ServiceRecord {
    /// Create a record with only a name; remaining fields are empty.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            url: String::new(),
            tags: vec![String::new()],
            owner: String::new(),
            license: String::new(),
            version: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = license.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// True if any of `candidates` exactly equals one of this record's tags.
    pub fn has_any_tag(&self, candidates: &[String]) -> bool {
        candidates.iter().any(|c| self.tags.iter().any(|t| t == c))
    }
}

/// A matching record as returned by a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchResult {
    pub name: String,
    pub description: String,
    pub url: String,
    pub tags: Vec<String>,
    pub owner: String,
    pub license: String,
    pub version: String,
}

impl From<&ServiceRecord> for SearchResult {
    fn from(record: &ServiceRecord) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            url: record.url.clone(),
            tags: record.tags.clone(),
            owner: record.owner.clone(),
            license: record.license.clone(),
            version: record.version.clone(),
        }
    }
}

impl From<ServiceRecord> for SearchResult {
    fn from(record: ServiceRecord) -> Self {
        Self {
            name: record.name,
            description: record.description,
            url: record.url,
            tags: record.tags,
            owner: record.owner,
            license: record.license,
            version: record.version,
        }
    }
}

/// Split a comma-separated tag list and trim each entry.
///
/// Empty entries are kept, so `"a,,b"` yields `["a", "", "b"]`.
pub fn split_tag_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|t| t.trim().to_string()).collect()
}

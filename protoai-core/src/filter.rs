//! Search filter for catalog queries
//!
//! Every supplied predicate must hold for a record to match. Text, owner and
//! license predicates are case-insensitive substring checks; the tag predicate
//! is a case-sensitive set intersection.

use serde::{Deserialize, Serialize};

use crate::record::{split_tag_list, ServiceRecord};

/// Conjunction of optional search predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchFilter {
    /// Free-text term matched against name or description.
    pub term: Option<String>,
    /// Candidate tags; at least one must appear on the record.
    pub tags: Option<Vec<String>>,
    /// Substring of the owner.
    pub owner: Option<String>,
    /// Substring of the license.
    pub license: Option<String>,
}

impl SearchFilter {
    /// A filter with no predicates; matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from raw wire values.
    ///
    /// Empty strings count as not supplied. `tags` is comma-separated.
    pub fn from_wire(
        term: Option<&str>,
        tags: Option<&str>,
        owner: Option<&str>,
        license: Option<&str>,
    ) -> Self {
        Self {
            term: non_empty(term),
            tags: non_empty(tags).map(|raw| split_tag_list(&raw)),
            owner: non_empty(owner),
            license: non_empty(license),
        }
    }

    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// True when no predicate is supplied.
    pub fn is_empty(&self) -> bool {
        self.term.is_none() && self.tags.is_none() && self.owner.is_none() && self.license.is_none()
    }

    /// Tags re-joined for the wire, if any.
    pub fn tags_param(&self) -> Option<String> {
        self.tags.as_ref().map(|tags| tags.join(","))
    }

    /// Evaluate every supplied predicate against `record`.
    pub fn matches(&self, record: &ServiceRecord) -> bool {
        if let Some(term) = &self.term {
            let term = term.to_lowercase();
            if !record.name.to_lowercase().contains(&term)
                && !record.description.to_lowercase().contains(&term)
            {
                return false;
            }
        }

        if let Some(tags) = &self.tags {
            if !record.has_any_tag(tags) {
                return false;
            }
        }

        if let Some(owner) = &self.owner {
            if !contains_ignore_case(&record.owner, owner) {
                return false;
            }
        }

        if let Some(license) = &self.license {
            if !contains_ignore_case(&record.license, license) {
                return false;
            }
        }

        true
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

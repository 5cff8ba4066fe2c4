//! Row codec for the catalog table
//!
//! The table header is `name, description, url, tags, owner, license, version`.
//! `tags` holds a comma-separated sub-list, quoted when it has more than one
//! entry.

use protoai_core::{split_tag_list, CatalogError, CatalogResult, ServiceRecord};
use serde::{Deserialize, Serialize};

/// Column names in table order.
pub const HEADER: [&str; 7] = ["name", "description", "url", "tags", "owner", "license", "version"];

/// Raw table row as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub name: String,
    pub description: String,
    pub url: String,
    pub tags: String,
    pub owner: String,
    pub license: String,
    pub version: String,
}

impl CatalogRow {
    /// Convert into a record, rejecting rows without a name.
    pub fn into_record(self, line: Option<u64>) -> CatalogResult<ServiceRecord> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::malformed(line, "empty `name`"));
        }

        Ok(ServiceRecord {
            tags: decode_tags(&self.tags),
            name: self.name,
            description: self.description,
            url: self.url,
            owner: self.owner,
            license: self.license,
            version: self.version,
        })
    }

    /// Build a row from a record.
    ///
    /// Fails for tags that cannot survive re-parsing: an empty list, or tags
    /// containing the list delimiter or a quote character.
    pub fn from_record(record: &ServiceRecord) -> CatalogResult<Self> {
        Ok(Self {
            name: record.name.clone(),
            description: record.description.clone(),
            url: record.url.clone(),
            tags: encode_tags(&record.tags)?,
            owner: record.owner.clone(),
            license: record.license.clone(),
            version: record.version.clone(),
        })
    }
}

/// Split a stored tags field into trimmed tags.
///
/// Surrounding quote characters are stripped first. An empty field yields
/// `[""]`.
pub fn decode_tags(field: &str) -> Vec<String> {
    split_tag_list(field.trim().trim_matches('"'))
}

/// Join tags into the stored field form.
///
/// An empty list has no stored form: an empty field reads back as `[""]`.
pub fn encode_tags(tags: &[String]) -> CatalogResult<String> {
    if tags.is_empty() {
        return Err(CatalogError::WriteFailed {
            reason: "tag list is empty; an untagged record carries a single empty tag".to_string(),
        });
    }
    if let Some(bad) = tags.iter().find(|t| t.contains(',') || t.contains('"')) {
        return Err(CatalogError::WriteFailed {
            reason: format!("tag {:?} contains a delimiter or quote", bad),
        });
    }
    Ok(tags
        .iter()
        .map(|t| t.trim())
        .collect::<Vec<_>>()
        .join(","))
}

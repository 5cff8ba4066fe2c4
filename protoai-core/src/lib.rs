//! ProtoAi Core - Discovery Types and Query Engine
//!
//! Data model for the service catalog, intent envelopes and the manifest
//! descriptor, plus the query engine that filters catalog records.
//! Storage formats and transports live in other crates.

pub mod catalog;
pub mod error;
pub mod filter;
pub mod intent;
pub mod manifest;
pub mod query;
pub mod record;

pub use catalog::{CatalogRepository, InMemoryCatalog};
pub use error::{CatalogError, CatalogResult, ManifestError};
pub use filter::SearchFilter;
pub use intent::{
    Capability, Intent, IntentKind, IntentResponse, INVALID_INTENT_TYPE, NOT_IMPLEMENTED,
};
pub use manifest::{
    AccessInterface, CommunicationDetails, ComplianceReference, Documentation, InterfaceType,
    Manifest, ProjectInfo, SecurityInfo, UpdatePolicy,
};
pub use query::{filter_records, search, SearchResponse};
pub use record::{split_tag_list, SearchResult, ServiceRecord};

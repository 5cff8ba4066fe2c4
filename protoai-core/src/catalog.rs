//! Read-only catalog repository abstraction
//!
//! The query engine only needs an ordered listing of records. File-backed
//! implementations live in protoai-catalog.

use std::sync::Arc;

use crate::error::CatalogResult;
use crate::record::ServiceRecord;

/// Read-only source of service records.
///
/// `list` returns records in the store's iteration order.
pub trait CatalogRepository: Send + Sync {
    /// Short label used in logs and error messages.
    fn source_name(&self) -> String;

    /// List every record in iteration order.
    fn list(&self) -> CatalogResult<Vec<ServiceRecord>>;
}

impl<T: CatalogRepository + ?Sized> CatalogRepository for Arc<T> {
    fn source_name(&self) -> String {
        (**self).source_name()
    }

    fn list(&self) -> CatalogResult<Vec<ServiceRecord>> {
        (**self).list()
    }
}

/// Fixed in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    records: Vec<ServiceRecord>,
}

impl InMemoryCatalog {
    pub fn new(records: Vec<ServiceRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<ServiceRecord> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = ServiceRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn source_name(&self) -> String {
        "memory".to_string()
    }

    fn list(&self) -> CatalogResult<Vec<ServiceRecord>> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_preserves_order() -> CatalogResult<()> {
        let catalog: InMemoryCatalog = ["b", "a", "c"]
            .into_iter()
            .map(ServiceRecord::named)
            .collect();

        let names: Vec<String> = catalog.list()?.into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(catalog.len(), 3);
        Ok(())
    }

    #[test]
    fn test_arc_delegates() -> CatalogResult<()> {
        let catalog: Arc<dyn CatalogRepository> =
            Arc::new(InMemoryCatalog::new(vec![ServiceRecord::named("x")]));
        assert_eq!(catalog.source_name(), "memory");
        assert_eq!(catalog.list()?.len(), 1);
        Ok(())
    }
}

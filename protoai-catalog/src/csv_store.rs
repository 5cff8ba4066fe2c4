//! CSV file catalog
//!
//! The file is re-read on every `list()`, so edits to the table show up on
//! the next query without a restart.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use protoai_core::{CatalogError, CatalogRepository, CatalogResult, ServiceRecord};

use crate::codec::{CatalogRow, HEADER};

/// Catalog backed by a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    path: PathBuf,
}

impl CsvCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogRepository for CsvCatalog {
    fn source_name(&self) -> String {
        self.path.display().to_string()
    }

    fn list(&self) -> CatalogResult<Vec<ServiceRecord>> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CatalogError::NotFound {
                source_name: self.source_name(),
            },
            _ => CatalogError::Io {
                source_name: self.source_name(),
                reason: e.to_string(),
            },
        })?;

        let records = read_catalog(file)?;
        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "Catalog loaded"
        );
        Ok(records)
    }
}

/// Parse a catalog table from any reader.
///
/// Headers are whitespace-trimmed, so `name, description` and
/// `name,description` headers are equivalent. Field values are kept as
/// written; only the tags sub-list is trimmed. Every column in [`HEADER`]
/// must be present.
pub fn read_catalog<R: Read>(reader: R) -> CatalogResult<Vec<ServiceRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| csv_error(&e))?
        .clone();
    let missing: Vec<&str> = HEADER
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        return Err(CatalogError::malformed(
            Some(1),
            format!("missing column(s): {}", missing.join(", ")),
        ));
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let raw = result.map_err(|e| csv_error(&e))?;
        let line = raw.position().map(|p| p.line());
        let row: CatalogRow = raw
            .deserialize(Some(&headers))
            .map_err(|e| CatalogError::malformed(line, e.to_string()))?;
        records.push(row.into_record(line)?);
    }
    Ok(records)
}

fn csv_error(err: &csv::Error) -> CatalogError {
    let line = err.position().map(|p| p.line());
    match err.kind() {
        csv::ErrorKind::Io(io_err) => CatalogError::Io {
            source_name: "catalog".to_string(),
            reason: io_err.to_string(),
        },
        _ => CatalogError::malformed(line, err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
name, description, url, tags, owner, license, version
repo-A, ML toolkit, https://example.com/repo-a,\"ml,python\", alice, MIT, 1.0.0
gateway,HTTP gateway,https://example.com/gw,api,bob,Apache-2.0,0.2.0
bare,,,,,,
";

    #[test]
    fn test_read_sample() -> CatalogResult<()> {
        let records = read_catalog(SAMPLE.as_bytes())?;
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].name, "repo-A");
        assert_eq!(records[0].description, " ML toolkit");
        assert_eq!(records[0].tags, vec!["ml", "python"]);
        assert_eq!(records[0].owner, " alice");

        assert_eq!(records[1].tags, vec!["api"]);
        assert_eq!(records[2].tags, vec![""]);
        Ok(())
    }

    #[test]
    fn test_field_whitespace_is_preserved() -> CatalogResult<()> {
        let table = "name,description,url,tags,owner,license,version\n\
                     svc, padded description ,u,\" api , ml \",alice ,MIT,1.0.0\n";
        let records = read_catalog(table.as_bytes())?;

        assert_eq!(records[0].description, " padded description ");
        assert_eq!(records[0].owner, "alice ");
        assert_eq!(records[0].tags, vec!["api", "ml"]);
        Ok(())
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let table = "name,description,url,tags,owner,version\nx,,,,,\n";
        match read_catalog(table.as_bytes()) {
            Err(CatalogError::Malformed { line, reason }) => {
                assert_eq!(line, Some(1));
                assert!(reason.contains("license"));
            }
            other => panic!("expected malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_short_row_is_malformed() {
        let table = "name,description,url,tags,owner,license,version\nx,y\n";
        assert!(matches!(
            read_catalog(table.as_bytes()),
            Err(CatalogError::Malformed { .. })
        ));
    }

    #[test]
    fn test_header_only_is_empty_catalog() -> CatalogResult<()> {
        let table = "name,description,url,tags,owner,license,version\n";
        assert!(read_catalog(table.as_bytes())?.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let catalog = CsvCatalog::new("/nonexistent/protoai/repositories.csv");
        assert!(matches!(
            catalog.list(),
            Err(CatalogError::NotFound { .. })
        ));
    }

    #[test]
    fn test_file_is_reread_on_each_list() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "name,description,url,tags,owner,license,version")?;
        file.flush()?;

        let catalog = CsvCatalog::new(file.path());
        assert!(catalog.list()?.is_empty());

        writeln!(file, "late,added later,,api,carol,MIT,0.1.0")?;
        file.flush()?;
        let records = catalog.list()?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "late");
        Ok(())
    }
}

//! Catalog table writer
//!
//! Output re-reads through [`crate::read_catalog`] into the same records.
//! Field values keep their whitespace; tags are compared after trimming.

use std::io::Write;

use csv::WriterBuilder;
use protoai_core::{CatalogError, CatalogResult, ServiceRecord};

use crate::codec::CatalogRow;

/// Write `records` as a catalog table, header first.
pub fn write_catalog<'a, W, I>(writer: W, records: I) -> CatalogResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a ServiceRecord>,
{
    let mut out = WriterBuilder::new().has_headers(true).from_writer(writer);

    let mut written = 0usize;
    for record in records {
        let row = CatalogRow::from_record(record)?;
        out.serialize(&row).map_err(|e| CatalogError::WriteFailed {
            reason: e.to_string(),
        })?;
        written += 1;
    }

    // An empty catalog still gets its header row.
    if written == 0 {
        out.write_record(crate::codec::HEADER)
            .map_err(|e| CatalogError::WriteFailed {
                reason: e.to_string(),
            })?;
    }

    out.flush().map_err(|e| CatalogError::WriteFailed {
        reason: e.to_string(),
    })?;
    tracing::debug!(records = written, "Catalog written");
    Ok(())
}

/// Render `records` as catalog text.
pub fn catalog_to_string<'a, I>(records: I) -> CatalogResult<String>
where
    I: IntoIterator<Item = &'a ServiceRecord>,
{
    let mut buffer = Vec::new();
    write_catalog(&mut buffer, records)?;
    String::from_utf8(buffer).map_err(|e| CatalogError::WriteFailed {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_catalog;

    fn sample() -> Vec<ServiceRecord> {
        vec![
            ServiceRecord::named("repo-A")
                .with_description("ML toolkit")
                .with_url("https://example.com/repo-a")
                .with_tags(["ml", "python"])
                .with_owner("alice")
                .with_license("MIT")
                .with_version("1.0.0"),
            ServiceRecord::named("solo").with_tags(["api"]),
            ServiceRecord::named("untagged"),
        ]
    }

    #[test]
    fn test_header_row() -> CatalogResult<()> {
        let text = catalog_to_string(&sample())?;
        assert!(text.starts_with("name,description,url,tags,owner,license,version\n"));
        Ok(())
    }

    #[test]
    fn test_multi_tag_field_is_quoted() -> CatalogResult<()> {
        let text = catalog_to_string(&sample())?;
        assert!(text.contains(",\"ml,python\","));
        Ok(())
    }

    #[test]
    fn test_round_trip() -> CatalogResult<()> {
        let records = sample();
        let text = catalog_to_string(&records)?;
        assert_eq!(read_catalog(text.as_bytes())?, records);
        Ok(())
    }

    #[test]
    fn test_empty_catalog_keeps_header() -> CatalogResult<()> {
        let text = catalog_to_string(&Vec::<ServiceRecord>::new())?;
        assert_eq!(text, "name,description,url,tags,owner,license,version\n");
        assert!(read_catalog(text.as_bytes())?.is_empty());
        Ok(())
    }

    #[test]
    fn test_padded_fields_survive_round_trip() -> CatalogResult<()> {
        let records = vec![ServiceRecord::named("padded")
            .with_description(" ML toolkit ")
            .with_owner("alice ")
            .with_tags(["ml"])
            .with_version(" 1.0.0")];
        let text = catalog_to_string(&records)?;
        assert_eq!(read_catalog(text.as_bytes())?, records);
        Ok(())
    }

    #[test]
    fn test_empty_tag_list_fails() {
        let records = vec![ServiceRecord::named("x").with_tags(Vec::<String>::new())];
        assert!(matches!(
            catalog_to_string(&records),
            Err(CatalogError::WriteFailed { .. })
        ));
    }

    #[test]
    fn test_unencodable_tag_fails() {
        let records = vec![ServiceRecord::named("x").with_tags(["a,b"])];
        assert!(matches!(
            catalog_to_string(&records),
            Err(CatalogError::WriteFailed { .. })
        ));
    }
}

//! ProtoAi Test Utilities
//!
//! Shared test infrastructure for the ProtoAi workspace:
//! - Proptest generators for catalog records and filters
//! - Catalog fixtures, including an on-disk CSV catalog
//! - A catalog that always fails, for error-path tests
//! - Assertions over catalog results

pub use protoai_core::{
    CatalogError, CatalogRepository, CatalogResult, InMemoryCatalog, SearchFilter, SearchResult,
    ServiceRecord,
};

// ============================================================================
// FAILING CATALOG
// ============================================================================

/// Catalog whose `list()` always returns the configured error.
#[derive(Debug, Clone)]
pub struct FailingCatalog {
    error: CatalogError,
}

impl FailingCatalog {
    pub fn new(error: CatalogError) -> Self {
        Self { error }
    }

    /// Fails the way a missing catalog file does.
    pub fn missing() -> Self {
        Self::new(CatalogError::NotFound {
            source_name: "missing.csv".to_string(),
        })
    }

    /// Fails the way a corrupt table does.
    pub fn malformed() -> Self {
        Self::new(CatalogError::malformed(Some(2), "unequal row length"))
    }
}

impl CatalogRepository for FailingCatalog {
    fn source_name(&self) -> String {
        "failing".to_string()
    }

    fn list(&self) -> CatalogResult<Vec<ServiceRecord>> {
        Err(self.error.clone())
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for catalog types.

    use super::*;
    use proptest::prelude::*;

    /// Lowercase tag, possibly empty.
    pub fn arb_tag() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("ml".to_string()),
            Just("python".to_string()),
            Just("api".to_string()),
            Just("ML".to_string()),
            Just(String::new()),
            "[a-z]{1,6}",
        ]
    }

    /// Free-text field, possibly padded with spaces.
    pub fn arb_text() -> impl Strategy<Value = String> {
        "[A-Za-z0-9 ._-]{0,16}"
    }

    /// Record with a non-empty name.
    pub fn arb_record() -> impl Strategy<Value = ServiceRecord> {
        (
            "[a-z][a-z0-9-]{0,10}",
            arb_text(),
            arb_text(),
            prop::collection::vec(arb_tag(), 1..4),
            prop_oneof![Just("alice".to_string()), Just("bob".to_string()), arb_text()],
            prop_oneof![Just("MIT".to_string()), Just("Apache-2.0".to_string())],
            "[0-9]\\.[0-9]\\.[0-9]",
        )
            .prop_map(|(name, description, url, tags, owner, license, version)| {
                ServiceRecord::named(name)
                    .with_description(description)
                    .with_url(url)
                    .with_tags(tags)
                    .with_owner(owner)
                    .with_license(license)
                    .with_version(version)
            })
    }

    pub fn arb_catalog() -> impl Strategy<Value = Vec<ServiceRecord>> {
        prop::collection::vec(arb_record(), 0..10)
    }

    /// Filter drawing its values from the same vocabulary as [`arb_record`].
    pub fn arb_filter() -> impl Strategy<Value = SearchFilter> {
        (
            prop::option::of(prop_oneof![
                Just("a".to_string()),
                Just("TOOL".to_string()),
                "[a-z]{1,3}",
            ]),
            prop::option::of(prop::collection::vec(arb_tag(), 1..3)),
            prop::option::of(prop_oneof![Just("ali".to_string()), Just("BOB".to_string())]),
            prop::option::of(prop_oneof![Just("mit".to_string()), Just("apache".to_string())]),
        )
            .prop_map(|(term, tags, owner, license)| SearchFilter {
                term,
                tags,
                owner,
                license,
            })
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built catalogs for common scenarios.

    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Catalog table text for [`sample_records`].
    pub const SAMPLE_CATALOG_CSV: &str = "\
name,description,url,tags,owner,license,version
repo-A,ML toolkit,https://example.com/repo-a,\"ml,python\",alice,MIT,1.0.0
gateway,HTTP gateway for model APIs,https://example.com/gateway,api,bob,Apache-2.0,0.4.2
docs-site,Documentation portal,https://example.com/docs,,carol,CC-BY-4.0,2.1.0
";

    /// The single-row catalog used throughout the discovery scenarios.
    pub fn repo_a() -> ServiceRecord {
        ServiceRecord::named("repo-A")
            .with_description("ML toolkit")
            .with_url("https://example.com/repo-a")
            .with_tags(["ml", "python"])
            .with_owner("alice")
            .with_license("MIT")
            .with_version("1.0.0")
    }

    pub fn sample_records() -> Vec<ServiceRecord> {
        vec![
            repo_a(),
            ServiceRecord::named("gateway")
                .with_description("HTTP gateway for model APIs")
                .with_url("https://example.com/gateway")
                .with_tags(["api"])
                .with_owner("bob")
                .with_license("Apache-2.0")
                .with_version("0.4.2"),
            ServiceRecord::named("docs-site")
                .with_description("Documentation portal")
                .with_url("https://example.com/docs")
                .with_owner("carol")
                .with_license("CC-BY-4.0")
                .with_version("2.1.0"),
        ]
    }

    pub fn scenario_catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![repo_a()])
    }

    pub fn sample_catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(sample_records())
    }

    /// Write `contents` to a temporary catalog file.
    ///
    /// The file is removed when the returned handle drops.
    pub fn catalog_file(contents: &str) -> std::io::Result<NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix("repositories")
            .suffix(".csv")
            .tempfile()?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        Ok(file)
    }

    /// Temporary file holding [`SAMPLE_CATALOG_CSV`].
    pub fn sample_catalog_file() -> std::io::Result<NamedTempFile> {
        catalog_file(SAMPLE_CATALOG_CSV)
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions for catalog results.

    use super::*;

    #[track_caller]
    pub fn assert_names(results: &[SearchResult], expected: &[&str]) {
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, expected, "unexpected result set");
    }

    #[track_caller]
    pub fn assert_catalog_not_found<T: std::fmt::Debug>(result: &CatalogResult<T>) {
        match result {
            Err(CatalogError::NotFound { .. }) => {}
            other => panic!("Expected NotFound catalog error, got: {:?}", other),
        }
    }

    #[track_caller]
    pub fn assert_catalog_malformed<T: std::fmt::Debug>(result: &CatalogResult<T>) {
        match result {
            Err(CatalogError::Malformed { .. }) => {}
            other => panic!("Expected Malformed catalog error, got: {:?}", other),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

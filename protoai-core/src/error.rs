//! Error types for ProtoAi operations

use thiserror::Error;

/// Catalog store errors.
///
/// Filtering itself never fails; these describe a backing table that could
/// not be read or parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog source not found: {source_name}")]
    NotFound { source_name: String },

    #[error("Failed to read catalog {source_name}: {reason}")]
    Io { source_name: String, reason: String },

    #[error("Malformed catalog row{}: {reason}", line_suffix(.line))]
    Malformed { line: Option<u64>, reason: String },

    #[error("Failed to write catalog: {reason}")]
    WriteFailed { reason: String },
}

impl CatalogError {
    pub fn malformed(line: Option<u64>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            reason: reason.into(),
        }
    }
}

fn line_suffix(line: &Option<u64>) -> String {
    match line {
        Some(l) => format!(" at line {}", l),
        None => String::new(),
    }
}

/// Manifest descriptor errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Manifest is not valid JSON: {reason}")]
    InvalidJson { reason: String },

    #[error("Manifest validation failed: {}", errors.join("; "))]
    Invalid { errors: Vec<String> },
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display_with_line() {
        let err = CatalogError::malformed(Some(4), "missing field `name`");
        assert_eq!(
            err.to_string(),
            "Malformed catalog row at line 4: missing field `name`"
        );
    }

    #[test]
    fn test_malformed_display_without_line() {
        let err = CatalogError::malformed(None, "bad header");
        assert_eq!(err.to_string(), "Malformed catalog row: bad header");
    }

    #[test]
    fn test_manifest_invalid_lists_all_errors() {
        let err = ManifestError::Invalid {
            errors: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(err.to_string(), "Manifest validation failed: a; b");
    }
}

//! Unit snapshots: the JSON hand-off format between a host front end and
//! the engine.
//!
//! # Architecture
//!
//! ```text
//! JSON text
//!   ↓ serde (DTO layer)
//! dto types
//!   ↓ validate + convert
//! UnitOfSource (arena tree + symbol tables)
//! ```

use crate::semantic::UnitOfSource;

use std::path::{Path, PathBuf};

pub mod dto;
pub mod loader;

/// Errors from reading and loading unit snapshots.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// IO error reading a snapshot file.
    #[error("Failed to read snapshot {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// JSON deserialization failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A declaration is structurally impossible.
    #[error("{context}: {message}")]
    Invalid {
        /// Where the error occurred (e.g., "members[0].variables").
        context: String,
        /// What is wrong.
        message: String,
    },
}

/// Parses a snapshot from JSON text.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or describes an invalid unit.
pub fn parse(json: &str) -> Result<UnitOfSource, SnapshotError> {
    let dto: dto::UnitDto = serde_json::from_str(json)?;
    loader::load(dto)
}

/// Reads and parses a snapshot file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_file(path: &Path) -> Result<UnitOfSource, SnapshotError> {
    let content = std::fs::read_to_string(path).map_err(|e| SnapshotError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::SemanticModel;
    use std::io::Write;

    #[test]
    fn parse_reports_json_errors() {
        let err = parse(r#"{ "path": "A.cs", "members": [ { "kind": "record" } ] }"#).unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)));
    }

    #[test]
    fn load_file_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        write!(
            file,
            r#"{{ "path": "src/A.cs", "members": [ {{ "kind": "class", "name": "A" }} ] }}"#
        )
        .expect("Failed to write");

        let unit = load_file(file.path()).expect("Failed to load");
        assert_eq!(unit.path(), Path::new("src/A.cs"));
        assert_eq!(unit.tree().len(), 2);
    }

    #[test]
    fn load_file_reports_missing_path() {
        let err = load_file(Path::new("/nonexistent/A.unit.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/A.unit.json"));
    }
}

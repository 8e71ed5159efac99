use std::fs;
use std::path::{Path, PathBuf};

use crate::io::state::atomic_write;
use crate::model::project::Project;

/// Error type for document I/O
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize document: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Load a document from a JSON file
pub fn load_document(path: &Path) -> Result<Project, DocumentError> {
    let text = fs::read_to_string(path).map_err(|e| DocumentError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let project: Project = serde_json::from_str(&text).map_err(|e| DocumentError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(
        path = %path.display(),
        pages = project.pages.len(),
        assets = project.assets.len(),
        "document loaded"
    );
    Ok(project)
}

/// Write a document back as pretty JSON
pub fn save_document(path: &Path, project: &Project) -> Result<(), DocumentError> {
    let mut content = serde_json::to_string_pretty(project)?;
    content.push('\n');
    atomic_write(path, content.as_bytes()).map_err(|e| DocumentError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::test_fixtures::sample_project;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn save_then_load_keeps_column_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        let project = sample_project();

        save_document(&path, &project).unwrap();
        let loaded = load_document(&path).unwrap();
        assert_eq!(loaded.asset_ids(), vec!["photo", "body", "count"]);
        assert_eq!(loaded, project);
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = load_document(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, DocumentError::ReadError { .. }));
    }

    #[test]
    fn unknown_asset_type_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(
            &path,
            r#"{"pages":[],"assets":{"a":{"id":"a","name":"A","defaults":{"type":"audio"}}}}"#,
        )
        .unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(err.to_string().starts_with("could not parse"));
    }
}

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Document not found at {0}")]
    NotFound(PathBuf),

    #[error("Failed to read document at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Reads the markdown document to display.
pub fn load_document(path: &Path) -> Result<String, SourceError> {
    if !path.is_file() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lesson.md");
        std::fs::write(&path, "# Lesson\n").unwrap();

        assert_eq!(load_document(&path).unwrap(), "# Lesson\n");
    }

    #[test]
    fn test_missing_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.md");

        assert!(matches!(load_document(&path), Err(SourceError::NotFound(p)) if p == path));
    }

    #[test]
    fn test_directory_is_not_a_document() {
        let temp_dir = TempDir::new().unwrap();

        assert!(matches!(
            load_document(temp_dir.path()),
            Err(SourceError::NotFound(_))
        ));
    }

    #[test]
    fn test_non_utf8_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary.md");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(load_document(&path), Err(SourceError::Read { .. })));
    }
}

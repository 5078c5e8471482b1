use crate::editing::Document;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File is not valid UTF-8: {path}: {source}")]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },
}

/// Read a whole Makefile into a document
pub fn read_document(path: &Path) -> Result<Document, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    let doc = Document::from_bytes(&bytes).map_err(|source| IoError::Encoding {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("read {} lines from {}", doc.line_count(), path.display());
    Ok(doc)
}

/// Write the document out, replacing any existing file
pub fn write_document(path: &Path, doc: &Document) -> Result<(), IoError> {
    fs::write(path, doc.to_bytes())?;
    log::info!("wrote {} lines to {}", doc.line_count(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_dir, create_test_file};

    #[test]
    fn test_read_document_success() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "Makefile", "CC = gcc\n\nall:\n");

        let doc = read_document(&path).unwrap();
        assert_eq!(doc.text(), "CC = gcc\n\nall:\n");
        assert_eq!(doc.line_count(), 3);
    }

    #[test]
    fn test_read_document_not_found() {
        let dir = create_test_dir();
        let result = read_document(&dir.path().join("Makefile"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_read_document_rejects_binary() {
        let dir = create_test_dir();
        let path = dir.path().join("Makefile");
        fs::write(&path, b"CC = gcc\n\xfe\xff\n").unwrap();

        let err = read_document(&path).unwrap_err();
        match &err {
            IoError::Encoding { source, .. } => assert_eq!(source.valid_up_to(), 9),
            other => panic!("expected encoding error, got {other:?}"),
        }
        assert!(err.to_string().contains("UTF-8"));
        assert!(err.to_string().contains("index 9"));
    }

    #[test]
    fn test_write_document_overwrites_existing() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "Makefile.msvc", "stale contents\n");

        let doc = Document::from("CC = cl\r\n");
        write_document(&path, &doc).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"CC = cl\r\n");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = create_test_dir();
        let path = dir.path().join("missing").join("Makefile.msvc");

        let result = write_document(&path, &Document::from("x\n"));
        assert!(matches!(result, Err(IoError::Io(_))));
    }
}

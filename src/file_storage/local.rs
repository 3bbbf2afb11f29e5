//! # Local Directory Backend
//!
//! One blob per regular file directly inside the root directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::backend::BlobStore;
use super::errors::{validate_name, StorageError, StorageResult};

/// Directory-backed blob store
#[derive(Debug)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    /// Create a new local backend rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, name: &str) -> StorageResult<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }
}

fn map_io(name: &str, e: io::Error) -> StorageError {
    if e.kind() == io::ErrorKind::NotFound {
        StorageError::ObjectNotFound(name.to_string())
    } else {
        StorageError::IoError(e.to_string())
    }
}

impl BlobStore for LocalBackend {
    fn list(&self) -> StorageResult<Vec<String>> {
        let mut results = Vec::new();

        if !self.root.is_dir() {
            return Ok(results);
        }

        for entry in fs::read_dir(&self.root).map_err(|e| StorageError::IoError(e.to_string()))? {
            let entry = entry.map_err(|e| StorageError::IoError(e.to_string()))?;
            let is_file = entry
                .file_type()
                .map(|t| t.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                results.push(name.to_string());
            }
        }

        results.sort();
        Ok(results)
    }

    fn read(&self, name: &str) -> StorageResult<Vec<u8>> {
        let path = self.full_path(name)?;
        fs::read(&path).map_err(|e| map_io(name, e))
    }

    fn write(&self, name: &str, data: &[u8]) -> StorageResult<()> {
        let path = self.full_path(name)?;

        fs::create_dir_all(&self.root).map_err(|e| StorageError::IoError(e.to_string()))?;
        fs::write(&path, data).map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn exists(&self, name: &str) -> StorageResult<bool> {
        Ok(self.full_path(name)?.is_file())
    }

    fn delete(&self, name: &str) -> StorageResult<()> {
        let path = self.full_path(name)?;
        fs::remove_file(&path).map_err(|e| map_io(name, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_read() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path());

        backend.write("t.csv", b"a,b\n1,2\n").unwrap();
        assert_eq!(backend.read("t.csv").unwrap(), b"a,b\n1,2\n");
    }

    #[test]
    fn test_write_replaces() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path());

        backend.write("t.csv", b"old").unwrap();
        backend.write("t.csv", b"new").unwrap();
        assert_eq!(backend.read("t.csv").unwrap(), b"new");
    }

    #[test]
    fn test_write_creates_missing_root() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().join("resources"));

        backend.write("t.csv", b"a\n").unwrap();
        assert!(backend.exists("t.csv").unwrap());
    }

    #[test]
    fn test_list_skips_directories() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path());

        backend.write("b.csv", b"x").unwrap();
        backend.write("a.txt", b"x").unwrap();
        fs::create_dir(temp.path().join("sub.csv")).unwrap();

        assert_eq!(backend.list().unwrap(), vec!["a.txt", "b.csv"]);
    }

    #[test]
    fn test_list_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().join("nope"));
        assert!(backend.list().unwrap().is_empty());
    }

    #[test]
    fn test_delete() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path());

        backend.write("delete-me.csv", b"bye").unwrap();
        backend.delete("delete-me.csv").unwrap();
        assert!(!backend.exists("delete-me.csv").unwrap());

        let result = backend.delete("delete-me.csv");
        assert!(matches!(result, Err(StorageError::ObjectNotFound(_))));
    }

    #[test]
    fn test_not_found() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path());

        let result = backend.read("nonexistent.csv");
        assert!(matches!(result, Err(StorageError::ObjectNotFound(_))));
    }

    #[test]
    fn test_rejects_traversal() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().join("root"));

        let result = backend.write("../escape.csv", b"x");
        assert!(matches!(result, Err(StorageError::InvalidPath(_))));
    }
}

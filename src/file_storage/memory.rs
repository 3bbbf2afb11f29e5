//! # In-Memory Backend

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::backend::BlobStore;
use super::errors::{validate_name, StorageError, StorageResult};

/// Blob store held in a map, for tests and ephemeral catalogs
#[derive(Debug, Default)]
pub struct MemoryBackend {
    blobs: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a backend with blobs
    pub fn with_blobs<I, N, D>(blobs: I) -> Self
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: Into<Vec<u8>>,
    {
        let map = blobs
            .into_iter()
            .map(|(name, data)| (name.into(), data.into()))
            .collect();
        Self {
            blobs: RwLock::new(map),
        }
    }
}

fn poisoned() -> StorageError {
    StorageError::IoError("blob map lock poisoned".to_string())
}

impl BlobStore for MemoryBackend {
    fn list(&self) -> StorageResult<Vec<String>> {
        let blobs = self.blobs.read().map_err(|_| poisoned())?;
        Ok(blobs.keys().cloned().collect())
    }

    fn read(&self, name: &str) -> StorageResult<Vec<u8>> {
        validate_name(name)?;
        let blobs = self.blobs.read().map_err(|_| poisoned())?;
        blobs
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::ObjectNotFound(name.to_string()))
    }

    fn write(&self, name: &str, data: &[u8]) -> StorageResult<()> {
        validate_name(name)?;
        let mut blobs = self.blobs.write().map_err(|_| poisoned())?;
        blobs.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn exists(&self, name: &str) -> StorageResult<bool> {
        validate_name(name)?;
        let blobs = self.blobs.read().map_err(|_| poisoned())?;
        Ok(blobs.contains_key(name))
    }

    fn delete(&self, name: &str) -> StorageResult<()> {
        validate_name(name)?;
        let mut blobs = self.blobs.write().map_err(|_| poisoned())?;
        blobs
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StorageError::ObjectNotFound(name.to_string()))
    }
}

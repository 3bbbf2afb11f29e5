//! # Blob Store Trait

use super::errors::StorageResult;

/// Flat, name-keyed byte storage
pub trait BlobStore: Send + Sync + std::fmt::Debug {
    /// Names of all stored blobs
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Read a blob; `ObjectNotFound` if absent
    fn read(&self, name: &str) -> StorageResult<Vec<u8>>;

    /// Create or replace a blob
    fn write(&self, name: &str, data: &[u8]) -> StorageResult<()>;

    /// Check if a blob exists
    fn exists(&self, name: &str) -> StorageResult<bool>;

    /// Remove a blob; `ObjectNotFound` if absent
    fn delete(&self, name: &str) -> StorageResult<()>;
}

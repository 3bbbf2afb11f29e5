//! # Blob Storage
//!
//! Name-keyed byte storage behind the table catalog. The catalog only
//! sees the `BlobStore` trait; a directory and an in-memory backend are
//! provided.

pub mod backend;
pub mod errors;
pub mod local;
pub mod memory;

pub use backend::BlobStore;
pub use errors::{StorageError, StorageResult};
pub use local::LocalBackend;
pub use memory::MemoryBackend;

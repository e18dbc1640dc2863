//! Key-value persistence backends for BookBuddy.
//!
//! A backend stores whole serialized documents under string keys. The
//! document is always replaced wholesale; there are no partial updates and
//! no locking, so a single active writer is assumed.

use async_trait::async_trait;
use thiserror::Error;

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// Failures surfaced by a persistence backend or by document (de)serialization.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to read key '{key}'")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write key '{key}'")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode document for key '{key}'")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("corrupted document under key '{key}'")]
    Corrupted {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Injected persistence seam for the stores.
///
/// Implementations must tolerate concurrent reads but may assume writes are
/// never issued concurrently against the same key.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    /// Read the document stored under `key`, or `None` if the key is absent.
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the document stored under `key`.
    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the document stored under `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

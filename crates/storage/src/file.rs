use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::{KeyValueBackend, StorageError};

/// File-per-key backend: each key maps to `<root>/<key>.json`.
///
/// The root directory is created lazily on first write.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueBackend for FileBackend {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let map_err = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };
        tokio::fs::create_dir_all(&self.root).await.map_err(map_err)?;
        tokio::fs::write(self.path_for(key), value)
            .await
            .map_err(map_err)
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write {
                key: key.to_string(),
                source,
            }),
        }
    }
}

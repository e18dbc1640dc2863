use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{KeyValueBackend, StorageError};

/// In-memory backend used as the test double and for throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueBackend for MemoryBackend {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().expect("memory backend lock poisoned");
        Ok(entries.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().expect("memory backend lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().expect("memory backend lock poisoned");
        entries.remove(key);
        Ok(())
    }
}

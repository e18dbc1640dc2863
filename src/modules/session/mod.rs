//! Placeholder session marker gating the collection view.
//!
//! Identity verification belongs to an external collaborator; this store
//! persists whatever profile the caller resolved and only rejects obviously
//! malformed input. It confers no ownership over books.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::{NoContext, Timestamp, Uuid};

use bookbuddy_storage::{KeyValueBackend, StorageError};

use crate::error::{StoreError, StoreResult};

/// The current-user marker persisted under its own storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl Session {
    /// Build a session with a generated identifier.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v7(Timestamp::now(NoContext)).to_string(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Persists and clears the session marker.
pub struct SessionStore {
    backend: Arc<dyn KeyValueBackend>,
    key: String,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Persist the marker for the signed-in user.
    pub async fn sign_in(&self, session: Session) -> StoreResult<Session> {
        let mut details = Vec::new();
        if session.name.trim().is_empty() {
            details.push(json!({"field": "name", "error": "required"}));
        }
        if !(session.email.contains('@') && session.email.contains('.')) {
            details.push(json!({"field": "email", "error": "must be a valid email"}));
        }
        if !details.is_empty() {
            return Err(StoreError::validation(details, "invalid session profile"));
        }

        let raw = serde_json::to_string(&session).map_err(|source| {
            StoreError::Storage(StorageError::Encode {
                key: self.key.clone(),
                source,
            })
        })?;
        self.backend.write(&self.key, &raw).await?;

        tracing::info!(user = %session.name, "session started");
        Ok(session)
    }

    /// Current signed-in user, if any. A missing key means signed out.
    pub async fn current(&self) -> StoreResult<Option<Session>> {
        match self.backend.read(&self.key).await? {
            Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|source| {
                StoreError::Storage(StorageError::Corrupted {
                    key: self.key.clone(),
                    source,
                })
            }),
            None => Ok(None),
        }
    }

    /// Clear the marker. Signing out while signed out is fine.
    pub async fn sign_out(&self) -> StoreResult<()> {
        self.backend.remove(&self.key).await?;
        tracing::info!("session ended");
        Ok(())
    }
}

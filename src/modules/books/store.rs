use std::sync::Arc;

use time::OffsetDateTime;
use uuid::{NoContext, Timestamp, Uuid};

use bookbuddy_storage::{KeyValueBackend, StorageError};

use crate::error::{StoreError, StoreResult};

use super::models::{Book, BookPatch, NewBook};

/// CRUD facade over the persisted book collection.
///
/// The collection round-trips as one JSON array under a fixed storage key;
/// a missing key reads as the empty collection. Every mutation is a full
/// read-modify-write, so a single active writer is assumed (last write wins
/// otherwise). Persisted order is insertion order; display order is derived
/// by the view pipeline and never written back.
pub struct BookStore {
    backend: Arc<dyn KeyValueBackend>,
    key: String,
}

impl BookStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    async fn load(&self) -> StoreResult<Vec<Book>> {
        match self.backend.read(&self.key).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| {
                StoreError::Storage(StorageError::Corrupted {
                    key: self.key.clone(),
                    source,
                })
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn persist(&self, books: &[Book]) -> StoreResult<()> {
        let raw = serde_json::to_string(books).map_err(|source| {
            StoreError::Storage(StorageError::Encode {
                key: self.key.clone(),
                source,
            })
        })?;
        self.backend.write(&self.key, &raw).await?;
        Ok(())
    }

    /// Full collection in insertion order.
    pub async fn list(&self) -> StoreResult<Vec<Book>> {
        self.load().await
    }

    /// Look up one record; absence is not an error.
    pub async fn get(&self, id: Uuid) -> StoreResult<Option<Book>> {
        Ok(self.load().await?.into_iter().find(|book| book.id == id))
    }

    /// Validate the draft, assign id and creation timestamp, append, persist.
    pub async fn create(&self, draft: NewBook) -> StoreResult<Book> {
        let details = draft.validate();
        if !details.is_empty() {
            return Err(StoreError::validation(details, "invalid book fields"));
        }

        let mut books = self.load().await?;
        let book = Book {
            id: Uuid::new_v7(Timestamp::now(NoContext)),
            title: draft.title,
            author: draft.author,
            description: draft.description,
            cover_url: draft.cover_url,
            genre: draft.genre,
            publish_year: draft.publish_year,
            pages_count: draft.pages_count,
            is_read: draft.is_read,
            date_added: OffsetDateTime::now_utc(),
        };
        books.push(book.clone());
        self.persist(&books).await?;

        tracing::info!(book_id = %book.id, title = %book.title, "book created");
        Ok(book)
    }

    /// Merge the patch over the matching record; id and timestamp preserved.
    ///
    /// An unknown id is reported before the patch is validated.
    pub async fn update(&self, id: Uuid, patch: BookPatch) -> StoreResult<Book> {
        let mut books = self.load().await?;
        let Some(book) = books.iter_mut().find(|book| book.id == id) else {
            return Err(StoreError::not_found(format!("no book with id {id}")));
        };

        let details = patch.validate();
        if !details.is_empty() {
            return Err(StoreError::validation(details, "invalid book fields"));
        }

        patch.apply(book);
        let updated = book.clone();
        self.persist(&books).await?;

        tracing::info!(book_id = %id, "book updated");
        Ok(updated)
    }

    /// Remove the matching record.
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut books = self.load().await?;
        let len_before = books.len();
        books.retain(|book| book.id != id);
        if books.len() == len_before {
            return Err(StoreError::not_found(format!("no book with id {id}")));
        }
        self.persist(&books).await?;

        tracing::info!(book_id = %id, "book deleted");
        Ok(())
    }

    /// Flip the read flag on the matching record.
    pub async fn toggle_read(&self, id: Uuid) -> StoreResult<Book> {
        let mut books = self.load().await?;
        let Some(book) = books.iter_mut().find(|book| book.id == id) else {
            return Err(StoreError::not_found(format!("no book with id {id}")));
        };
        book.is_read = !book.is_read;
        let updated = book.clone();
        self.persist(&books).await?;

        tracing::info!(book_id = %id, is_read = updated.is_read, "read status toggled");
        Ok(updated)
    }
}

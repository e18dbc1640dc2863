use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use time::OffsetDateTime;
use url::Url;
use uuid::Uuid;

/// Curated genre list surfaced by presentation pickers.
///
/// The `genre` field itself is free text; records are not required to use
/// one of these values.
pub const GENRES: &[&str] = &[
    "Fiction",
    "Non-Fiction",
    "Science Fiction",
    "Fantasy",
    "Mystery",
    "Thriller",
    "Romance",
    "Historical",
    "Biography",
    "Self-Help",
    "Business",
    "Other",
];

/// One book entry in the collection.
///
/// Serialized camelCase to match the legacy storage format; optional fields
/// are omitted when absent. `id` and `date_added` are assigned at creation
/// and never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages_count: Option<u32>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub date_added: OffsetDateTime,
}

/// Fields accepted when creating a book; everything but id and timestamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub publish_year: Option<i32>,
    #[serde(default)]
    pub pages_count: Option<u32>,
    #[serde(default)]
    pub is_read: bool,
}

impl NewBook {
    /// Minimal constructor for the required fields.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Vec<Value> {
        let mut details = Vec::new();
        if self.title.trim().is_empty() {
            details.push(json!({"field": "title", "error": "required"}));
        }
        if self.author.trim().is_empty() {
            details.push(json!({"field": "author", "error": "required"}));
        }
        details.extend(validate_optional_fields(
            self.cover_url.as_deref(),
            self.publish_year,
            self.pages_count,
        ));
        details
    }
}

/// Partial update merged over an existing record.
///
/// `None` leaves the field untouched; clearing an optional field is not
/// supported. Identifier and creation timestamp are not patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub publish_year: Option<i32>,
    #[serde(default)]
    pub pages_count: Option<u32>,
    #[serde(default)]
    pub is_read: Option<bool>,
}

impl BookPatch {
    pub(crate) fn validate(&self) -> Vec<Value> {
        let mut details = Vec::new();
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                details.push(json!({"field": "title", "error": "must not be empty"}));
            }
        }
        if let Some(author) = &self.author {
            if author.trim().is_empty() {
                details.push(json!({"field": "author", "error": "must not be empty"}));
            }
        }
        details.extend(validate_optional_fields(
            self.cover_url.as_deref(),
            self.publish_year,
            self.pages_count,
        ));
        details
    }

    pub(crate) fn apply(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(description) = self.description {
            book.description = Some(description);
        }
        if let Some(cover_url) = self.cover_url {
            book.cover_url = Some(cover_url);
        }
        if let Some(genre) = self.genre {
            book.genre = Some(genre);
        }
        if let Some(publish_year) = self.publish_year {
            book.publish_year = Some(publish_year);
        }
        if let Some(pages_count) = self.pages_count {
            book.pages_count = Some(pages_count);
        }
        if let Some(is_read) = self.is_read {
            book.is_read = is_read;
        }
    }
}

fn validate_optional_fields(
    cover_url: Option<&str>,
    publish_year: Option<i32>,
    pages_count: Option<u32>,
) -> Vec<Value> {
    let mut details = Vec::new();
    if let Some(url) = cover_url {
        // Empty string means "no cover"; anything else must parse.
        if !url.is_empty() && Url::parse(url).is_err() {
            details.push(json!({"field": "coverUrl", "error": "must be a valid URL"}));
        }
    }
    if let Some(year) = publish_year {
        let current = OffsetDateTime::now_utc().year();
        if year <= 0 || year > current {
            details.push(json!({
                "field": "publishYear",
                "error": format!("must be a positive year no later than {current}"),
            }));
        }
    }
    if let Some(pages) = pages_count {
        if pages == 0 {
            details.push(json!({"field": "pagesCount", "error": "must be positive"}));
        }
    }
    details
}

//! Pure derivation of the displayed shelf from the full collection.
//!
//! Nothing here touches the backend; the pipeline is synchronous,
//! deterministic, and cheap enough to recompute on every input change.

use serde::{Deserialize, Serialize};

use super::models::Book;

/// Read-status filter over the shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadFilter {
    #[default]
    All,
    Read,
    Unread,
}

/// Display sort key. Dates sort newest first; text keys ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Title,
    Author,
    #[default]
    DateAdded,
}

/// Current dashboard inputs. Filters compose with AND; sort runs last.
#[derive(Debug, Clone, Default)]
pub struct BookQuery {
    /// Case-insensitive substring over title or author; empty matches all.
    pub search: String,
    /// Exact genre match; `None` matches everything, genre-less records included.
    pub genre: Option<String>,
    pub read: ReadFilter,
    pub sort: SortKey,
}

/// Derive the displayed subset and order. Stable: equal sort keys keep
/// their relative collection order.
pub fn derive_view<'a>(books: &'a [Book], query: &BookQuery) -> Vec<&'a Book> {
    let needle = query.search.trim().to_lowercase();

    let mut shelf: Vec<&Book> = books
        .iter()
        .filter(|book| {
            needle.is_empty()
                || book.title.to_lowercase().contains(&needle)
                || book.author.to_lowercase().contains(&needle)
        })
        .filter(|book| match &query.genre {
            Some(genre) => book.genre.as_deref() == Some(genre.as_str()),
            None => true,
        })
        .filter(|book| match query.read {
            ReadFilter::All => true,
            ReadFilter::Read => book.is_read,
            ReadFilter::Unread => !book.is_read,
        })
        .collect();

    match query.sort {
        SortKey::Title => shelf.sort_by_key(|book| book.title.to_lowercase()),
        SortKey::Author => shelf.sort_by_key(|book| book.author.to_lowercase()),
        SortKey::DateAdded => shelf.sort_by(|a, b| b.date_added.cmp(&a.date_added)),
    }

    shelf
}

/// Shelf totals shown in the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShelfCounts {
    pub all: usize,
    pub read: usize,
    pub unread: usize,
}

pub fn shelf_counts(books: &[Book]) -> ShelfCounts {
    let read = books.iter().filter(|book| book.is_read).count();
    ShelfCounts {
        all: books.len(),
        read,
        unread: books.len() - read,
    }
}

/// Genres present in the collection, deduplicated in first-seen order.
pub fn genres_in(books: &[Book]) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    for book in books {
        if let Some(genre) = &book.genre {
            if !genres.iter().any(|seen| seen == genre) {
                genres.push(genre.clone());
            }
        }
    }
    genres
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::{NoContext, Timestamp, Uuid};

    fn book(title: &str, author: &str, added_secs: i64) -> Book {
        Book {
            id: Uuid::new_v7(Timestamp::now(NoContext)),
            title: title.to_string(),
            author: author.to_string(),
            description: None,
            cover_url: None,
            genre: None,
            publish_year: None,
            pages_count: None,
            is_read: false,
            date_added: OffsetDateTime::from_unix_timestamp(1_700_000_000 + added_secs).unwrap(),
        }
    }

    fn shelf() -> Vec<Book> {
        let mut dune = book("Dune", "Frank Herbert", 0);
        dune.genre = Some("Science Fiction".to_string());
        dune.is_read = true;

        let mut emma = book("Emma", "Jane Austen", 10);
        emma.genre = Some("Romance".to_string());

        let hobbit = book("The Hobbit", "J.R.R. Tolkien", 20);

        vec![dune, emma, hobbit]
    }

    fn titles(view: &[&Book]) -> Vec<String> {
        view.iter().map(|book| book.title.clone()).collect()
    }

    #[test]
    fn empty_query_keeps_everything_newest_first() {
        let books = shelf();
        let view = derive_view(&books, &BookQuery::default());
        assert_eq!(titles(&view), ["The Hobbit", "Emma", "Dune"]);
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_author() {
        let books = shelf();
        let by_title = derive_view(
            &books,
            &BookQuery {
                search: "dune".to_string(),
                ..BookQuery::default()
            },
        );
        assert_eq!(titles(&by_title), ["Dune"]);

        let by_author = derive_view(
            &books,
            &BookQuery {
                search: "AUSTEN".to_string(),
                ..BookQuery::default()
            },
        );
        assert_eq!(titles(&by_author), ["Emma"]);
    }

    #[test]
    fn genre_filter_matches_exactly_and_none_passes_genreless() {
        let books = shelf();
        let romance = derive_view(
            &books,
            &BookQuery {
                genre: Some("Romance".to_string()),
                ..BookQuery::default()
            },
        );
        assert_eq!(titles(&romance), ["Emma"]);

        let all = derive_view(&books, &BookQuery::default());
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn read_filter_partitions_the_shelf() {
        let books = shelf();
        let read = derive_view(
            &books,
            &BookQuery {
                read: ReadFilter::Read,
                ..BookQuery::default()
            },
        );
        assert_eq!(titles(&read), ["Dune"]);

        let unread = derive_view(
            &books,
            &BookQuery {
                read: ReadFilter::Unread,
                ..BookQuery::default()
            },
        );
        assert_eq!(unread.len(), 2);
    }

    #[test]
    fn filters_compose_with_and() {
        let books = shelf();
        let view = derive_view(
            &books,
            &BookQuery {
                search: "e".to_string(),
                genre: Some("Science Fiction".to_string()),
                read: ReadFilter::Read,
                sort: SortKey::Title,
            },
        );
        assert_eq!(titles(&view), ["Dune"]);
    }

    #[test]
    fn title_sort_is_case_insensitive_ascending() {
        let books = vec![
            book("the hobbit", "x", 0),
            book("Dune", "y", 1),
            book("Emma", "z", 2),
        ];
        let view = derive_view(
            &books,
            &BookQuery {
                sort: SortKey::Title,
                ..BookQuery::default()
            },
        );
        assert_eq!(titles(&view), ["Dune", "Emma", "the hobbit"]);
    }

    #[test]
    fn title_sort_is_stable_for_equal_titles() {
        let first = book("Dune", "Frank Herbert", 0);
        let second = book("Dune", "Brian Herbert", 10);
        let books = vec![first.clone(), second.clone()];

        let view = derive_view(
            &books,
            &BookQuery {
                sort: SortKey::Title,
                ..BookQuery::default()
            },
        );
        assert_eq!(view[0].id, first.id);
        assert_eq!(view[1].id, second.id);
    }

    #[test]
    fn pipeline_is_pure() {
        let books = shelf();
        let query = BookQuery {
            search: "e".to_string(),
            sort: SortKey::Author,
            ..BookQuery::default()
        };
        let once = derive_view(&books, &query);
        let twice = derive_view(&books, &query);
        assert_eq!(once, twice);
    }

    #[test]
    fn counts_partition_the_collection() {
        let books = shelf();
        let counts = shelf_counts(&books);
        assert_eq!(counts.all, 3);
        assert_eq!(counts.read, 1);
        assert_eq!(counts.unread, 2);

        let empty = shelf_counts(&[]);
        assert_eq!(
            empty,
            ShelfCounts {
                all: 0,
                read: 0,
                unread: 0
            }
        );
    }

    #[test]
    fn genres_deduplicate_in_first_seen_order() {
        let mut books = shelf();
        books.push({
            let mut extra = book("Children of Dune", "Frank Herbert", 30);
            extra.genre = Some("Science Fiction".to_string());
            extra
        });

        assert_eq!(genres_in(&books), ["Science Fiction", "Romance"]);
    }
}

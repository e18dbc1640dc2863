pub mod models;
pub mod store;
pub mod view;

pub use models::{Book, BookPatch, NewBook, GENRES};
pub use store::BookStore;
pub use view::{derive_view, genres_in, shelf_counts, BookQuery, ReadFilter, ShelfCounts, SortKey};

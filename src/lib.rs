//! BookBuddy Application Library
//!
//! Personal book-collection tracking: a session marker gates access to a
//! persisted collection of book records with a pure filter/sort pipeline
//! deriving the displayed shelf. Persistence goes through the injected
//! key-value backend from `bookbuddy-storage`.

pub mod error;
pub mod modules;

/// Re-export commonly used types
pub use error::{StoreError, StoreResult};
pub use modules::*;

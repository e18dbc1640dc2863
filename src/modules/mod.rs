pub mod books;
pub mod session;

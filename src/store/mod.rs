//! In-memory storage layer

pub mod books;

pub use books::{BookStore, StoreError};

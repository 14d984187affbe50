//! Bookshelf service
//!
//! Wraps the in-memory [`BookStore`] behind an `RwLock` and maps the store's
//! typed errors to HTTP-facing [`AppError`]s with per-operation messages.
//! The lock is what makes read-modify-write sequences safe under axum's
//! concurrent request handling.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFilter, BookPayload, BookSummary},
    store::{BookStore, StoreError},
};

#[derive(Clone)]
pub struct BookService {
    store: Arc<RwLock<BookStore>>,
}

impl BookService {
    pub fn new(store: Arc<RwLock<BookStore>>) -> Self {
        Self { store }
    }

    /// Add a new book and return its generated id
    pub async fn add_book(&self, payload: BookPayload) -> AppResult<String> {
        let mut store = self.store.write().await;
        let id = store
            .insert(payload, Utc::now())
            .map_err(|e| Self::operation_error("add", e))?;
        tracing::debug!(book_id = %id, "book added");
        Ok(id)
    }

    /// List books matching the filter, projected to summaries
    pub async fn list_books(&self, filter: &BookFilter) -> Vec<BookSummary> {
        self.store.read().await.list(filter)
    }

    /// Fetch the full record for one book
    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        let store = self.store.read().await;
        let book = store
            .get(id)
            .map_err(|_| AppError::NotFound("Book not found".to_string()))?;
        Ok(book.clone())
    }

    /// Replace the mutable fields of an existing book
    pub async fn update_book(&self, id: &str, payload: BookPayload) -> AppResult<()> {
        let mut store = self.store.write().await;
        store
            .update(id, payload, Utc::now())
            .map_err(|e| Self::operation_error("update", e))
    }

    /// Remove a book from the shelf
    pub async fn delete_book(&self, id: &str) -> AppResult<()> {
        let mut store = self.store.write().await;
        store
            .remove(id)
            .map_err(|e| Self::operation_error("delete", e))
    }

    /// Compose the user-facing failure message for a store error. The
    /// operation name keeps messages specific ("Failed to add book. ...",
    /// "Failed to update book. ...").
    fn operation_error(operation: &str, err: StoreError) -> AppError {
        match err {
            StoreError::MissingName => AppError::Validation(format!(
                "Failed to {operation} book. Please provide a book name"
            )),
            StoreError::PageRangeExceeded => AppError::Validation(format!(
                "Failed to {operation} book. readPage must not be greater than pageCount"
            )),
            StoreError::NotFound(_) => {
                AppError::NotFound(format!("Failed to {operation} book. Id not found"))
            }
            StoreError::InsertLost => AppError::Internal("Book could not be added".to_string()),
        }
    }
}

//! Business logic services

pub mod books;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::store::BookStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BookService,
}

impl Services {
    /// Create all services around a shared book store
    pub fn new(store: BookStore) -> Self {
        let store = Arc::new(RwLock::new(store));
        Self {
            books: books::BookService::new(store),
        }
    }
}

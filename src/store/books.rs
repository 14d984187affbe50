//! In-memory book store.
//!
//! Owns the ordered collection of book records and all validation and
//! filtering logic. The store itself is synchronous and does no locking;
//! the service layer wraps it in an `RwLock` so that concurrent handlers
//! cannot interleave read-modify-write sequences.

use chrono::{DateTime, Utc};
use rand::{distributions::Alphanumeric, Rng};
use thiserror::Error;

use crate::models::book::{Book, BookFilter, BookPayload, BookSummary};

/// Length of generated book ids
const ID_LEN: usize = 16;

/// Typed failure kinds for store operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("name is required")]
    MissingName,

    #[error("readPage must not be greater than pageCount")]
    PageRangeExceeded,

    #[error("no book with id {0}")]
    NotFound(String),

    #[error("inserted book could not be read back")]
    InsertLost,
}

/// Ordered collection of book records. Insertion order is preserved across
/// updates and deletes, and carries through to list projections.
#[derive(Debug, Default)]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    pub fn new() -> Self {
        Self { books: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Validation gate shared by insert and update. Checks run in order and
    /// stop at the first failure: missing or empty name, then
    /// `read_page > page_count`. Returns the validated name.
    fn validate(payload: &BookPayload) -> Result<&str, StoreError> {
        let name = payload
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(StoreError::MissingName)?;
        if payload.read_page > payload.page_count {
            return Err(StoreError::PageRangeExceeded);
        }
        Ok(name)
    }

    /// Add a new record and return its generated id.
    ///
    /// `finished` is derived from the page counts, and `inserted_at` /
    /// `updated_at` are both stamped with `now`. The record is appended, so
    /// later listings see books in insertion order.
    pub fn insert(
        &mut self,
        payload: BookPayload,
        now: DateTime<Utc>,
    ) -> Result<String, StoreError> {
        let name = Self::validate(&payload)?.to_string();

        let id = generate_id();
        let finished = payload.page_count == payload.read_page;

        self.books.push(Book {
            id: id.clone(),
            name,
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            finished,
            reading: payload.reading,
            inserted_at: now,
            updated_at: now,
        });

        // Read back what was just appended; a miss means the record was lost.
        if self.books.iter().any(|book| book.id == id) {
            Ok(id)
        } else {
            Err(StoreError::InsertLost)
        }
    }

    /// List books as `{id, name, publisher}` projections, in store order.
    ///
    /// Filter keys are applied single-match-wins rather than combined:
    /// a `name` constraint wins over `reading`, which wins over `finished`.
    /// No constraint means every record is returned.
    pub fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        let books = self.books.iter();

        let selected: Vec<&Book> = if let Some(needle) = filter.name.as_deref() {
            let needle = needle.to_lowercase();
            books
                .filter(|book| book.name.to_lowercase().contains(&needle))
                .collect()
        } else if let Some(reading) = filter.reading {
            books.filter(|book| book.reading == reading).collect()
        } else if let Some(finished) = filter.finished {
            books.filter(|book| book.finished == finished).collect()
        } else {
            books.collect()
        };

        selected.into_iter().map(BookSummary::from).collect()
    }

    /// Fetch the full record for `id`.
    pub fn get(&self, id: &str) -> Result<&Book, StoreError> {
        self.books
            .iter()
            .find(|book| book.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Replace the mutable fields of an existing record.
    ///
    /// The validation gate is the same as on insert and runs before the
    /// existence check, so an invalid payload against an unknown id reports
    /// the validation failure. `id` and `inserted_at` are preserved;
    /// `finished` is recomputed and `updated_at` set to `now`.
    pub fn update(
        &mut self,
        id: &str,
        payload: BookPayload,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let name = Self::validate(&payload)?.to_string();

        let book = self
            .books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        book.name = name;
        book.year = payload.year;
        book.author = payload.author;
        book.summary = payload.summary;
        book.publisher = payload.publisher;
        book.page_count = payload.page_count;
        book.read_page = payload.read_page;
        book.finished = payload.page_count == payload.read_page;
        book.reading = payload.reading;
        book.updated_at = now;

        Ok(())
    }

    /// Delete the record with `id`, keeping the relative order of the rest.
    pub fn remove(&mut self, id: &str) -> Result<(), StoreError> {
        let index = self
            .books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.books.remove(index);
        Ok(())
    }
}

/// Generate a 16-character random alphanumeric identifier. With 62^16
/// possible values, collisions are negligible at this scale and the store
/// does not re-check.
fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, page_count: u32, read_page: u32) -> BookPayload {
        BookPayload {
            name: Some(name.to_string()),
            year: Some(2010),
            author: Some("John Doe".to_string()),
            summary: Some("Lorem ipsum dolor sit amet".to_string()),
            publisher: Some("Dicoding Indonesia".to_string()),
            page_count,
            read_page,
            reading: false,
        }
    }

    #[test]
    fn insert_then_get_returns_the_record() {
        let mut store = BookStore::new();
        let now = Utc::now();

        let id = store.insert(payload("Buku A", 100, 25), now).unwrap();

        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));

        let book = store.get(&id).unwrap();
        assert_eq!(book.name, "Buku A");
        assert_eq!(book.page_count, 100);
        assert_eq!(book.read_page, 25);
        assert!(!book.finished);
        assert_eq!(book.inserted_at, now);
        assert_eq!(book.updated_at, now);
    }

    #[test]
    fn insert_rejects_missing_name() {
        let mut store = BookStore::new();
        let mut input = payload("", 100, 25);
        input.name = None;

        let err = store.insert(input, Utc::now()).unwrap_err();
        assert_eq!(err, StoreError::MissingName);
        assert!(store.is_empty());
    }

    #[test]
    fn insert_rejects_empty_name() {
        let mut store = BookStore::new();

        let err = store.insert(payload("", 100, 25), Utc::now()).unwrap_err();
        assert_eq!(err, StoreError::MissingName);
    }

    #[test]
    fn insert_rejects_read_page_beyond_page_count() {
        let mut store = BookStore::new();

        let err = store
            .insert(payload("Buku A", 100, 101), Utc::now())
            .unwrap_err();
        assert_eq!(err, StoreError::PageRangeExceeded);
        assert!(store.is_empty());
    }

    #[test]
    fn missing_name_wins_over_bad_page_range() {
        let mut store = BookStore::new();
        let mut input = payload("", 100, 101);
        input.name = None;

        let err = store.insert(input, Utc::now()).unwrap_err();
        assert_eq!(err, StoreError::MissingName);
    }

    #[test]
    fn finished_is_derived_from_page_counts() {
        let mut store = BookStore::new();
        let now = Utc::now();

        let done = store.insert(payload("A", 100, 100), now).unwrap();
        let in_progress = store.insert(payload("B", 100, 50), now).unwrap();

        assert!(store.get(&done).unwrap().finished);
        assert!(!store.get(&in_progress).unwrap().finished);
    }

    #[test]
    fn list_without_filter_returns_all_in_insertion_order() {
        let mut store = BookStore::new();
        let now = Utc::now();
        let first = store.insert(payload("First", 10, 0), now).unwrap();
        let second = store.insert(payload("Second", 10, 0), now).unwrap();

        let books = store.list(&BookFilter::default());

        assert_eq!(books.len(), 2);
        assert_eq!(books[0].id, first);
        assert_eq!(books[0].name, "First");
        assert_eq!(books[0].publisher.as_deref(), Some("Dicoding Indonesia"));
        assert_eq!(books[1].id, second);
    }

    #[test]
    fn list_on_empty_store_returns_empty() {
        let store = BookStore::new();
        assert!(store.list(&BookFilter::default()).is_empty());
    }

    #[test]
    fn list_matches_name_case_insensitively() {
        let mut store = BookStore::new();
        let now = Utc::now();
        store.insert(payload("Dicoding Bootcamp", 10, 0), now).unwrap();
        store.insert(payload("Something Else", 10, 0), now).unwrap();

        let filter = BookFilter {
            name: Some("dicoding".to_string()),
            ..Default::default()
        };
        let books = store.list(&filter);

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "Dicoding Bootcamp");

        let filter = BookFilter {
            name: Some("DICODING".to_string()),
            ..Default::default()
        };
        assert_eq!(store.list(&filter).len(), 1);
    }

    #[test]
    fn list_filters_by_reading_flag() {
        let mut store = BookStore::new();
        let now = Utc::now();
        let mut reading = payload("Reading now", 10, 5);
        reading.reading = true;
        store.insert(reading, now).unwrap();
        store.insert(payload("On the shelf", 10, 5), now).unwrap();

        let filter = BookFilter {
            reading: Some(true),
            ..Default::default()
        };
        let books = store.list(&filter);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "Reading now");

        let filter = BookFilter {
            reading: Some(false),
            ..Default::default()
        };
        let books = store.list(&filter);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "On the shelf");
    }

    #[test]
    fn list_filters_by_finished_flag() {
        let mut store = BookStore::new();
        let now = Utc::now();
        store.insert(payload("A", 100, 100), now).unwrap();
        store.insert(payload("B", 100, 50), now).unwrap();

        let filter = BookFilter {
            finished: Some(true),
            ..Default::default()
        };
        let books = store.list(&filter);

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "A");
    }

    #[test]
    fn name_filter_wins_over_other_constraints() {
        let mut store = BookStore::new();
        let now = Utc::now();
        store.insert(payload("Alpha", 100, 100), now).unwrap();
        store.insert(payload("Beta", 100, 50), now).unwrap();

        // finished=false alone would pick Beta; the name key wins.
        let filter = BookFilter {
            name: Some("alpha".to_string()),
            reading: Some(true),
            finished: Some(false),
        };
        let books = store.list(&filter);

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "Alpha");
    }

    #[test]
    fn reading_filter_wins_over_finished() {
        let mut store = BookStore::new();
        let now = Utc::now();
        let mut finished_and_reading = payload("Both", 100, 100);
        finished_and_reading.reading = true;
        store.insert(finished_and_reading, now).unwrap();
        store.insert(payload("Neither", 100, 50), now).unwrap();

        let filter = BookFilter {
            name: None,
            reading: Some(true),
            finished: Some(false),
        };
        let books = store.list(&filter);

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "Both");
    }

    #[test]
    fn update_replaces_fields_and_recomputes_finished() {
        let mut store = BookStore::new();
        let created_at = Utc::now();
        let id = store.insert(payload("Before", 100, 50), created_at).unwrap();

        let later = created_at + chrono::Duration::seconds(5);
        store.update(&id, payload("After", 80, 80), later).unwrap();

        let book = store.get(&id).unwrap();
        assert_eq!(book.id, id);
        assert_eq!(book.name, "After");
        assert_eq!(book.page_count, 80);
        assert_eq!(book.read_page, 80);
        assert!(book.finished);
        assert_eq!(book.inserted_at, created_at);
        assert_eq!(book.updated_at, later);
    }

    #[test]
    fn update_applies_the_same_validation_gate() {
        let mut store = BookStore::new();
        let now = Utc::now();
        let id = store.insert(payload("Keep me", 100, 50), now).unwrap();

        let mut nameless = payload("", 100, 50);
        nameless.name = None;
        assert_eq!(
            store.update(&id, nameless, now).unwrap_err(),
            StoreError::MissingName
        );
        assert_eq!(
            store.update(&id, payload("Keep me", 100, 101), now).unwrap_err(),
            StoreError::PageRangeExceeded
        );

        // The record is untouched after failed updates.
        let book = store.get(&id).unwrap();
        assert_eq!(book.name, "Keep me");
        assert_eq!(book.read_page, 50);
    }

    #[test]
    fn update_unknown_id_fails_without_mutating_the_store() {
        let mut store = BookStore::new();
        let now = Utc::now();
        store.insert(payload("Only one", 100, 50), now).unwrap();

        let err = store
            .update("missing-id-0000ab", payload("New", 10, 0), now)
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound("missing-id-0000ab".to_string()));

        assert_eq!(store.len(), 1);
        let books = store.list(&BookFilter::default());
        assert_eq!(books[0].name, "Only one");
    }

    #[test]
    fn validation_failure_is_reported_before_unknown_id() {
        let mut store = BookStore::new();

        // Default payload has no name; the gate fires before the id lookup.
        let err = store
            .update("missing-id-0000ab", BookPayload::default(), Utc::now())
            .unwrap_err();
        assert_eq!(err, StoreError::MissingName);
    }

    #[test]
    fn remove_then_get_reports_not_found() {
        let mut store = BookStore::new();
        let now = Utc::now();
        let id = store.insert(payload("Gone soon", 10, 0), now).unwrap();

        store.remove(&id).unwrap();

        assert_eq!(store.get(&id).unwrap_err(), StoreError::NotFound(id.clone()));
        assert_eq!(store.remove(&id).unwrap_err(), StoreError::NotFound(id));
    }

    #[test]
    fn remove_preserves_order_of_remaining_records() {
        let mut store = BookStore::new();
        let now = Utc::now();
        let first = store.insert(payload("First", 10, 0), now).unwrap();
        let second = store.insert(payload("Second", 10, 0), now).unwrap();
        let third = store.insert(payload("Third", 10, 0), now).unwrap();

        store.remove(&second).unwrap();

        let books = store.list(&BookFilter::default());
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].id, first);
        assert_eq!(books[1].id, third);
    }

    #[test]
    fn generated_ids_are_unique_across_inserts() {
        let mut store = BookStore::new();
        let now = Utc::now();
        let mut ids = std::collections::HashSet::new();
        for i in 0..100 {
            let id = store.insert(payload(&format!("Book {i}"), 10, 0), now).unwrap();
            assert!(ids.insert(id));
        }
        assert_eq!(store.len(), 100);
    }
}

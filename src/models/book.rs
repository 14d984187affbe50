//! Book record model and related types.
//!
//! Wire names are camelCase (`pageCount`, `insertedAt`, ...); the store and
//! services work with the Rust-side snake_case fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Full book record (API + in-memory store).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// 16-character random identifier, unique for the record's lifetime
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    /// Total pages
    pub page_count: u32,
    /// Pages read so far; never exceeds `page_count` for a stored record
    pub read_page: u32,
    /// Derived: `read_page == page_count`
    pub finished: bool,
    pub reading: bool,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update input. `name` stays optional so the store can reject
/// payloads that omit it; a caller-supplied `finished` field is ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub read_page: u32,
    #[serde(default)]
    pub reading: bool,
}

/// Short book representation for lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Typed list filter. At most one constraint applies per query; see
/// [`crate::store::BookStore::list`] for the precedence rules.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    /// Case-insensitive substring match against the book name
    pub name: Option<String>,
    pub reading: Option<bool>,
    pub finished: Option<bool>,
}

/// List query parameters as they arrive on the wire. `reading` and
/// `finished` are `0`/`1` flags.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookListQuery {
    pub name: Option<String>,
    pub reading: Option<String>,
    pub finished: Option<String>,
}

impl BookListQuery {
    /// Translate the loosely-typed query values into a [`BookFilter`].
    /// `"1"` maps to true, `"0"` to false; any other value counts as absent.
    pub fn into_filter(self) -> BookFilter {
        BookFilter {
            name: self.name,
            reading: self.reading.as_deref().and_then(flag),
            finished: self.finished.as_deref().and_then(flag),
        }
    }
}

fn flag(raw: &str) -> Option<bool> {
    match raw {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

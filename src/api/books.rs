//! Book endpoints
//!
//! Responses use the envelope `{"status": "success", "message"?, "data"?}`;
//! failures render through [`crate::error::AppError`] as
//! `{"status": "fail", "message"}`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{Book, BookListQuery, BookPayload, BookSummary},
};

/// Response for a successful create
#[derive(Serialize, ToSchema)]
pub struct AddBookResponse {
    pub status: String,
    pub message: String,
    pub data: AddBookData,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddBookData {
    pub book_id: String,
}

/// Response for list queries
#[derive(Serialize, ToSchema)]
pub struct ListBooksResponse {
    pub status: String,
    pub data: BookListData,
}

#[derive(Serialize, ToSchema)]
pub struct BookListData {
    pub books: Vec<BookSummary>,
}

/// Response for a get-by-id
#[derive(Serialize, ToSchema)]
pub struct GetBookResponse {
    pub status: String,
    pub data: BookData,
}

#[derive(Serialize, ToSchema)]
pub struct BookData {
    pub book: Book,
}

/// Response carrying only a confirmation message (update, delete)
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}

impl MessageResponse {
    fn success(message: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
        }
    }
}

/// Add a book to the shelf
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book added", body = AddBookResponse),
        (status = 400, description = "Missing name or readPage > pageCount"),
        (status = 500, description = "Book could not be stored")
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    Json(payload): Json<BookPayload>,
) -> AppResult<(StatusCode, Json<AddBookResponse>)> {
    let id = state.services.books.add_book(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddBookResponse {
            status: "success".to_string(),
            message: "Book added successfully".to_string(),
            data: AddBookData { book_id: id },
        }),
    ))
}

/// List books with optional filters
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("name" = Option<String>, Query, description = "Case-insensitive substring match on the book name"),
        ("reading" = Option<String>, Query, description = "Filter by reading status (0 or 1)"),
        ("finished" = Option<String>, Query, description = "Filter by finished status (0 or 1)")
    ),
    responses(
        (status = 200, description = "List of books", body = ListBooksResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookListQuery>,
) -> Json<ListBooksResponse> {
    let books = state.services.books.list_books(&query.into_filter()).await;

    Json(ListBooksResponse {
        status: "success".to_string(),
        data: BookListData { books },
    })
}

/// Get the full record for one book
#[utoipa::path(
    get,
    path = "/books/{bookId}",
    tag = "books",
    params(
        ("bookId" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = GetBookResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<GetBookResponse>> {
    let book = state.services.books.get_book(&book_id).await?;

    Ok(Json(GetBookResponse {
        status: "success".to_string(),
        data: BookData { book },
    }))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{bookId}",
    tag = "books",
    params(
        ("bookId" = String, Path, description = "Book ID")
    ),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = MessageResponse),
        (status = 400, description = "Missing name or readPage > pageCount"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<String>,
    Json(payload): Json<BookPayload>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.update_book(&book_id, payload).await?;

    Ok(Json(MessageResponse::success("Book updated successfully")))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{bookId}",
    tag = "books",
    params(
        ("bookId" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete_book(&book_id).await?;

    Ok(Json(MessageResponse::success("Book deleted successfully")))
}

//! Book catalog endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::extract::{AppJson, AppPath, AppQuery};
use crate::{
    error::AppResult,
    models::{
        book::{Book, CreateBook, UpdateBook},
        catalog_entry::CatalogEntry,
    },
    AppState,
};

/// External catalog search parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Free-text query
    pub query: String,
}

/// List all books
#[utoipa::path(
    get,
    path = "/api/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(State(state): State<AppState>, AppPath(id): AppPath<i64>) -> AppResult<Json<Book>> {
    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(book))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/api/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    AppJson(data): AppJson<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.books.create(data).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(data): AppJson<UpdateBook>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.update(id, data).await?;
    Ok(Json(book))
}

/// Delete a book and its loan history
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(State(state): State<AppState>, AppPath(id): AppPath<i64>) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Search the external book catalog
#[utoipa::path(
    get,
    path = "/api/books/search",
    tag = "books",
    params(SearchQuery),
    responses(
        (status = 200, description = "Candidate books", body = Vec<CatalogEntry>),
        (status = 400, description = "Empty query"),
        (status = 502, description = "Catalog unavailable")
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchQuery>,
) -> AppResult<Json<Vec<CatalogEntry>>> {
    let entries = state.services.books.search(&params.query).await?;
    Ok(Json(entries))
}

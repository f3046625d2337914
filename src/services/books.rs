//! Book catalog service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, CreateBook, UpdateBook},
        catalog_entry::CatalogEntry,
    },
    repository::RecordStore,
    services::catalog::CatalogLookup,
};

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn RecordStore>,
    catalog: Arc<dyn CatalogLookup>,
}

impl BooksService {
    pub fn new(store: Arc<dyn RecordStore>, catalog: Arc<dyn CatalogLookup>) -> Self {
        Self { store, catalog }
    }

    pub async fn create(&self, data: CreateBook) -> AppResult<Book> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let book = self.store.books_create(&data).await?;
        tracing::info!("Book {} created: {}", book.id, book.title);
        Ok(book)
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.store.books_find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.store
            .books_find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Replace title, author, ISBN, category and thumbnail
    pub async fn update(&self, id: i64, data: UpdateBook) -> AppResult<Book> {
        self.store
            .books_update(id, &data)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.store.books_delete(id).await? {
            return Err(AppError::NotFound("Book not found".to_string()));
        }
        tracing::info!("Book {} deleted", id);
        Ok(())
    }

    /// Search the external catalog
    pub async fn search(&self, query: &str) -> AppResult<Vec<CatalogEntry>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Validation("Search query cannot be empty".to_string()));
        }
        self.catalog.search(query).await
    }
}

//! Book domain methods on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, UpdateBook},
};

impl Repository {
    /// Insert a book
    pub async fn books_insert(&self, data: &CreateBook) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, isbn, publication_date, category, thumbnail_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.isbn)
        .bind(&data.publication_date)
        .bind(&data.category)
        .bind(&data.thumbnail_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    /// List all books
    pub async fn books_list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get book by ID
    pub async fn books_get(&self, id: i64) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    pub async fn books_get_many(&self, ids: &[i64]) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ANY($1) ORDER BY id")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Replace the editable fields of a book
    pub async fn books_replace(&self, id: i64, data: &UpdateBook) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $1, author = $2, isbn = $3, category = $4, thumbnail_url = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.isbn)
        .bind(&data.category)
        .bind(&data.thumbnail_url)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    /// Delete a book (its loans go with it)
    pub async fn books_remove(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Books of the given categories, minus the excluded ids
    pub async fn books_in_categories_excluding(
        &self,
        categories: &[String],
        excluded_ids: &[i64],
    ) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            r#"
            SELECT * FROM books
            WHERE category = ANY($1)
              AND NOT (id = ANY($2))
            ORDER BY id
            "#,
        )
        .bind(categories)
        .bind(excluded_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

//! Repository layer for database operations
//!
//! [`RecordStore`] is the persistence contract the services depend on.
//! [`Repository`] implements it on top of PostgreSQL; the per-record methods
//! live in the `books`, `users` and `loans` modules.

pub mod books;
pub mod loans;
pub mod users;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        book::{Book, CreateBook, UpdateBook},
        loan::{Loan, LoanStatus, NewLoan},
        user::{CreateUser, UpdateUser, User},
    },
};

/// Durable storage for books, users and loans.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn books_create(&self, data: &CreateBook) -> AppResult<Book>;
    async fn books_find_all(&self) -> AppResult<Vec<Book>>;
    async fn books_find_by_id(&self, id: i64) -> AppResult<Option<Book>>;
    async fn books_find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Book>>;
    async fn books_update(&self, id: i64, data: &UpdateBook) -> AppResult<Option<Book>>;
    /// Returns `false` when no book had this id.
    async fn books_delete(&self, id: i64) -> AppResult<bool>;
    /// Books in any of `categories` whose id is not in `excluded_ids`.
    async fn books_find_by_category_in_and_id_not_in(
        &self,
        categories: &[String],
        excluded_ids: &[i64],
    ) -> AppResult<Vec<Book>>;

    async fn users_create(&self, data: &CreateUser) -> AppResult<User>;
    async fn users_find_all(&self) -> AppResult<Vec<User>>;
    async fn users_find_by_id(&self, id: i64) -> AppResult<Option<User>>;
    async fn users_find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<User>>;
    async fn users_update(&self, id: i64, data: &UpdateUser) -> AppResult<Option<User>>;
    /// Returns `false` when no user had this id.
    async fn users_delete(&self, id: i64) -> AppResult<bool>;

    /// Insert a loan. Fails with [`AppError::BookAlreadyLoaned`](crate::error::AppError::BookAlreadyLoaned) if the book
    /// already has an active loan at commit time.
    async fn loans_create(&self, loan: &NewLoan) -> AppResult<Loan>;
    /// Persist the return date and status of an existing loan.
    async fn loans_save(&self, loan: &Loan) -> AppResult<Loan>;
    async fn loans_find_all(&self) -> AppResult<Vec<Loan>>;
    async fn loans_find_by_id(&self, id: i64) -> AppResult<Option<Loan>>;
    async fn loans_find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Loan>>;
    async fn loans_find_by_book_id(&self, book_id: i64) -> AppResult<Vec<Loan>>;
    async fn loans_find_by_book_id_and_status(
        &self,
        book_id: i64,
        status: LoanStatus,
    ) -> AppResult<Vec<Loan>>;
    async fn loans_exists_by_id(&self, id: i64) -> AppResult<bool>;
    async fn loans_delete_by_id(&self, id: i64) -> AppResult<()>;

    /// Connectivity probe
    async fn ping(&self) -> AppResult<()>;
}

/// PostgreSQL-backed record store
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Postgres SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// SQLSTATE code of a database error, if any
pub(crate) fn sql_state(e: &sqlx::Error) -> Option<String> {
    match e {
        sqlx::Error::Database(db) => db.code().map(|c| c.into_owned()),
        _ => None,
    }
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    sql_state(e).as_deref() == Some(UNIQUE_VIOLATION)
}

pub(crate) fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    sql_state(e).as_deref() == Some(FOREIGN_KEY_VIOLATION)
}

#[async_trait]
impl RecordStore for Repository {
    async fn books_create(&self, data: &CreateBook) -> AppResult<Book> {
        self.books_insert(data).await
    }

    async fn books_find_all(&self) -> AppResult<Vec<Book>> {
        self.books_list().await
    }

    async fn books_find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        self.books_get(id).await
    }

    async fn books_find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Book>> {
        self.books_get_many(ids).await
    }

    async fn books_update(&self, id: i64, data: &UpdateBook) -> AppResult<Option<Book>> {
        self.books_replace(id, data).await
    }

    async fn books_delete(&self, id: i64) -> AppResult<bool> {
        self.books_remove(id).await
    }

    async fn books_find_by_category_in_and_id_not_in(
        &self,
        categories: &[String],
        excluded_ids: &[i64],
    ) -> AppResult<Vec<Book>> {
        self.books_in_categories_excluding(categories, excluded_ids).await
    }

    async fn users_create(&self, data: &CreateUser) -> AppResult<User> {
        self.users_insert(data).await
    }

    async fn users_find_all(&self) -> AppResult<Vec<User>> {
        self.users_list().await
    }

    async fn users_find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        self.users_get(id).await
    }

    async fn users_find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<User>> {
        self.users_get_many(ids).await
    }

    async fn users_update(&self, id: i64, data: &UpdateUser) -> AppResult<Option<User>> {
        self.users_replace(id, data).await
    }

    async fn users_delete(&self, id: i64) -> AppResult<bool> {
        self.users_remove(id).await
    }

    async fn loans_create(&self, loan: &NewLoan) -> AppResult<Loan> {
        self.loans_insert(loan).await
    }

    async fn loans_save(&self, loan: &Loan) -> AppResult<Loan> {
        self.loans_update_state(loan).await
    }

    async fn loans_find_all(&self) -> AppResult<Vec<Loan>> {
        self.loans_list().await
    }

    async fn loans_find_by_id(&self, id: i64) -> AppResult<Option<Loan>> {
        self.loans_get(id).await
    }

    async fn loans_find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Loan>> {
        self.loans_for_user(user_id).await
    }

    async fn loans_find_by_book_id(&self, book_id: i64) -> AppResult<Vec<Loan>> {
        self.loans_for_book(book_id).await
    }

    async fn loans_find_by_book_id_and_status(
        &self,
        book_id: i64,
        status: LoanStatus,
    ) -> AppResult<Vec<Loan>> {
        self.loans_for_book_with_status(book_id, status).await
    }

    async fn loans_exists_by_id(&self, id: i64) -> AppResult<bool> {
        self.loans_exists(id).await
    }

    async fn loans_delete_by_id(&self, id: i64) -> AppResult<()> {
        self.loans_remove(id).await
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

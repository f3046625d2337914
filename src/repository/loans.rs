//! Loans repository for database operations
//!
//! The partial unique index `loans_one_active_per_book` guarantees at most one
//! `EMPRESTADO` loan per book; violations surface as
//! [`AppError::BookAlreadyLoaned`].

use super::{is_foreign_key_violation, is_unique_violation, Repository};
use crate::{
    error::{AppError, AppResult},
    models::loan::{Loan, LoanStatus, NewLoan},
};

/// Translate constraint violations raised by loan writes
fn map_write_error(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        AppError::BookAlreadyLoaned
    } else if is_foreign_key_violation(&e) {
        AppError::NotFound("User or book not found".to_string())
    } else {
        AppError::Database(e)
    }
}

impl Repository {
    /// Create a new loan
    pub async fn loans_insert(&self, loan: &NewLoan) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (user_id, book_id, loan_date, return_date, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(loan.user_id)
        .bind(loan.book_id)
        .bind(loan.loan_date)
        .bind(loan.return_date)
        .bind(loan.status)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    /// Write back the return date and status
    pub async fn loans_update_state(&self, loan: &Loan) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans SET return_date = $1, status = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(loan.return_date)
        .bind(loan.status)
        .bind(loan.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", loan.id)))
    }

    /// List all loans
    pub async fn loans_list(&self) -> AppResult<Vec<Loan>> {
        let rows = sqlx::query_as::<_, Loan>("SELECT * FROM loans ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get loan by ID
    pub async fn loans_get(&self, id: i64) -> AppResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(loan)
    }

    /// Get loans for a user
    pub async fn loans_for_user(&self, user_id: i64) -> AppResult<Vec<Loan>> {
        let rows = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE user_id = $1 ORDER BY id")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get loans for a book
    pub async fn loans_for_book(&self, book_id: i64) -> AppResult<Vec<Loan>> {
        let rows = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE book_id = $1 ORDER BY id")
            .bind(book_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn loans_for_book_with_status(
        &self,
        book_id: i64,
        status: LoanStatus,
    ) -> AppResult<Vec<Loan>> {
        let rows = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE book_id = $1 AND status = $2 ORDER BY id",
        )
        .bind(book_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn loans_exists(&self, id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM loans WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Delete a loan
    pub async fn loans_remove(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM loans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

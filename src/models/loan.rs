//! Loan (checkout) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{book::Book, user::User};

/// Loan status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "loan_status")]
pub enum LoanStatus {
    /// Checked out
    #[serde(rename = "EMPRESTADO")]
    #[sqlx(rename = "EMPRESTADO")]
    Emprestado,
    /// Returned, back on the shelf
    #[serde(rename = "PRESENTE")]
    #[sqlx(rename = "PRESENTE")]
    Presente,
}

impl LoanStatus {
    /// Status implied by a return date: open loans have none.
    pub fn for_return_date(return_date: Option<NaiveDate>) -> Self {
        match return_date {
            Some(_) => LoanStatus::Presente,
            None => LoanStatus::Emprestado,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Emprestado => "EMPRESTADO",
            LoanStatus::Presente => "PRESENTE",
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loan model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub loan_date: NaiveDate,
    /// `None` while the book is still checked out
    pub return_date: Option<NaiveDate>,
    pub status: LoanStatus,
}

/// Create loan request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLoan {
    pub user_id: i64,
    pub book_id: i64,
    /// Defaults to today
    pub loan_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
}

/// Validated loan ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewLoan {
    pub user_id: i64,
    pub book_id: i64,
    pub loan_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub status: LoanStatus,
}

/// Loan summary with the borrower name and book title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoanDetails {
    pub loan_id: i64,
    pub loan_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub status: LoanStatus,
    pub user_name: String,
    pub book_title: String,
}

impl LoanDetails {
    pub fn project(loan: &Loan, user: &User, book: &Book) -> Self {
        Self {
            loan_id: loan.id,
            loan_date: loan.loan_date,
            return_date: loan.return_date,
            status: loan.status,
            user_name: user.name.clone(),
            book_title: book.title.clone(),
        }
    }
}

//! Loan lifecycle service
//!
//! Sole owner of loan status and return date. A loan opens as `EMPRESTADO`,
//! becomes `PRESENTE` when a return date is recorded, and can be reopened by
//! clearing the return date or by an explicit status override.
//!
//! Loan dates in the past are rejected; an unset loan date means today.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::Book,
        loan::{CreateLoan, Loan, LoanDetails, LoanStatus, NewLoan},
    },
    repository::RecordStore,
};

/// Current calendar date in the server's local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Clone)]
pub struct LoansService {
    store: Arc<dyn RecordStore>,
}

impl LoansService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Open a loan (check a book out)
    pub async fn create_loan(&self, request: CreateLoan) -> AppResult<Loan> {
        let today = today();

        let loan_date = match request.loan_date {
            Some(date) if date < today => {
                tracing::warn!("Rejected loan for book {}: loan date {} is in the past", request.book_id, date);
                return Err(AppError::InvalidLoanDate);
            }
            Some(date) => date,
            None => today,
        };

        let active = self
            .store
            .loans_find_by_book_id_and_status(request.book_id, LoanStatus::Emprestado)
            .await?;
        if !active.is_empty() {
            tracing::warn!("Rejected loan: book {} is already on loan {}", request.book_id, active[0].id);
            return Err(AppError::BookAlreadyLoaned);
        }

        if let Some(return_date) = request.return_date {
            if return_date < loan_date {
                tracing::warn!(
                    "Rejected loan for book {}: return date {} is before loan date {}",
                    request.book_id,
                    return_date,
                    loan_date
                );
                return Err(AppError::InvalidReturnDate);
            }
        }

        let loan = self
            .store
            .loans_create(&NewLoan {
                user_id: request.user_id,
                book_id: request.book_id,
                loan_date,
                return_date: request.return_date,
                status: LoanStatus::Emprestado,
            })
            .await?;

        tracing::info!("Loan {} opened: book {} to user {}", loan.id, loan.book_id, loan.user_id);
        Ok(loan)
    }

    /// Record a return date and/or status.
    ///
    /// An explicit `status` wins; otherwise it is derived from `return_date`.
    pub async fn update_loan(
        &self,
        loan_id: i64,
        return_date: Option<NaiveDate>,
        status: Option<LoanStatus>,
    ) -> AppResult<Loan> {
        let mut loan = self.get(loan_id).await?;

        loan.return_date = return_date;
        loan.status = status.unwrap_or_else(|| LoanStatus::for_return_date(return_date));

        let loan = self.store.loans_save(&loan).await?;
        tracing::info!("Loan {} updated: status {}, return date {:?}", loan.id, loan.status, loan.return_date);
        Ok(loan)
    }

    pub async fn get(&self, loan_id: i64) -> AppResult<Loan> {
        self.store
            .loans_find_by_id(loan_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Loan not found".to_string()))
    }

    pub async fn list_all(&self) -> AppResult<Vec<Loan>> {
        self.store.loans_find_all().await
    }

    pub async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Loan>> {
        self.store.loans_find_by_user_id(user_id).await
    }

    pub async fn list_by_book(&self, book_id: i64) -> AppResult<Vec<Loan>> {
        self.store.loans_find_by_book_id(book_id).await
    }

    /// Cancel a loan
    pub async fn delete_loan(&self, loan_id: i64) -> AppResult<()> {
        if !self.store.loans_exists_by_id(loan_id).await? {
            return Err(AppError::NotFound("Loan not found".to_string()));
        }
        self.store.loans_delete_by_id(loan_id).await?;
        tracing::info!("Loan {} deleted", loan_id);
        Ok(())
    }

    /// Books sharing a category with the user's past loans, minus the
    /// books they already borrowed. Users without loans get nothing.
    pub async fn recommend_for_user(&self, user_id: i64) -> AppResult<Vec<Book>> {
        let loans = self.store.loans_find_by_user_id(user_id).await?;
        if loans.is_empty() {
            return Ok(Vec::new());
        }

        let borrowed_ids: Vec<i64> = loans
            .iter()
            .map(|loan| loan.book_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let categories: Vec<String> = self
            .store
            .books_find_by_ids(&borrowed_ids)
            .await?
            .into_iter()
            .map(|book| book.category)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        tracing::debug!("Recommending for user {} from categories {:?}", user_id, categories);

        self.store
            .books_find_by_category_in_and_id_not_in(&categories, &borrowed_ids)
            .await
    }

    /// Every loan with its borrower name and book title
    pub async fn list_details(&self) -> AppResult<Vec<LoanDetails>> {
        let loans = self.store.loans_find_all().await?;
        if loans.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<i64> = loans.iter().map(|l| l.user_id).collect::<BTreeSet<_>>().into_iter().collect();
        let book_ids: Vec<i64> = loans.iter().map(|l| l.book_id).collect::<BTreeSet<_>>().into_iter().collect();

        let users: HashMap<_, _> = self
            .store
            .users_find_by_ids(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();
        let books: HashMap<_, _> = self
            .store
            .books_find_by_ids(&book_ids)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect();

        let details = loans
            .iter()
            .filter_map(|loan| match (users.get(&loan.user_id), books.get(&loan.book_id)) {
                (Some(user), Some(book)) => Some(LoanDetails::project(loan, user, book)),
                _ => {
                    tracing::warn!("Loan {} references a missing user or book", loan.id);
                    None
                }
            })
            .collect();

        Ok(details)
    }
}

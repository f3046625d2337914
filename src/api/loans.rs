//! Loan management endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use super::extract::{AppJson, AppPath, AppQuery};
use crate::{
    error::AppResult,
    models::{
        book::Book,
        loan::{CreateLoan, Loan, LoanDetails, LoanStatus},
    },
    AppState,
};

/// Return date and status for a loan update; both optional
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UpdateLoanQuery {
    /// Return date (YYYY-MM-DD); omit to reopen the loan
    pub return_date: Option<NaiveDate>,
    /// Explicit status, overrides the one derived from the return date
    pub status: Option<LoanStatus>,
}

/// Check a book out
#[utoipa::path(
    post,
    path = "/api/loans",
    tag = "loans",
    request_body = CreateLoan,
    responses(
        (status = 201, description = "Loan created", body = Loan),
        (status = 400, description = "Loan date in the past or return date before loan date"),
        (status = 404, description = "User or book not found"),
        (status = 409, description = "Book already on loan")
    )
)]
pub async fn create_loan(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateLoan>,
) -> AppResult<(StatusCode, Json<Loan>)> {
    let loan = state.services.loans.create_loan(request).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// Record a return or correct a loan's status
#[utoipa::path(
    put,
    path = "/api/loans/{id}",
    tag = "loans",
    params(
        ("id" = i64, Path, description = "Loan ID"),
        UpdateLoanQuery
    ),
    responses(
        (status = 200, description = "Loan updated", body = Loan),
        (status = 404, description = "Loan not found"),
        (status = 409, description = "Book already on another active loan")
    )
)]
pub async fn update_loan(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppQuery(params): AppQuery<UpdateLoanQuery>,
) -> AppResult<Json<Loan>> {
    let loan = state
        .services
        .loans
        .update_loan(id, params.return_date, params.status)
        .await?;
    Ok(Json(loan))
}

/// List all loans
#[utoipa::path(
    get,
    path = "/api/loans",
    tag = "loans",
    responses(
        (status = 200, description = "All loans", body = Vec<Loan>)
    )
)]
pub async fn list_loans(State(state): State<AppState>) -> AppResult<Json<Vec<Loan>>> {
    let loans = state.services.loans.list_all().await?;
    Ok(Json(loans))
}

/// Loan summaries with borrower name and book title
#[utoipa::path(
    get,
    path = "/api/loans/details",
    tag = "loans",
    responses(
        (status = 200, description = "Loan summaries", body = Vec<LoanDetails>)
    )
)]
pub async fn list_loan_details(State(state): State<AppState>) -> AppResult<Json<Vec<LoanDetails>>> {
    let details = state.services.loans.list_details().await?;
    Ok(Json(details))
}

/// Get loan by ID
#[utoipa::path(
    get,
    path = "/api/loans/{id}",
    tag = "loans",
    params(("id" = i64, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Loan", body = Loan),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn get_loan(State(state): State<AppState>, AppPath(id): AppPath<i64>) -> AppResult<Json<Loan>> {
    let loan = state.services.loans.get(id).await?;
    Ok(Json(loan))
}

/// Get loans of a user
#[utoipa::path(
    get,
    path = "/api/loans/user/{id}",
    tag = "loans",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User's loans", body = Vec<Loan>)
    )
)]
pub async fn get_user_loans(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
) -> AppResult<Json<Vec<Loan>>> {
    let loans = state.services.loans.list_by_user(user_id).await?;
    Ok(Json(loans))
}

/// Get loans of a book
#[utoipa::path(
    get,
    path = "/api/loans/book/{id}",
    tag = "loans",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book's loans", body = Vec<Loan>)
    )
)]
pub async fn get_book_loans(
    State(state): State<AppState>,
    AppPath(book_id): AppPath<i64>,
) -> AppResult<Json<Vec<Loan>>> {
    let loans = state.services.loans.list_by_book(book_id).await?;
    Ok(Json(loans))
}

/// Recommend books from the categories a user has borrowed
#[utoipa::path(
    get,
    path = "/api/loans/recommendations/{id}",
    tag = "loans",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Recommended books", body = Vec<Book>)
    )
)]
pub async fn get_recommendations(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.loans.recommend_for_user(user_id).await?;
    Ok(Json(books))
}

/// Cancel a loan
#[utoipa::path(
    delete,
    path = "/api/loans/{id}",
    tag = "loans",
    params(("id" = i64, Path, description = "Loan ID")),
    responses(
        (status = 204, description = "Loan deleted"),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn delete_loan(State(state): State<AppState>, AppPath(id): AppPath<i64>) -> AppResult<StatusCode> {
    state.services.loans.delete_loan(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! User (library member) model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Library member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub registration_date: NaiveDate,
    pub phone_number: String,
}

/// Create user request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub email: String,
    pub registration_date: NaiveDate,
    pub phone_number: String,
}

/// Update user request (whole-record replace, no re-validation)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateUser {
    pub name: String,
    pub email: String,
    pub registration_date: NaiveDate,
    pub phone_number: String,
}

//! Book (catalog entry) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    /// Free-form publication date as given by the cataloguer (e.g. "2008", "2008-08-01")
    pub publication_date: String,
    pub category: String,
    pub thumbnail_url: Option<String>,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    pub publication_date: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    pub thumbnail_url: Option<String>,
}

/// Update book request.
///
/// Replaces every listed field; the publication date is kept from the stored record.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub category: String,
    pub thumbnail_url: Option<String>,
}

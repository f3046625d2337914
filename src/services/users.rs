//! User (library member) service

use std::sync::Arc;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateUser, User},
    repository::RecordStore,
    services::loans::today,
};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

fn validate_email(email: &str) -> AppResult<()> {
    if !EMAIL_RE.is_match(email) {
        return Err(AppError::Validation("Invalid email".to_string()));
    }
    Ok(())
}

fn validate_registration_date(date: NaiveDate, today: NaiveDate) -> AppResult<()> {
    if date > today {
        return Err(AppError::Validation(
            "Registration date cannot be after today".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct UsersService {
    store: Arc<dyn RecordStore>,
}

impl UsersService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Register a member. Email and registration date are only checked here.
    pub async fn create(&self, data: CreateUser) -> AppResult<User> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        validate_email(&data.email)?;
        validate_registration_date(data.registration_date, today())?;

        let user = self.store.users_create(&data).await?;
        tracing::info!("User {} created", user.id);
        Ok(user)
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.store.users_find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        self.store
            .users_find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn update(&self, id: i64, data: UpdateUser) -> AppResult<User> {
        self.store
            .users_update(id, &data)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.store.users_delete(id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        tracing::info!("User {} deleted", id);
        Ok(())
    }
}

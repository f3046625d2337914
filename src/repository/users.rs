//! Users repository for database operations

use super::{is_foreign_key_violation, Repository};
use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateUser, User},
};

impl Repository {
    /// Insert a user
    pub async fn users_insert(&self, data: &CreateUser) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, registration_date, phone_number)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.registration_date)
        .bind(&data.phone_number)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    /// List all users
    pub async fn users_list(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get user by ID
    pub async fn users_get(&self, id: i64) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn users_get_many(&self, ids: &[i64]) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ANY($1) ORDER BY id")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Replace a user's fields
    pub async fn users_replace(&self, id: i64, data: &UpdateUser) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $1, email = $2, registration_date = $3, phone_number = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.registration_date)
        .bind(&data.phone_number)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Delete a user; refused while loans still reference them
    pub async fn users_remove(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::Conflict(format!("User {} still has loans", id))
                } else {
                    AppError::Database(e)
                }
            })?;
        Ok(result.rows_affected() > 0)
    }
}

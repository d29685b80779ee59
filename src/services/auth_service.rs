use sqlx::SqlitePool;

use crate::dto::auth_dto::{LoginPayload, RegisterPayload, UpdateUserPayload};
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::time::now;
use crate::utils::token::{IssuedToken, SessionTokens};
use crate::utils::validation::{is_strong_password, is_valid_email, validate};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
    tokens: SessionTokens,
}

impl AuthService {
    pub fn new(pool: SqlitePool, tokens: SessionTokens) -> Self {
        Self { pool, tokens }
    }

    pub fn tokens(&self) -> &SessionTokens {
        &self.tokens
    }

    pub async fn register(&self, payload: RegisterPayload) -> Result<User> {
        check_email(&payload.email)?;
        check_password(&payload.password)?;
        validate(&payload)?;

        let password_hash = hash_password(&payload.password)?;
        let created_at = now();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, username, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(&payload.username)
        .bind(&payload.email)
        .bind(&password_hash)
        .bind(created_at)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::storage("Error creating user"))?;

        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }

    pub async fn login(&self, payload: LoginPayload) -> Result<IssuedToken> {
        let user = self
            .find_by_email(&payload.email)
            .await?
            .ok_or_else(|| Error::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(&payload.password, &user.password_hash)? {
            return Err(Error::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let issued = self.tokens.issue(&user, now()).map_err(|e| {
            tracing::error!(error = %e, "failed to sign session token");
            Error::Internal("Error generating token".to_string())
        })?;

        tracing::info!(user_id = user.id, "user logged in");
        Ok(issued)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::storage("Error retrieving user"))?;

        Ok(user)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::storage("Error retrieving user"))?;

        Ok(user)
    }

    /// Returns whether a row was touched; a missing id is not an error.
    pub async fn update_user(&self, id: i64, payload: UpdateUserPayload) -> Result<bool> {
        if let Some(email) = &payload.email {
            check_email(email)?;
        }
        if let Some(password) = &payload.password {
            check_password(password)?;
        }
        validate(&payload)?;

        let password_hash = payload.password.as_deref().map(hash_password).transpose()?;

        let res = sqlx::query(
            r#"
            UPDATE users
            SET
                username = COALESCE(?, username),
                email = COALESCE(?, email),
                password_hash = COALESCE(?, password_hash),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(payload.username)
        .bind(payload.email)
        .bind(password_hash)
        .bind(now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(Error::storage("Error updating user"))?;

        Ok(res.rows_affected() > 0)
    }

    /// Owned photos are removed by the `ON DELETE CASCADE` constraint.
    pub async fn delete_user(&self, id: i64) -> Result<bool> {
        let res = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::storage("Error deleting user"))?;

        if res.rows_affected() > 0 {
            tracing::info!(user_id = id, "user deleted");
        }
        Ok(res.rows_affected() > 0)
    }
}

fn check_email(email: &str) -> Result<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(Error::BadRequest("Invalid email format".to_string()))
    }
}

fn check_password(password: &str) -> Result<()> {
    if is_strong_password(password) {
        Ok(())
    } else {
        Err(Error::BadRequest(
            "Password must be at least 6 characters long".to_string(),
        ))
    }
}

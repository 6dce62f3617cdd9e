use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::error::AppError;

/// A registered user.
///
/// The stored password hash never leaves the server: it is skipped during
/// serialization, so API responses built from this struct cannot leak it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

/// Persists user records. Owns a handle to the shared pool; constructed once
/// at startup and registered as application data.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a new user and returns its id.
    ///
    /// Email uniqueness is enforced by the UNIQUE constraint. A duplicate
    /// email and any other write failure collapse into the same
    /// caller-visible `Conflict`; the underlying cause is only logged.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<i64, AppError> {
        let result = sqlx::query("INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?)")
            .bind(name)
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(e) => {
                log::error!("user insert failed: {}", e);
                Err(AppError::Conflict("Email already in use or DB error".into()))
            }
        }
    }

    /// Looks up a user by exact email match. `None` when no row matches.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::manager::DatabaseError;
use crate::middleware::SessionUser;

/// Append-only log of generated passwords, tagged with the requesting user.
/// The application never reads it back.
#[derive(Clone)]
pub struct PasswordHistory {
    pool: SqlitePool,
}

impl PasswordHistory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record one request's batch atomically: either every password lands or none.
    pub async fn append(&self, user: &SessionUser, passwords: &[String]) -> Result<(), DatabaseError> {
        let created_at = Utc::now();
        let mut tx = self.pool.begin().await?;
        for password in passwords {
            sqlx::query(
                "INSERT INTO password_history (user_id, username, password, created_at) VALUES (?, ?, ?, ?)",
            )
            .bind(user.id)
            .bind(&user.username)
            .bind(password)
            .bind(created_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::manager::DatabaseError;
use crate::database::models::User;

/// Access to the `users` table shared by both applications
#[derive(Clone)]
pub struct AccountStore {
    pool: SqlitePool,
}

impl AccountStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Exact-match lookup by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Insert a new account. Fails with a unique violation if the name is taken.
    pub async fn insert(&self, username: &str, password_hash: &str) -> Result<User, DatabaseError> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?)",
        )
        .bind(username)
        .bind(password_hash)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at,
        })
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::manager::{memory_pool, DatabaseManager};

    async fn store() -> AccountStore {
        let pool = memory_pool().await;
        DatabaseManager::migrate_studio(&pool).await.unwrap();
        AccountStore::new(pool)
    }

    #[tokio::test]
    async fn insert_then_find() {
        let store = store().await;
        let user = store.insert("alice", "hash").await.unwrap();
        let found = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.password_hash, "hash");
        assert!(store.find_by_username("Alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_unique_violation() {
        let store = store().await;
        store.insert("alice", "one").await.unwrap();
        let err = store.insert("alice", "two").await.unwrap_err();
        assert!(err.is_unique_violation());
        assert_eq!(store.count().await.unwrap(), 1);
    }
}

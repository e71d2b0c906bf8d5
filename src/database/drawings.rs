use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::manager::DatabaseError;
use crate::database::models::Drawing;

const DRAWING_COLUMNS: &str = "id, title, image_data, created_at, updated_at, user_id";

/// Owner-scoped persistence for drawings.
///
/// Every per-record statement filters on both `id` and `user_id`, so a record
/// owned by someone else is indistinguishable from one that does not exist.
#[derive(Clone)]
pub struct DrawingRepository {
    pool: SqlitePool,
}

impl DrawingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, owner_id: i64, title: &str, image_data: &str) -> Result<Drawing, DatabaseError> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO drawings (title, image_data, created_at, user_id) VALUES (?, ?, ?, ?)",
        )
        .bind(title)
        .bind(image_data)
        .bind(created_at)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(Drawing {
            id: result.last_insert_rowid(),
            title: title.to_string(),
            image_data: image_data.to_string(),
            created_at,
            updated_at: None,
            user_id: owner_id,
        })
    }

    /// All drawings of one owner, newest first
    pub async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<Drawing>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM drawings WHERE user_id = ? ORDER BY created_at DESC, id DESC",
            DRAWING_COLUMNS
        );
        let drawings = sqlx::query_as::<_, Drawing>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(drawings)
    }

    pub async fn find_owned(&self, id: i64, owner_id: i64) -> Result<Option<Drawing>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM drawings WHERE id = ? AND user_id = ?",
            DRAWING_COLUMNS
        );
        let drawing = sqlx::query_as::<_, Drawing>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(drawing)
    }

    /// Replace title and image in place. `None` when the drawing is absent or foreign.
    pub async fn update_owned(
        &self,
        id: i64,
        owner_id: i64,
        title: &str,
        image_data: &str,
    ) -> Result<Option<Drawing>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE drawings SET title = ?, image_data = ?, updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(title)
        .bind(image_data)
        .bind(Utc::now())
        .bind(id)
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let sql = format!(
            "SELECT {} FROM drawings WHERE id = ? AND user_id = ?",
            DRAWING_COLUMNS
        );
        let drawing = sqlx::query_as::<_, Drawing>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(Some(drawing))
    }

    /// Returns false when nothing matched (absent or foreign).
    pub async fn delete_owned(&self, id: i64, owner_id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM drawings WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

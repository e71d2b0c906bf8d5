use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A canvas image owned by exactly one user
#[derive(Debug, Clone, FromRow)]
pub struct Drawing {
    pub id: i64,
    pub title: String,
    /// PNG data URI (`data:image/png;base64,...`)
    pub image_data: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub user_id: i64,
}

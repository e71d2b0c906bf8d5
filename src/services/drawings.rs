use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::StudioConfig;
use crate::database::{DatabaseError, Drawing, DrawingRepository};
use crate::error::ApiError;

pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum DrawingError {
    #[error("No image data provided")]
    MissingImage,

    #[error("Invalid image data format")]
    InvalidImageFormat,

    /// Absent or owned by someone else; the two are not distinguished.
    #[error("Drawing not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<DrawingError> for ApiError {
    fn from(err: DrawingError) -> Self {
        match err {
            DrawingError::MissingImage | DrawingError::InvalidImageFormat => {
                ApiError::bad_request(err.to_string())
            }
            DrawingError::NotFound => ApiError::not_found(err.to_string()),
            DrawingError::Database(db) => db.into(),
        }
    }
}

/// JSON body of save and update requests
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingPayload {
    pub title: Option<String>,
    pub image_data: Option<String>,
}

/// A payload that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDrawing {
    pub title: String,
    pub image_data: String,
}

/// Wire form of a drawing in list responses
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingView {
    pub id: i64,
    pub title: String,
    pub image_data: String,
    pub created_at: String,
}

/// Validation, ownership scoping and timestamp rendering for drawings
#[derive(Clone)]
pub struct DrawingService {
    repo: DrawingRepository,
    default_title: String,
    display_offset: FixedOffset,
}

impl DrawingService {
    pub fn new(repo: DrawingRepository, config: &StudioConfig) -> Self {
        let display_offset = config
            .display_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                tracing::warn!(
                    "Display offset of {}h is out of range, using UTC",
                    config.display_offset_hours
                );
                Utc.fix()
            });

        Self {
            repo,
            default_title: config.default_title.clone(),
            display_offset,
        }
    }

    pub fn validate(&self, payload: DrawingPayload) -> Result<ValidDrawing, DrawingError> {
        let image_data = payload
            .image_data
            .filter(|data| !data.is_empty())
            .ok_or(DrawingError::MissingImage)?;
        if !image_data.starts_with(PNG_DATA_URI_PREFIX) {
            return Err(DrawingError::InvalidImageFormat);
        }

        let title = payload
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.default_title.clone());

        Ok(ValidDrawing { title, image_data })
    }

    pub async fn create(&self, owner_id: i64, payload: DrawingPayload) -> Result<Drawing, DrawingError> {
        let valid = self.validate(payload)?;
        let drawing = self
            .repo
            .create(owner_id, &valid.title, &valid.image_data)
            .await?;
        info!("User {} saved drawing {} '{}'", owner_id, drawing.id, drawing.title);
        Ok(drawing)
    }

    pub async fn list(&self, owner_id: i64) -> Result<Vec<Drawing>, DrawingError> {
        Ok(self.repo.list_for_owner(owner_id).await?)
    }

    pub async fn get(&self, id: i64, owner_id: i64) -> Result<Drawing, DrawingError> {
        self.repo
            .find_owned(id, owner_id)
            .await?
            .ok_or(DrawingError::NotFound)
    }

    pub async fn update(
        &self,
        id: i64,
        owner_id: i64,
        payload: DrawingPayload,
    ) -> Result<Drawing, DrawingError> {
        let valid = self.validate(payload)?;
        let drawing = self
            .repo
            .update_owned(id, owner_id, &valid.title, &valid.image_data)
            .await?
            .ok_or(DrawingError::NotFound)?;
        info!("User {} updated drawing {}", owner_id, id);
        Ok(drawing)
    }

    pub async fn delete(&self, id: i64, owner_id: i64) -> Result<(), DrawingError> {
        if !self.repo.delete_owned(id, owner_id).await? {
            return Err(DrawingError::NotFound);
        }
        info!("User {} deleted drawing {}", owner_id, id);
        Ok(())
    }

    /// Render a stored UTC timestamp in the configured display offset
    pub fn local_timestamp(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.display_offset)
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }

    pub fn view(&self, drawing: &Drawing) -> DrawingView {
        DrawingView {
            id: drawing.id,
            title: drawing.title.clone(),
            image_data: drawing.image_data.clone(),
            created_at: self.local_timestamp(drawing.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::database::manager::{memory_pool, DatabaseManager};
    use chrono::TimeZone;

    async fn service() -> DrawingService {
        let pool = memory_pool().await;
        DatabaseManager::migrate_studio(&pool).await.unwrap();
        DrawingService::new(DrawingRepository::new(pool), &AppConfig::development().studio)
    }

    fn payload(title: Option<&str>, image: Option<&str>) -> DrawingPayload {
        DrawingPayload {
            title: title.map(str::to_string),
            image_data: image.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn validation_requires_png_data_uri() {
        let service = service().await;
        assert!(matches!(
            service.validate(payload(Some("t"), None)),
            Err(DrawingError::MissingImage)
        ));
        assert!(matches!(
            service.validate(payload(Some("t"), Some(""))),
            Err(DrawingError::MissingImage)
        ));
        assert!(matches!(
            service.validate(payload(Some("t"), Some("data:image/jpeg;base64,/9j/"))),
            Err(DrawingError::InvalidImageFormat)
        ));
    }

    #[tokio::test]
    async fn blank_title_gets_placeholder() {
        let service = service().await;
        let valid = service
            .validate(payload(Some("   "), Some("data:image/png;base64,AAAA")))
            .unwrap();
        assert_eq!(valid.title, "Untitled");

        let valid = service
            .validate(payload(None, Some("data:image/png;base64,AAAA")))
            .unwrap();
        assert_eq!(valid.title, "Untitled");
    }

    #[tokio::test]
    async fn timestamps_render_at_utc_plus_four() {
        let service = service().await;
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 22, 30, 5).unwrap();
        assert_eq!(service.local_timestamp(at), "2024-03-02 02:30:05");
    }

    #[tokio::test]
    async fn missing_drawing_is_not_found() {
        let service = service().await;
        assert!(matches!(service.get(99, 1).await, Err(DrawingError::NotFound)));
        assert!(matches!(service.delete(99, 1).await, Err(DrawingError::NotFound)));
        assert!(matches!(
            service
                .update(99, 1, payload(None, Some("data:image/png;base64,AAAA")))
                .await,
            Err(DrawingError::NotFound)
        ));
    }

    #[tokio::test]
    async fn out_of_range_offset_falls_back_to_utc() {
        let pool = memory_pool().await;
        let mut config = AppConfig::development().studio;
        config.display_offset_hours = i32::MAX;
        let service = DrawingService::new(DrawingRepository::new(pool), &config);

        let at = Utc.with_ymd_and_hms(2024, 3, 1, 22, 30, 5).unwrap();
        assert_eq!(service.local_timestamp(at), "2024-03-01 22:30:05");
    }
}

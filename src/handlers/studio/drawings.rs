use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::SessionUser;
use crate::services::{DrawingPayload, DrawingView};
use crate::state::StudioState;

fn payload(body: Result<Json<DrawingPayload>, JsonRejection>) -> Result<DrawingPayload, ApiError> {
    body.map(|Json(payload)| payload).map_err(|rejection| {
        tracing::debug!("Rejected drawing body: {}", rejection);
        ApiError::invalid_json("Request body must be JSON with title and imageData")
    })
}

/// Non-numeric ids cannot name a drawing
fn drawing_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|_| ApiError::not_found("Drawing not found"))
}

/// POST /api/save_drawing
///
/// ```json
/// { "title": "Sunset", "imageData": "data:image/png;base64,..." }
/// ```
/// → `201 { "message", "drawingId", "createdAt" }`
pub async fn save_drawing(
    State(state): State<StudioState>,
    Extension(user): Extension<SessionUser>,
    body: Result<Json<DrawingPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let drawing = state.drawings.create(user.id, payload(body)?).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Drawing saved successfully",
            "drawingId": drawing.id,
            "createdAt": state.drawings.local_timestamp(drawing.created_at),
        })),
    ))
}

/// GET /api/drawings - the caller's drawings, newest first
pub async fn list_drawings(
    State(state): State<StudioState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<Vec<DrawingView>>, ApiError> {
    let drawings = state.drawings.list(user.id).await?;
    Ok(Json(drawings.iter().map(|d| state.drawings.view(d)).collect()))
}

/// PUT /api/drawings/:id - replace title and image of an owned drawing
pub async fn update_drawing(
    State(state): State<StudioState>,
    Extension(user): Extension<SessionUser>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<DrawingPayload>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = drawing_id(id)?;
    let drawing = state.drawings.update(id, user.id, payload(body)?).await?;
    let updated_at = drawing.updated_at.unwrap_or(drawing.created_at);

    Ok(Json(json!({
        "message": "Drawing updated successfully",
        "drawingId": drawing.id,
        "updatedAt": state.drawings.local_timestamp(updated_at),
    })))
}

/// DELETE /api/drawings/:id
pub async fn delete_drawing(
    State(state): State<StudioState>,
    Extension(user): Extension<SessionUser>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = drawing_id(id)?;
    state.drawings.delete(id, user.id).await?;

    Ok(Json(json!({ "message": "Drawing deleted successfully" })))
}

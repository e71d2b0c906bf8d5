use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Extension,
};

use crate::error::ApiError;
use crate::middleware::SessionUser;
use crate::services::DrawingError;
use crate::state::StudioState;
use crate::views::studio as pages;

/// GET / - landing page
pub async fn landing() -> Html<String> {
    Html(pages::landing_page())
}

/// GET /studio - blank canvas
pub async fn studio_page(Extension(user): Extension<SessionUser>) -> Html<String> {
    Html(pages::canvas_page(&user.username, None))
}

/// GET /studio/:id - canvas preloaded with one of the caller's drawings
pub async fn edit_page(
    State(state): State<StudioState>,
    Extension(user): Extension<SessionUser>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Ok(Path(id)) = id else {
        return not_found();
    };

    match state.drawings.get(id, user.id).await {
        Ok(drawing) => {
            let view = state.drawings.view(&drawing);
            Html(pages::canvas_page(&user.username, Some(&view))).into_response()
        }
        Err(DrawingError::NotFound) => not_found(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

/// GET /profile - the caller's drawings, newest first
pub async fn profile(
    State(state): State<StudioState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Html<String>, ApiError> {
    let drawings = state.drawings.list(user.id).await?;
    let views: Vec<_> = drawings.iter().map(|d| state.drawings.view(d)).collect();
    Ok(Html(pages::profile_page(&user.username, &views)))
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(pages::not_found_page())).into_response()
}

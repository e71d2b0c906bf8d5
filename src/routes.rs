use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::database::AccountStore;
use crate::handlers::{generator, health, studio};
use crate::middleware::{require_api_session, require_session, SessionGuard};
use crate::state::{GeneratorState, StudioState};

/// Password generator app
pub fn generator_router(state: GeneratorState) -> Router {
    let guard = SessionGuard::new(
        state.sessions.clone(),
        AccountStore::new(state.pool.clone()),
        generator::LOGIN_PATH,
    );

    let protected = Router::new()
        .route(
            "/generator",
            get(generator::generator_page).post(generator::generate),
        )
        .route_layer(middleware::from_fn_with_state(guard, require_session));

    Router::new()
        .route("/", get(generator::register_page).post(generator::register))
        .route("/login", get(generator::login_page).post(generator::login))
        .route("/logout", get(generator::logout))
        .route("/health", get(health::health))
        .merge(protected)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Drawing studio app
pub fn studio_router(state: StudioState) -> Router {
    let guard = SessionGuard::new(
        state.sessions.clone(),
        AccountStore::new(state.pool.clone()),
        studio::LOGIN_PATH,
    );

    let pages = Router::new()
        .route("/studio", get(studio::studio_page))
        .route("/studio/:id", get(studio::edit_page))
        .route("/profile", get(studio::profile))
        .route_layer(middleware::from_fn_with_state(guard.clone(), require_session));

    let api = Router::new()
        .route("/api/save_drawing", post(studio::save_drawing))
        .route("/api/drawings", get(studio::list_drawings))
        .route(
            "/api/drawings/:id",
            put(studio::update_drawing).delete(studio::delete_drawing),
        )
        .route_layer(middleware::from_fn_with_state(guard, require_api_session));

    let body_limit = state.max_request_size_bytes;

    Router::new()
        .route("/", get(studio::landing))
        .route("/register", get(studio::register_page).post(studio::register))
        .route("/login", get(studio::login_page).post(studio::login))
        .route("/logout", get(studio::logout))
        .route("/health", get(health::health))
        .merge(pages)
        .merge(api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}

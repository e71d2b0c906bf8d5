// handlers/mod.rs - request handlers for both applications
//
// Public routes (registration, login, landing) take no session. Everything
// else sits behind the session guard, which injects `SessionUser` into the
// request extensions before the handler runs.

pub mod generator;
pub mod health;
pub mod studio;

use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::auth::{AuthError, SessionKeys};
use crate::database::User;
use crate::error::ApiError;

/// `?notice=` on login and registration pages
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

/// Set the session cookie for `user` and redirect to the landing page
pub(crate) fn start_session(keys: &SessionKeys, user: &User, landing: &str) -> Response {
    match keys.issue(user) {
        Ok(token) => (
            CookieJar::new().add(keys.login_cookie(token)),
            Redirect::to(landing),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Clear the session cookie and redirect
pub(crate) fn end_session(keys: &SessionKeys, to: &str) -> Response {
    (CookieJar::new().add(keys.logout_cookie()), Redirect::to(to)).into_response()
}

/// Re-render the form with the error inline, or fall back to the JSON error
/// for failures the user cannot fix.
pub(crate) fn form_error(err: AuthError, render: impl FnOnce(&str) -> String) -> Response {
    if err.is_user_facing() {
        let message = err.to_string();
        let status = ApiError::from(err).status_code();
        (status, Html(render(&message))).into_response()
    } else {
        ApiError::from(err).into_response()
    }
}

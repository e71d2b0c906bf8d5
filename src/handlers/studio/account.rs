use axum::{
    extract::{Query, State},
    response::{Html, Response},
    Form,
};
use serde::Deserialize;

use super::{LANDING_PATH, LOGIN_PATH};
use crate::handlers::{end_session, form_error, start_session, NoticeQuery};
use crate::state::StudioState;
use crate::views::{self, studio as pages};

#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    pub username: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// GET /register
pub async fn register_page() -> Html<String> {
    Html(pages::register_page(None))
}

/// POST /register - create the account and start a session
pub async fn register(State(state): State<StudioState>, Form(form): Form<RegisterForm>) -> Response {
    let username = form.username.unwrap_or_default();
    let password = form.password.unwrap_or_default();

    match state
        .accounts
        .register(&username, &password, form.confirm_password.as_deref())
        .await
    {
        Ok(user) => start_session(&state.sessions, &user, LANDING_PATH),
        Err(err) => form_error(err, |message| pages::register_page(Some(message))),
    }
}

/// GET /login
pub async fn login_page(Query(query): Query<NoticeQuery>) -> Html<String> {
    Html(pages::login_page(
        views::notice_message(query.notice.as_deref()),
        None,
    ))
}

/// POST /login
pub async fn login(State(state): State<StudioState>, Form(form): Form<LoginForm>) -> Response {
    let username = form.username.unwrap_or_default();
    let password = form.password.unwrap_or_default();

    match state.accounts.authenticate(&username, &password).await {
        Ok(user) => start_session(&state.sessions, &user, LANDING_PATH),
        Err(err) => form_error(err, |message| pages::login_page(None, Some(message))),
    }
}

/// GET /logout
pub async fn logout(State(state): State<StudioState>) -> Response {
    end_session(&state.sessions, &format!("{}?notice=logged_out", LOGIN_PATH))
}

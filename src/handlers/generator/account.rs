use axum::{
    extract::{Query, State},
    response::{Html, Response},
    Form,
};
use serde::Deserialize;

use super::{LANDING_PATH, LOGIN_PATH};
use crate::handlers::{end_session, form_error, start_session, NoticeQuery};
use crate::state::GeneratorState;
use crate::views::{self, generator as pages};

/// Form fields shared by registration and login
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsForm {
    pub login: Option<String>,
    pub password: Option<String>,
}

/// GET / - registration form
pub async fn register_page(Query(query): Query<NoticeQuery>) -> Html<String> {
    Html(pages::register_page(
        views::notice_message(query.notice.as_deref()),
        None,
    ))
}

/// POST / - create the account and start a session
pub async fn register(State(state): State<GeneratorState>, Form(form): Form<CredentialsForm>) -> Response {
    let login = form.login.unwrap_or_default();
    let password = form.password.unwrap_or_default();

    match state.accounts.register(&login, &password, None).await {
        Ok(user) => start_session(&state.sessions, &user, LANDING_PATH),
        Err(err) => form_error(err, |message| pages::register_page(None, Some(message))),
    }
}

/// GET /login - login form
pub async fn login_page(Query(query): Query<NoticeQuery>) -> Html<String> {
    Html(pages::login_page(
        views::notice_message(query.notice.as_deref()),
        None,
    ))
}

/// POST /login - verify credentials and start a session
pub async fn login(State(state): State<GeneratorState>, Form(form): Form<CredentialsForm>) -> Response {
    let login = form.login.unwrap_or_default();
    let password = form.password.unwrap_or_default();

    match state.accounts.authenticate(&login, &password).await {
        Ok(user) => start_session(&state.sessions, &user, LANDING_PATH),
        Err(err) => form_error(err, |message| pages::login_page(None, Some(message))),
    }
}

/// GET /logout - clear the session and return to registration
pub async fn logout(State(state): State<GeneratorState>) -> Response {
    end_session(&state.sessions, LOGIN_PATH)
}

mod common;

use anyhow::{Context, Result};
use reqwest::{header, StatusCode};

use common::{generated_passwords, location, TestServer};

async fn register(server: &TestServer, login: &str, password: &str) -> Result<String> {
    let res = server
        .client
        .post(server.url("/"))
        .form(&[("login", login), ("password", password)])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/generator"));
    server.session_cookie(&res).context("registration set no session cookie")
}

async fn generate(server: &TestServer, cookie: &str, form: &[(&str, &str)]) -> Result<String> {
    let res = server
        .client
        .post(server.url("/generator"))
        .header(header::COOKIE, cookie)
        .form(form)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(res.text().await?)
}

async fn history_rows(server: &TestServer) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM password_history")
        .fetch_one(&server.pool)
        .await?;
    Ok(count)
}

#[tokio::test]
async fn health_reports_database() -> Result<()> {
    let server = common::generator_server().await?;
    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    Ok(())
}

#[tokio::test]
async fn generator_requires_a_session() -> Result<()> {
    let server = common::generator_server().await?;

    let res = server.client.get(server.url("/generator")).send().await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/?notice=login_required"));

    let forged = server
        .client
        .get(server.url("/generator"))
        .header(header::COOKIE, "generator_session=not-a-token")
        .send()
        .await?;
    assert_eq!(forged.status(), StatusCode::SEE_OTHER);
    Ok(())
}

#[tokio::test]
async fn duplicate_registration_is_rejected() -> Result<()> {
    let server = common::generator_server().await?;
    register(&server, "alice", "pw").await?;

    let res = server
        .client
        .post(server.url("/"))
        .form(&[("login", "alice"), ("password", "other")])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert!(server.session_cookie(&res).is_none());
    assert!(res.text().await?.contains("Username is already taken"));

    let (users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&server.pool)
        .await?;
    assert_eq!(users, 1);
    Ok(())
}

#[tokio::test]
async fn failed_logins_look_the_same() -> Result<()> {
    let server = common::generator_server().await?;
    register(&server, "alice", "right").await?;

    let wrong_password = server
        .client
        .post(server.url("/login"))
        .form(&[("login", "alice"), ("password", "wrong")])
        .send()
        .await?;
    let unknown_user = server
        .client
        .post(server.url("/login"))
        .form(&[("login", "nobody"), ("password", "right")])
        .send()
        .await?;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert!(server.session_cookie(&wrong_password).is_none());
    assert_eq!(wrong_password.text().await?, unknown_user.text().await?);

    let ok = server
        .client
        .post(server.url("/login"))
        .form(&[("login", "alice"), ("password", "right")])
        .send()
        .await?;
    assert_eq!(ok.status(), StatusCode::SEE_OTHER);
    assert!(server.session_cookie(&ok).is_some());
    Ok(())
}

#[tokio::test]
async fn low_complexity_yields_lowercase_batch_and_history() -> Result<()> {
    let server = common::generator_server().await?;
    let cookie = register(&server, "alice", "pw").await?;

    let html = generate(
        &server,
        &cookie,
        &[("length", "8"), ("count", "3"), ("complexity", "low")],
    )
    .await?;
    let passwords = generated_passwords(&html);

    assert_eq!(passwords.len(), 3);
    for password in &passwords {
        assert_eq!(password.len(), 8);
        assert!(password.chars().all(|c| c.is_ascii_lowercase()), "{}", password);
    }
    assert_eq!(history_rows(&server).await?, 3);
    Ok(())
}

#[tokio::test]
async fn high_complexity_stays_alphanumeric() -> Result<()> {
    let server = common::generator_server().await?;
    let cookie = register(&server, "alice", "pw").await?;

    let html = generate(
        &server,
        &cookie,
        &[("length", "32"), ("count", "5"), ("complexity", "high")],
    )
    .await?;
    let passwords = generated_passwords(&html);

    assert_eq!(passwords.len(), 5);
    assert!(passwords
        .iter()
        .all(|p| p.len() == 32 && p.chars().all(|c| c.is_ascii_alphanumeric())));
    Ok(())
}

#[tokio::test]
async fn invalid_input_renders_one_error_and_writes_nothing() -> Result<()> {
    let server = common::generator_server().await?;
    let cookie = register(&server, "alice", "pw").await?;

    for form in [
        [("length", "eight"), ("count", "3"), ("complexity", "low")],
        [("length", "8"), ("count", "0"), ("complexity", "low")],
        [("length", "8"), ("count", "3"), ("complexity", "extreme")],
        [("length", "8"), ("count", "100000"), ("complexity", "low")],
    ] {
        let html = generate(&server, &cookie, &form).await?;
        assert!(html.contains("Invalid input"), "{}", html);
        assert!(generated_passwords(&html).is_empty());
    }

    assert_eq!(history_rows(&server).await?, 0);
    Ok(())
}

#[tokio::test]
async fn logout_clears_the_cookie() -> Result<()> {
    let server = common::generator_server().await?;
    register(&server, "alice", "pw").await?;

    let res = server.client.get(server.url("/logout")).send().await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/"));

    let cleared = res
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .context("logout set no cookie")?;
    assert!(cleared.starts_with("generator_session=;"));
    assert!(cleared.contains("Max-Age=0"));
    Ok(())
}

#[tokio::test]
async fn session_outliving_its_account_is_sent_to_login() -> Result<()> {
    let server = common::generator_server().await?;
    let cookie = register(&server, "alice", "pw").await?;

    sqlx::query("DELETE FROM users").execute(&server.pool).await?;

    let res = server
        .client
        .post(server.url("/generator"))
        .header(header::COOKIE, &cookie)
        .form(&[("length", "8"), ("count", "2"), ("complexity", "low")])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/?notice=login_required"));
    assert_eq!(history_rows(&server).await?, 0);
    Ok(())
}

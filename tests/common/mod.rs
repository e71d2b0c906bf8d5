#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::Router;
use reqwest::{header, redirect::Policy, Client, Response, StatusCode};
use sqlx::SqlitePool;

use sketchpass::config::AppConfig;
use sketchpass::database::DatabaseManager;
use sketchpass::routes::{generator_router, studio_router};
use sketchpass::state::{GeneratorState, StudioState, GENERATOR_COOKIE, STUDIO_COOKIE};

pub const PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// One application served in-process against its own in-memory database
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub pool: SqlitePool,
    pub client: Client,
    cookie_name: &'static str,
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.database.generator_url = "sqlite::memory:".to_string();
    config.database.studio_url = "sqlite::memory:".to_string();
    config.security.session_secret = "integration-test-secret".to_string();
    config
}

pub async fn generator_server() -> Result<TestServer> {
    let config = test_config();
    let pool = DatabaseManager::connect(&config.database.generator_url, &config.database).await?;
    DatabaseManager::migrate_generator(&pool).await?;
    let app = generator_router(GeneratorState::new(pool.clone(), &config)?);
    TestServer::spawn(app, pool, GENERATOR_COOKIE).await
}

pub async fn studio_server() -> Result<TestServer> {
    let config = test_config();
    let pool = DatabaseManager::connect(&config.database.studio_url, &config.database).await?;
    DatabaseManager::migrate_studio(&pool).await?;
    let app = studio_router(StudioState::new(pool.clone(), &config)?);
    TestServer::spawn(app, pool, STUDIO_COOKIE).await
}

impl TestServer {
    async fn spawn(app: Router, pool: SqlitePool, cookie_name: &'static str) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        // Redirects are asserted on, never followed
        let client = Client::builder().redirect(Policy::none()).build()?;

        let server = Self {
            port,
            base_url,
            pool,
            client,
            cookie_name,
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `name=token` from a login response's Set-Cookie header
    pub fn session_cookie(&self, resp: &Response) -> Option<String> {
        let prefix = format!("{}=", self.cookie_name);
        resp.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&prefix))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}

pub fn location(resp: &Response) -> Option<&str> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// Text between each `<code>` and `</code>` on a generator results page
pub fn generated_passwords(html: &str) -> Vec<String> {
    html.split("<code>")
        .skip(1)
        .filter_map(|chunk| chunk.split("</code>").next())
        .map(str::to_string)
        .collect()
}

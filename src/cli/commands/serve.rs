use anyhow::Context;
use axum::Router;
use clap::Subcommand;
use tracing::info;

use crate::config::{config, AppConfig};
use crate::database::DatabaseManager;
use crate::routes::{generator_router, studio_router};
use crate::state::{GeneratorState, StudioState};

#[derive(Subcommand)]
pub enum ServeCommands {
    #[command(about = "Password generator (default port 7000)")]
    Generator {
        #[arg(long, help = "Port to listen on, overrides GENERATOR_PORT")]
        port: Option<u16>,
    },

    #[command(about = "Drawing studio (default port 5000)")]
    Studio {
        #[arg(long, help = "Port to listen on, overrides STUDIO_PORT")]
        port: Option<u16>,
    },
}

pub async fn handle(cmd: ServeCommands) -> anyhow::Result<()> {
    let config = config();
    info!("Starting in {:?} mode", config.environment);

    match cmd {
        ServeCommands::Generator { port } => {
            let app = generator_app(config).await?;
            serve("generator", app, &config.server.host, port.unwrap_or(config.server.generator_port)).await
        }
        ServeCommands::Studio { port } => {
            let app = studio_app(config).await?;
            serve("studio", app, &config.server.host, port.unwrap_or(config.server.studio_port)).await
        }
    }
}

async fn generator_app(config: &AppConfig) -> anyhow::Result<Router> {
    let pool = DatabaseManager::connect(&config.database.generator_url, &config.database)
        .await
        .context("failed to open generator database")?;
    DatabaseManager::migrate_generator(&pool).await?;
    let state = GeneratorState::new(pool, config)?;
    Ok(generator_router(state))
}

async fn studio_app(config: &AppConfig) -> anyhow::Result<Router> {
    let pool = DatabaseManager::connect(&config.database.studio_url, &config.database)
        .await
        .context("failed to open studio database")?;
    DatabaseManager::migrate_studio(&pool).await?;
    let state = StudioState::new(pool, config)?;
    Ok(studio_router(state))
}

async fn serve(name: &str, app: Router, host: &str, port: u16) -> anyhow::Result<()> {
    let bind_addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("{} listening on http://{}", name, bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("{} shut down", name);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

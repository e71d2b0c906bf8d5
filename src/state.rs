use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::auth::{AuthError, CredentialScheme, SessionKeys};
use crate::config::{AppConfig, GeneratorConfig};
use crate::database::{AccountStore, DrawingRepository, PasswordHistory};
use crate::services::{AccountService, DrawingService, RegistrationPolicy};

pub const GENERATOR_AUDIENCE: &str = "sketchpass-generator";
pub const GENERATOR_COOKIE: &str = "generator_session";
pub const STUDIO_AUDIENCE: &str = "sketchpass-studio";
pub const STUDIO_COOKIE: &str = "studio_session";

/// Shared state of the password generator app
#[derive(Clone)]
pub struct GeneratorState {
    pub pool: SqlitePool,
    pub accounts: AccountService,
    pub history: PasswordHistory,
    pub sessions: SessionKeys,
    pub limits: GeneratorConfig,
}

impl GeneratorState {
    /// Expects a pool whose generator schema is already migrated
    pub fn new(pool: SqlitePool, config: &AppConfig) -> Result<Self, AuthError> {
        let scheme = if config.generator.hash_passwords {
            CredentialScheme::Argon2
        } else {
            CredentialScheme::Plain
        };

        Ok(Self {
            accounts: AccountService::new(
                AccountStore::new(pool.clone()),
                scheme,
                RegistrationPolicy::generator(),
            ),
            history: PasswordHistory::new(pool.clone()),
            sessions: SessionKeys::from_config(&config.security, GENERATOR_AUDIENCE, GENERATOR_COOKIE)?,
            limits: config.generator.clone(),
            pool,
        })
    }
}

/// Shared state of the drawing studio app
#[derive(Clone)]
pub struct StudioState {
    pub pool: SqlitePool,
    pub accounts: AccountService,
    pub drawings: DrawingService,
    pub sessions: SessionKeys,
    pub max_request_size_bytes: usize,
}

impl StudioState {
    /// Expects a pool whose studio schema is already migrated
    pub fn new(pool: SqlitePool, config: &AppConfig) -> Result<Self, AuthError> {
        Ok(Self {
            accounts: AccountService::new(
                AccountStore::new(pool.clone()),
                CredentialScheme::Argon2,
                RegistrationPolicy::studio(config.studio.min_password_length),
            ),
            drawings: DrawingService::new(DrawingRepository::new(pool.clone()), &config.studio),
            sessions: SessionKeys::from_config(&config.security, STUDIO_AUDIENCE, STUDIO_COOKIE)?,
            max_request_size_bytes: config.studio.max_request_size_bytes,
            pool,
        })
    }
}

impl FromRef<GeneratorState> for SqlitePool {
    fn from_ref(state: &GeneratorState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<StudioState> for SqlitePool {
    fn from_ref(state: &StudioState) -> Self {
        state.pool.clone()
    }
}

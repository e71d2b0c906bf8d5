use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub generator: GeneratorConfig,
    pub studio: StudioConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub generator_port: u16,
    pub studio_port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub generator_url: String,
    pub studio_url: String,
    pub max_connections: u32,
    pub connection_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub session_secret: String,
    pub session_expiry_hours: u64,
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub max_length: usize,
    pub max_count: usize,
    /// Store generator account passwords as Argon2 hashes instead of verbatim.
    pub hash_passwords: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioConfig {
    pub min_password_length: usize,
    pub default_title: String,
    /// Fixed offset (hours east of UTC) used when rendering drawing timestamps.
    pub display_offset_hours: i32,
    pub max_request_size_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("GENERATOR_PORT") {
            self.server.generator_port = v.parse().unwrap_or(self.server.generator_port);
        }
        if let Ok(v) = env::var("STUDIO_PORT") {
            self.server.studio_port = v.parse().unwrap_or(self.server.studio_port);
        }

        // Database overrides
        if let Ok(v) = env::var("GENERATOR_DATABASE_URL") {
            self.database.generator_url = v;
        }
        if let Ok(v) = env::var("STUDIO_DATABASE_URL") {
            self.database.studio_url = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout_secs =
                v.parse().unwrap_or(self.database.connection_timeout_secs);
        }

        // Security overrides
        if let Ok(v) = env::var("SESSION_SECRET") {
            self.security.session_secret = v;
        }
        if let Ok(v) = env::var("SESSION_EXPIRY_HOURS") {
            self.security.session_expiry_hours =
                v.parse().unwrap_or(self.security.session_expiry_hours);
        }
        if let Ok(v) = env::var("SESSION_COOKIE_SECURE") {
            self.security.cookie_secure = v.parse().unwrap_or(self.security.cookie_secure);
        }

        // Generator overrides
        if let Ok(v) = env::var("GENERATOR_MAX_LENGTH") {
            self.generator.max_length = v.parse().unwrap_or(self.generator.max_length);
        }
        if let Ok(v) = env::var("GENERATOR_MAX_COUNT") {
            self.generator.max_count = v.parse().unwrap_or(self.generator.max_count);
        }
        if let Ok(v) = env::var("GENERATOR_HASH_PASSWORDS") {
            self.generator.hash_passwords = v.parse().unwrap_or(self.generator.hash_passwords);
        }

        // Studio overrides
        if let Ok(v) = env::var("STUDIO_MIN_PASSWORD_LENGTH") {
            self.studio.min_password_length =
                v.parse().unwrap_or(self.studio.min_password_length);
        }
        if let Ok(v) = env::var("STUDIO_DEFAULT_TITLE") {
            self.studio.default_title = v;
        }
        if let Ok(v) = env::var("STUDIO_DISPLAY_OFFSET_HOURS") {
            self.studio.display_offset_hours =
                v.parse().unwrap_or(self.studio.display_offset_hours);
        }
        if let Ok(v) = env::var("STUDIO_MAX_REQUEST_SIZE_BYTES") {
            self.studio.max_request_size_bytes =
                v.parse().unwrap_or(self.studio.max_request_size_bytes);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                generator_port: 7000,
                studio_port: 5000,
            },
            database: DatabaseConfig {
                generator_url: "sqlite://generator.db".to_string(),
                studio_url: "sqlite://studio.db".to_string(),
                max_connections: 5,
                connection_timeout_secs: 30,
            },
            security: SecurityConfig {
                session_secret: "development-session-secret".to_string(),
                session_expiry_hours: 24 * 7, // 1 week
                cookie_secure: false,
            },
            generator: GeneratorConfig {
                max_length: 1024,
                max_count: 100,
                hash_passwords: false,
            },
            studio: StudioConfig {
                min_password_length: 6,
                default_title: "Untitled".to_string(),
                display_offset_hours: 4,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
        }
    }

    fn staging() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Staging;
        config.server.host = "0.0.0.0".to_string();
        config.database.max_connections = 10;
        config.database.connection_timeout_secs = 10;
        // No built-in secret outside development; must come from SESSION_SECRET
        config.security.session_secret = String::new();
        config.security.session_expiry_hours = 24;
        config.security.cookie_secure = true;
        config
    }

    fn production() -> Self {
        let mut config = Self::staging();
        config.environment = Environment::Production;
        config.database.max_connections = 20;
        config.database.connection_timeout_secs = 5;
        config.security.session_expiry_hours = 12;
        config.generator.max_length = 256;
        config.generator.max_count = 50;
        config.studio.max_request_size_bytes = 5 * 1024 * 1024; // 5MB
        config
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.server.generator_port, 7000);
        assert_eq!(config.studio.min_password_length, 6);
        assert_eq!(config.studio.display_offset_hours, 4);
        assert!(!config.security.session_secret.is_empty());
        assert!(!config.generator.hash_passwords);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(matches!(config.environment, Environment::Production));
        assert!(config.security.session_secret.is_empty());
        assert!(config.security.cookie_secure);
        assert_eq!(config.generator.max_count, 50);
    }
}

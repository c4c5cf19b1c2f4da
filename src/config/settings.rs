//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_PROFILE_RETRY_ATTEMPTS,
    DEFAULT_PROFILE_RETRY_DELAY_MS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_SIMULATED_DELAY_MS, DEV_JWT_SECRET, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    /// Base URL of the import service; `None` means imports are simulated
    pub import_api_url: Option<String>,
    import_access_token: Option<String>,
    pub simulated_delay_ms: u64,
    pub profile_retry_attempts: u32,
    pub profile_retry_delay_ms: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("import_api_url", &self.import_api_url)
            .field("import_access_token", &"[REDACTED]")
            .field("simulated_delay_ms", &self.simulated_delay_ms)
            .field("profile_retry_attempts", &self.profile_retry_attempts)
            .field("profile_retry_delay_ms", &self.profile_retry_delay_ms)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Fails if `JWT_SECRET` is missing in a release build or is too short.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        Self::builder(jwt_secret)
            .map(|config| Self {
                database_url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                jwt_expiration_hours: parse_var("JWT_EXPIRATION_HOURS")
                    .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
                server_host: env::var("SERVER_HOST")
                    .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                server_port: parse_var("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
                import_api_url: non_empty_var("IMPORT_API_URL"),
                import_access_token: non_empty_var("IMPORT_ACCESS_TOKEN"),
                simulated_delay_ms: parse_var("IMPORT_SIMULATED_DELAY_MS")
                    .unwrap_or(DEFAULT_SIMULATED_DELAY_MS),
                profile_retry_attempts: parse_var("PROFILE_RETRY_ATTEMPTS")
                    .unwrap_or(DEFAULT_PROFILE_RETRY_ATTEMPTS),
                profile_retry_delay_ms: parse_var("PROFILE_RETRY_DELAY_MS")
                    .unwrap_or(DEFAULT_PROFILE_RETRY_DELAY_MS),
                ..config
            })
    }

    /// Build a configuration with defaults and the given JWT secret.
    ///
    /// Used by tests and embedders that do not read the environment.
    pub fn builder(jwt_secret: impl Into<String>) -> AppResult<Self> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret,
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            import_api_url: None,
            import_access_token: None,
            simulated_delay_ms: DEFAULT_SIMULATED_DELAY_MS,
            profile_retry_attempts: DEFAULT_PROFILE_RETRY_ATTEMPTS,
            profile_retry_delay_ms: DEFAULT_PROFILE_RETRY_DELAY_MS,
        })
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Access token the import client presents, if configured.
    pub fn import_access_token(&self) -> Option<&str> {
        self.import_access_token.as_deref()
    }

    /// Delay applied by simulated imports.
    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }

    /// Delay between profile update attempts.
    pub fn profile_retry_delay(&self) -> Duration {
        Duration::from_millis(self.profile_retry_delay_ms)
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

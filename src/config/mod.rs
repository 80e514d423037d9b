use crate::core::{AppError, Result};
use std::env;
use std::path::PathBuf;

pub mod auth;
pub mod database;
pub mod server;

pub use auth::{AuthConfig, CookieSettings, SameSitePolicy};
pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Fallback signing secret, only accepted outside production
pub const INSECURE_DEFAULT_SECRET: &str = "finconsole-insecure-CHANGE-ME";

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub security: SecurityConfig,
    pub bootstrap: Option<BootstrapAdmin>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "prod" | "production" => Ok(Environment::Prod),
            other => Err(AppError::Configuration(format!(
                "Invalid APP_ENV '{}': expected dev or prod",
                other
            ))),
        }
    }

    pub fn is_prod(self) -> bool {
        self == Environment::Prod
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Dev => write!(f, "dev"),
            Environment::Prod => write!(f, "prod"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// `LOG_FORMAT=json` switches the subscriber to JSON lines
    pub json_logs: bool,
    /// Directory holding `finance.json` and `categories.json`
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub cors_allowed_origins: Vec<String>,
    pub rate_limit_per_minute: u32,
}

/// Admin account created at start-up when it does not exist yet
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let app_env = Environment::parse(&env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string()))?;

        let config = Config {
            app: AppConfig {
                env: app_env,
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "debug".to_string()),
                json_logs: env::var("LOG_FORMAT")
                    .map(|format| format.eq_ignore_ascii_case("json"))
                    .unwrap_or(false),
                data_dir: PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string())),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            auth: AuthConfig::from_env(app_env)?,
            security: SecurityConfig {
                cors_allowed_origins: parse_origins(
                    &env::var("CORS_ALLOWED_ORIGINS")
                        .unwrap_or_else(|_| "http://localhost:3000".to_string()),
                ),
                rate_limit_per_minute: database::env_u32("RATE_LIMIT_PER_MINUTE", 1000)?,
            },
            bootstrap: match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
                (Ok(email), Ok(password)) if !email.is_empty() && !password.is_empty() => {
                    Some(BootstrapAdmin { email, password })
                }
                _ => None,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.auth.validate(self.app.env)?;

        if self.security.rate_limit_per_minute == 0 {
            return Err(AppError::Configuration(
                "Rate limit must be greater than 0".to_string(),
            ));
        }

        if self.security.cors_allowed_origins.is_empty() {
            return Err(AppError::Configuration(
                "CORS_ALLOWED_ORIGINS must list at least one origin".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| origin.trim_end_matches('/').to_string())
        .collect()
}

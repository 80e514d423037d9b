use crate::config::{Environment, INSECURE_DEFAULT_SECRET};
use crate::core::{AppError, Result};
use std::env;

/// Ten years
pub const MAX_TOKEN_TTL_SECONDS: i64 = 315_360_000;

/// Token lifetimes and cookie policy for the JWT layer
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
    pub cookies: CookieSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSitePolicy {
    Lax,
    None,
}

/// Cookie names and attributes; they differ between dev and prod
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub access_name: String,
    pub refresh_name: String,
    pub secure: bool,
    pub same_site: SameSitePolicy,
}

impl CookieSettings {
    /// `__Host-` prefixed, secure, cross-site cookies in prod; plain lax cookies in dev
    pub fn for_env(env: Environment) -> Self {
        if env.is_prod() {
            Self {
                access_name: "__Host-access".to_string(),
                refresh_name: "__Host-refresh".to_string(),
                secure: true,
                same_site: SameSitePolicy::None,
            }
        } else {
            Self {
                access_name: "access".to_string(),
                refresh_name: "refresh".to_string(),
                secure: false,
                same_site: SameSitePolicy::Lax,
            }
        }
    }
}

impl AuthConfig {
    pub fn from_env(app_env: Environment) -> Result<Self> {
        Ok(AuthConfig {
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| INSECURE_DEFAULT_SECRET.to_string()),
            access_ttl_seconds: env::var("ACCESS_TOKEN_TTL_SECONDS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .map_err(|_| AppError::Configuration("Invalid ACCESS_TOKEN_TTL_SECONDS".to_string()))?,
            refresh_ttl_seconds: env::var("REFRESH_TOKEN_TTL_SECONDS")
                .unwrap_or_else(|_| "2592000".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid REFRESH_TOKEN_TTL_SECONDS".to_string())
                })?,
            cookies: CookieSettings::for_env(app_env),
        })
    }

    pub fn validate(&self, app_env: Environment) -> Result<()> {
        if self.access_ttl_seconds <= 0 || self.refresh_ttl_seconds <= 0 {
            return Err(AppError::Configuration(
                "Token lifetimes must be greater than 0".to_string(),
            ));
        }

        if self.access_ttl_seconds > MAX_TOKEN_TTL_SECONDS
            || self.refresh_ttl_seconds > MAX_TOKEN_TTL_SECONDS
        {
            return Err(AppError::Configuration(format!(
                "Token lifetimes must not exceed {} seconds",
                MAX_TOKEN_TTL_SECONDS
            )));
        }

        if self.jwt_secret.is_empty() {
            return Err(AppError::Configuration("JWT_SECRET must not be empty".to_string()));
        }

        if app_env.is_prod() && self.jwt_secret == INSECURE_DEFAULT_SECRET {
            return Err(AppError::Configuration(
                "JWT_SECRET must be set in production".to_string(),
            ));
        }

        if self.jwt_secret == INSECURE_DEFAULT_SECRET {
            tracing::warn!("JWT_SECRET not set, using the insecure development default");
        }

        Ok(())
    }
}

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::CookieSettings;
use crate::core::{AppError, Result};
use crate::modules::auth::models::{TokenPair, TokenType};
use crate::modules::auth::services::{verify_password, TokenService};
use crate::modules::users::models::User;
use crate::modules::users::repositories::UserRepository;

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const INVALID_REFRESH: &str = "Invalid refresh token";

/// Login, refresh and request authentication
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    tokens: TokenService,
    cookies: CookieSettings,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository>, tokens: TokenService, cookies: CookieSettings) -> Self {
        Self {
            user_repo,
            tokens,
            cookies,
        }
    }

    pub fn cookies(&self) -> &CookieSettings {
        &self.cookies
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Exchange email + password for a token pair.
    ///
    /// Unknown email, wrong password, unusable password and inactive
    /// accounts all fail with the same message.
    pub async fn login(&self, email: Option<&str>, password: Option<&str>) -> Result<TokenPair> {
        let email = email
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .ok_or_else(|| AppError::validation("Email is required"))?;
        let password = password.unwrap_or_default();

        let Some(user) = self.user_repo.find_by_email(email).await? else {
            warn!("Login attempt for unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        let Some(hash) = user.password_hash.as_deref() else {
            warn!(user_id = user.id, "Login attempt for account without a usable password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(password, hash)? {
            warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        if !user.is_active {
            warn!(user_id = user.id, "Login attempt for inactive account");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        info!(user_id = user.id, "User logged in");
        self.tokens.issue_pair(&user)
    }

    /// Exchange a refresh token for a new access token
    pub async fn refresh(&self, refresh_token: Option<&str>) -> Result<String> {
        let token = refresh_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::unauthorized("No refresh token"))?;

        let claims = self
            .tokens
            .verify(token, TokenType::Refresh)
            .map_err(|_| AppError::unauthorized(INVALID_REFRESH))?;

        let user = self
            .active_user(claims.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_REFRESH))?;

        self.tokens.issue(&user, TokenType::Access)
    }

    /// Resolve the user behind an access token
    pub async fn authenticate(&self, access_token: &str) -> Result<User> {
        let claims = self.tokens.verify(access_token, TokenType::Access)?;

        self.active_user(claims.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("User not found or inactive"))
    }

    async fn active_user(&self, id: i64) -> Result<Option<User>> {
        Ok(self
            .user_repo
            .find_by_id(id)
            .await?
            .filter(|user| user.is_active))
    }
}

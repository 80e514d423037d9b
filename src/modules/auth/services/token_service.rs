use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::core::{AppError, Result};
use crate::modules::auth::models::{Claims, TokenPair, TokenType};
use crate::modules::users::models::User;

type HmacSha256 = Hmac<Sha256>;

const JWT_HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

#[derive(Deserialize)]
struct JwtHeader {
    alg: String,
}

/// Issues and verifies HS256 JSON Web Tokens
#[derive(Clone)]
pub struct TokenService {
    secret: Vec<u8>,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: impl Into<Vec<u8>>, access_ttl_seconds: i64, refresh_ttl_seconds: i64) -> Self {
        Self {
            secret: secret.into(),
            access_ttl_seconds,
            refresh_ttl_seconds,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.jwt_secret.as_bytes().to_vec(),
            config.access_ttl_seconds,
            config.refresh_ttl_seconds,
        )
    }

    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl_seconds
    }

    pub fn refresh_ttl_seconds(&self) -> i64 {
        self.refresh_ttl_seconds
    }

    /// Issue an access + refresh pair for the user
    pub fn issue_pair(&self, user: &User) -> Result<TokenPair> {
        Ok(TokenPair {
            access: self.issue(user, TokenType::Access)?,
            refresh: self.issue(user, TokenType::Refresh)?,
        })
    }

    pub fn issue(&self, user: &User, token_type: TokenType) -> Result<String> {
        self.issue_at(user, token_type, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (epoch seconds)
    pub fn issue_at(&self, user: &User, token_type: TokenType, now: i64) -> Result<String> {
        let ttl = match token_type {
            TokenType::Access => self.access_ttl_seconds,
            TokenType::Refresh => self.refresh_ttl_seconds,
        };

        let exp = now
            .checked_add(ttl)
            .ok_or_else(|| AppError::internal(format!("Token lifetime {}s overflows", ttl)))?;

        let claims = Claims {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
            token_type,
            iat: now,
            exp,
            jti: Uuid::new_v4().simple().to_string(),
        };

        self.encode(&claims)
    }

    /// Serialize and sign arbitrary claims
    pub fn encode(&self, claims: &Claims) -> Result<String> {
        let header = URL_SAFE_NO_PAD.encode(JWT_HEADER);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
        let signing_input = format!("{}.{}", header, payload);

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{}.{}", signing_input, signature))
    }

    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims> {
        self.verify_at(token, expected, Utc::now().timestamp())
    }

    /// Check signature, token type and expiry against `now` (epoch seconds)
    pub fn verify_at(&self, token: &str, expected: TokenType, now: i64) -> Result<Claims> {
        let mut parts = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid_token());
        };

        let header_bytes = URL_SAFE_NO_PAD.decode(header).map_err(|_| invalid_token())?;
        let parsed_header: JwtHeader =
            serde_json::from_slice(&header_bytes).map_err(|_| invalid_token())?;
        if parsed_header.alg != "HS256" {
            return Err(invalid_token());
        }

        let signature = URL_SAFE_NO_PAD.decode(signature).map_err(|_| invalid_token())?;
        let mut mac = self.mac()?;
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(payload.as_bytes());
        // verify_slice compares in constant time
        mac.verify_slice(&signature).map_err(|_| invalid_token())?;

        let payload_bytes = URL_SAFE_NO_PAD.decode(payload).map_err(|_| invalid_token())?;
        let claims: Claims = serde_json::from_slice(&payload_bytes).map_err(|_| invalid_token())?;

        if claims.token_type != expected {
            return Err(invalid_token());
        }

        if claims.exp <= now {
            return Err(AppError::unauthorized("Token has expired"));
        }

        Ok(claims)
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AppError::internal(format!("Invalid signing key: {}", e)))
    }
}

fn invalid_token() -> AppError {
    AppError::unauthorized("Token is invalid")
}

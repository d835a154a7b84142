pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SecurityConfig;

/// Refresh tokens outlive access tokens; they are revoked through logout.
const REFRESH_TOKEN_AGE_DAYS: i64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
    /// Set on refresh tokens so two sessions never share a token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    pub fn new(id: impl Into<String>, username: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            id: id.into(),
            username: username.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: None,
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidSecret,
    InvalidToken(String),
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
            JwtError::InvalidToken(msg) => write!(f, "Invalid JWT token: {}", msg),
        }
    }
}

impl std::error::Error for JwtError {}

/// Signs and verifies the HS256 access and refresh tokens.
#[derive(Clone)]
pub struct TokenManager {
    access_key: String,
    refresh_key: String,
    access_ttl: Duration,
}

impl TokenManager {
    pub fn new(access_key: impl Into<String>, refresh_key: impl Into<String>, access_age_secs: u64) -> Self {
        Self {
            access_key: access_key.into(),
            refresh_key: refresh_key.into(),
            access_ttl: Duration::seconds(i64::try_from(access_age_secs).unwrap_or(i64::MAX / 1000)),
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(
            security.access_token_key.clone(),
            security.refresh_token_key.clone(),
            security.access_token_age_secs,
        )
    }

    pub fn create_access_token(&self, id: &str, username: &str) -> Result<String, JwtError> {
        sign(&self.access_key, &Claims::new(id, username, self.access_ttl))
    }

    pub fn create_refresh_token(&self, id: &str, username: &str) -> Result<String, JwtError> {
        let mut claims = Claims::new(id, username, Duration::days(REFRESH_TOKEN_AGE_DAYS));
        claims.jti = Some(Uuid::new_v4().to_string());
        sign(&self.refresh_key, &claims)
    }

    pub fn verify_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        verify(&self.access_key, token)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        verify(&self.refresh_key, token)
    }
}

fn sign(secret: &str, claims: &Claims) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::new(Algorithm::HS256), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

fn verify(secret: &str, token: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))
}

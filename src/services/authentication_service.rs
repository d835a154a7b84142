use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use super::{ServiceError, ServiceResult};
use crate::auth::password::verify_password;
use crate::auth::TokenManager;
use crate::database::{AuthenticationRepository, UserRepository};
use crate::entities::{NewAuthentication, RefreshToken, UserLogin};

const WRONG_CREDENTIALS: &str = "the credentials you entered are wrong";
const INVALID_REFRESH_TOKEN: &str = "refresh token is not valid";

#[derive(Clone)]
pub struct AuthenticationService {
    users: Arc<dyn UserRepository>,
    authentications: Arc<dyn AuthenticationRepository>,
    tokens: Arc<TokenManager>,
}

impl AuthenticationService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        authentications: Arc<dyn AuthenticationRepository>,
        tokens: Arc<TokenManager>,
    ) -> Self {
        Self {
            users,
            authentications,
            tokens,
        }
    }

    pub async fn login(&self, payload: &Value) -> ServiceResult<NewAuthentication> {
        let login = UserLogin::new(payload)?;

        let hashed = self.users.get_password_by_username(&login.username).await?;
        if !verify_password(login.password, hashed).await? {
            warn!("Failed login for {}", login.username);
            return Err(ServiceError::Authentication(WRONG_CREDENTIALS.to_string()));
        }

        let id = self.users.get_id_by_username(&login.username).await?;
        let access_token = self.tokens.create_access_token(&id, &login.username)?;
        let refresh_token = self.tokens.create_refresh_token(&id, &login.username)?;

        self.authentications.add_token(&refresh_token).await?;

        Ok(NewAuthentication {
            access_token,
            refresh_token,
        })
    }

    /// Issues a fresh access token for a stored refresh token.
    pub async fn refresh(&self, payload: &Value) -> ServiceResult<String> {
        let token = RefreshToken::new(payload, "refresh the access token")?;

        let claims = self
            .tokens
            .verify_refresh_token(token.as_str())
            .map_err(|_| ServiceError::Invariant(INVALID_REFRESH_TOKEN.to_string()))?;
        self.authentications.check_availability_token(token.as_str()).await?;

        Ok(self.tokens.create_access_token(&claims.id, &claims.username)?)
    }

    pub async fn logout(&self, payload: &Value) -> ServiceResult<()> {
        let token = RefreshToken::new(payload, "log out")?;

        self.authentications.check_availability_token(token.as_str()).await?;
        self.authentications.delete_token(token.as_str()).await?;
        Ok(())
    }
}

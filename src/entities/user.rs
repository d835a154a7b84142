use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{require_strings, EntityError};

const MAX_USERNAME_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUser {
    pub username: String,
    pub password: String,
    pub fullname: String,
}

impl RegisterUser {
    pub fn new(payload: &Value) -> Result<Self, EntityError> {
        let [username, password, fullname] =
            require_strings(payload, ["username", "password", "fullname"], "create a new user")?;

        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(EntityError::UsernameTooLong);
        }
        if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(EntityError::UsernameRestricted);
        }

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
            fullname: fullname.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AddedUser {
    pub id: String,
    pub username: String,
    pub fullname: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLogin {
    pub username: String,
    pub password: String,
}

impl UserLogin {
    pub fn new(payload: &Value) -> Result<Self, EntityError> {
        let [username, password] = require_strings(payload, ["username", "password"], "log in")?;

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Token pair handed out on login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAuthentication {
    pub access_token: String,
    pub refresh_token: String,
}

/// `{ refreshToken }` body shared by refresh and logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken(pub String);

impl RefreshToken {
    pub fn new(payload: &Value, action: &'static str) -> Result<Self, EntityError> {
        let [token] = require_strings(payload, ["refreshToken"], action)?;
        Ok(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

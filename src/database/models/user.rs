use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    /// bcrypt hash
    #[serde(skip_serializing)]
    pub password: String,
    pub fullname: String,
}

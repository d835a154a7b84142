use async_trait::async_trait;

use super::PostgresStore;
use crate::database::manager::DatabaseError;
use crate::database::models::generate_id;
use crate::database::repository::{UserRepository, USERNAME_TAKEN, USERNAME_UNKNOWN};
use crate::entities::{AddedUser, RegisterUser};

#[async_trait]
impl UserRepository for PostgresStore {
    async fn verify_available_username(&self, username: &str) -> Result<(), DatabaseError> {
        let existing = sqlx::query_scalar::<_, String>("SELECT id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        match existing {
            Some(_) => Err(DatabaseError::Invariant(USERNAME_TAKEN.to_string())),
            None => Ok(()),
        }
    }

    async fn add_user(&self, user: &RegisterUser) -> Result<AddedUser, DatabaseError> {
        let added = sqlx::query_as::<_, AddedUser>(
            "INSERT INTO users (id, username, password, fullname) VALUES ($1, $2, $3, $4) \
             RETURNING id, username, fullname",
        )
        .bind(generate_id("user"))
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.fullname)
        .fetch_one(&self.pool)
        .await?;

        Ok(added)
    }

    async fn get_password_by_username(&self, username: &str) -> Result<String, DatabaseError> {
        sqlx::query_scalar::<_, String>("SELECT password FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::Invariant(USERNAME_UNKNOWN.to_string()))
    }

    async fn get_id_by_username(&self, username: &str) -> Result<String, DatabaseError> {
        sqlx::query_scalar::<_, String>("SELECT id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::Invariant(USERNAME_UNKNOWN.to_string()))
    }
}

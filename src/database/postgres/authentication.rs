use async_trait::async_trait;

use super::PostgresStore;
use crate::database::manager::DatabaseError;
use crate::database::repository::{AuthenticationRepository, REFRESH_TOKEN_UNKNOWN};

#[async_trait]
impl AuthenticationRepository for PostgresStore {
    async fn add_token(&self, token: &str) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO authentications (token) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn check_availability_token(&self, token: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("SELECT token FROM authentications WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        match result {
            Some(_) => Ok(()),
            None => Err(DatabaseError::Invariant(REFRESH_TOKEN_UNKNOWN.to_string())),
        }
    }

    async fn delete_token(&self, token: &str) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM authentications WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

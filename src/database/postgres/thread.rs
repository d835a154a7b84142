use async_trait::async_trait;

use super::PostgresStore;
use crate::database::manager::DatabaseError;
use crate::database::models::{generate_id, timestamp};
use crate::database::repository::{ThreadRepository, THREAD_NOT_FOUND};
use crate::entities::thread_detail::ThreadRecord;
use crate::entities::{AddedThread, NewThread};

#[async_trait]
impl ThreadRepository for PostgresStore {
    async fn add_thread(&self, thread: &NewThread) -> Result<AddedThread, DatabaseError> {
        let added = sqlx::query_as::<_, AddedThread>(
            "INSERT INTO threads (id, title, body, owner, date) VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, title, owner",
        )
        .bind(generate_id("thread"))
        .bind(&thread.title)
        .bind(&thread.body)
        .bind(&thread.owner)
        .bind(timestamp())
        .fetch_one(&self.pool)
        .await?;

        Ok(added)
    }

    async fn verify_thread_availability(&self, thread_id: &str) -> Result<(), DatabaseError> {
        let found = sqlx::query("SELECT id FROM threads WHERE id = $1")
            .bind(thread_id)
            .fetch_optional(&self.pool)
            .await?;

        match found {
            Some(_) => Ok(()),
            None => Err(DatabaseError::NotFound(THREAD_NOT_FOUND.to_string())),
        }
    }

    async fn get_thread_by_id(&self, thread_id: &str) -> Result<ThreadRecord, DatabaseError> {
        sqlx::query_as::<_, ThreadRecord>(
            "SELECT t.id, t.title, t.body, t.date, u.username \
             FROM threads t \
             JOIN users u ON u.id = t.owner \
             WHERE t.id = $1",
        )
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(THREAD_NOT_FOUND.to_string()))
    }
}

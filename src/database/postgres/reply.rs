use async_trait::async_trait;

use super::PostgresStore;
use crate::database::manager::DatabaseError;
use crate::database::models::{generate_id, timestamp};
use crate::database::repository::{ReplyRepository, REPLY_FORBIDDEN, REPLY_NOT_FOUND};
use crate::entities::thread_detail::ReplyRecord;
use crate::entities::{AddedReply, NewReply};

#[async_trait]
impl ReplyRepository for PostgresStore {
    async fn add_reply(&self, reply: &NewReply) -> Result<AddedReply, DatabaseError> {
        let added = sqlx::query_as::<_, AddedReply>(
            "INSERT INTO replies (id, content, owner, comment_id, is_deleted, date) \
             VALUES ($1, $2, $3, $4, FALSE, $5) \
             RETURNING id, content, owner",
        )
        .bind(generate_id("reply"))
        .bind(&reply.content)
        .bind(&reply.owner)
        .bind(&reply.comment_id)
        .bind(timestamp())
        .fetch_one(&self.pool)
        .await?;

        Ok(added)
    }

    async fn verify_reply_availability(&self, reply_id: &str) -> Result<(), DatabaseError> {
        let found = sqlx::query("SELECT id FROM replies WHERE id = $1")
            .bind(reply_id)
            .fetch_optional(&self.pool)
            .await?;

        match found {
            Some(_) => Ok(()),
            None => Err(DatabaseError::NotFound(REPLY_NOT_FOUND.to_string())),
        }
    }

    async fn verify_reply_owner(&self, reply_id: &str, owner: &str) -> Result<(), DatabaseError> {
        let found = sqlx::query("SELECT id FROM replies WHERE id = $1 AND owner = $2")
            .bind(reply_id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;

        match found {
            Some(_) => Ok(()),
            None => Err(DatabaseError::Forbidden(REPLY_FORBIDDEN.to_string())),
        }
    }

    async fn delete_reply(&self, reply_id: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE replies SET is_deleted = TRUE WHERE id = $1 AND is_deleted = FALSE")
            .bind(reply_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(REPLY_NOT_FOUND.to_string()));
        }
        Ok(())
    }

    async fn get_replies_by_thread_id(&self, thread_id: &str) -> Result<Vec<ReplyRecord>, DatabaseError> {
        let rows = sqlx::query_as::<_, ReplyRecord>(
            "SELECT r.id, r.comment_id, u.username, r.date, r.content, r.is_deleted \
             FROM replies r \
             JOIN users u ON r.owner = u.id \
             JOIN comments c ON r.comment_id = c.id \
             WHERE c.thread_id = $1 \
             ORDER BY r.date ASC, r.seq ASC",
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

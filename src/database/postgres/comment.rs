use async_trait::async_trait;

use super::PostgresStore;
use crate::database::manager::DatabaseError;
use crate::database::models::{generate_id, timestamp};
use crate::database::repository::{CommentRepository, COMMENT_FORBIDDEN, COMMENT_NOT_FOUND};
use crate::entities::thread_detail::CommentRecord;
use crate::entities::{AddedComment, NewComment};

#[async_trait]
impl CommentRepository for PostgresStore {
    async fn add_comment(&self, comment: &NewComment) -> Result<AddedComment, DatabaseError> {
        let added = sqlx::query_as::<_, AddedComment>(
            "INSERT INTO comments (id, content, owner, thread_id, date, is_deleted) \
             VALUES ($1, $2, $3, $4, $5, FALSE) \
             RETURNING id, content, owner",
        )
        .bind(generate_id("comment"))
        .bind(&comment.content)
        .bind(&comment.owner)
        .bind(&comment.thread_id)
        .bind(timestamp())
        .fetch_one(&self.pool)
        .await?;

        Ok(added)
    }

    async fn verify_comment_availability(&self, comment_id: &str) -> Result<(), DatabaseError> {
        let found = sqlx::query("SELECT id FROM comments WHERE id = $1")
            .bind(comment_id)
            .fetch_optional(&self.pool)
            .await?;

        match found {
            Some(_) => Ok(()),
            None => Err(DatabaseError::NotFound(COMMENT_NOT_FOUND.to_string())),
        }
    }

    async fn verify_comment_owner(&self, comment_id: &str, owner: &str) -> Result<(), DatabaseError> {
        let stored_owner = sqlx::query_scalar::<_, String>("SELECT owner FROM comments WHERE id = $1")
            .bind(comment_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(COMMENT_NOT_FOUND.to_string()))?;

        if stored_owner != owner {
            return Err(DatabaseError::Forbidden(COMMENT_FORBIDDEN.to_string()));
        }
        Ok(())
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<u64, DatabaseError> {
        let result = sqlx::query("UPDATE comments SET is_deleted = TRUE WHERE id = $1 AND is_deleted = FALSE")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn get_comments_by_thread_id(&self, thread_id: &str) -> Result<Vec<CommentRecord>, DatabaseError> {
        let rows = sqlx::query_as::<_, CommentRecord>(
            "SELECT c.id, u.username, c.date, c.content, c.is_deleted, c.like_count \
             FROM comments c \
             JOIN users u ON c.owner = u.id \
             WHERE c.thread_id = $1 \
             ORDER BY c.date ASC, c.seq ASC",
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn has_user_liked_comment(&self, comment_id: &str, user_id: &str) -> Result<bool, DatabaseError> {
        let found = sqlx::query("SELECT 1 FROM comments WHERE id = $1 AND $2 = ANY (liked_by)")
            .bind(comment_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    async fn like_comment(&self, comment_id: &str, user_id: &str) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "UPDATE comments \
             SET like_count = like_count + 1, liked_by = array_append(liked_by, $2) \
             WHERE id = $1 AND NOT ($2 = ANY (liked_by))",
        )
        .bind(comment_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn unlike_comment(&self, comment_id: &str, user_id: &str) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "UPDATE comments \
             SET like_count = like_count - 1, liked_by = array_remove(liked_by, $2) \
             WHERE id = $1 AND $2 = ANY (liked_by)",
        )
        .bind(comment_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn get_like_count(&self, comment_id: &str) -> Result<i32, DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT like_count FROM comments WHERE id = $1")
            .bind(comment_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(COMMENT_NOT_FOUND.to_string()))
    }
}

use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::{ServiceError, ServiceResult};
use crate::database::repository::COMMENT_NOT_FOUND;
use crate::database::{CommentRepository, ThreadRepository};
use crate::entities::{AddedComment, DeleteComment, NewComment};

#[derive(Clone)]
pub struct CommentService {
    threads: Arc<dyn ThreadRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(threads: Arc<dyn ThreadRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { threads, comments }
    }

    pub async fn add_comment(
        &self,
        payload: &Value,
        owner: &str,
        thread_id: &str,
    ) -> ServiceResult<AddedComment> {
        self.threads.verify_thread_availability(thread_id).await?;
        let new_comment = NewComment::new(payload, owner, thread_id)?;
        Ok(self.comments.add_comment(&new_comment).await?)
    }

    /// Soft delete. A comment that is already deleted reports `NotFound`.
    pub async fn delete_comment(&self, comment_id: &str, owner: &str) -> ServiceResult<()> {
        let request = DeleteComment::new(comment_id, owner)?;

        self.comments.verify_comment_availability(&request.comment_id).await?;
        self.comments
            .verify_comment_owner(&request.comment_id, &request.owner)
            .await?;

        if self.comments.delete_comment(&request.comment_id).await? == 0 {
            return Err(ServiceError::NotFound(COMMENT_NOT_FOUND.to_string()));
        }
        Ok(())
    }

    /// Likes the comment for `user_id`, or takes the like back if present.
    pub async fn toggle_like(&self, thread_id: &str, comment_id: &str, user_id: &str) -> ServiceResult<()> {
        self.threads.verify_thread_availability(thread_id).await?;
        self.comments.verify_comment_availability(comment_id).await?;

        let changed = if self.comments.has_user_liked_comment(comment_id, user_id).await? {
            self.comments.unlike_comment(comment_id, user_id).await?
        } else {
            self.comments.like_comment(comment_id, user_id).await?
        };

        if changed == 0 {
            debug!("Like toggle on {} by {} raced with another toggle", comment_id, user_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::entities::NewThread;
    use serde_json::json;

    async fn setup() -> (Arc<MemoryStore>, CommentService, String) {
        let store = Arc::new(MemoryStore::new());
        let thread = store
            .add_thread(&NewThread {
                title: "t".into(),
                body: "b".into(),
                owner: "user-a".into(),
            })
            .await
            .unwrap();
        let service = CommentService::new(store.clone(), store.clone());
        (store, service, thread.id)
    }

    #[tokio::test]
    async fn add_comment_checks_thread_first() {
        let (_, service, _) = setup().await;
        // Invalid payload, but the missing thread is reported first
        let err = service.add_comment(&json!({}), "user-a", "thread-xxx").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn add_comment_validates_payload() {
        let (_, service, thread_id) = setup().await;
        let err = service
            .add_comment(&json!({ "content": 42 }), "user-a", &thread_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn non_owner_cannot_delete() {
        let (store, service, thread_id) = setup().await;
        let comment = service
            .add_comment(&json!({ "content": "hi" }), "user-a", &thread_id)
            .await
            .unwrap();

        let err = service.delete_comment(&comment.id, "user-b").await.unwrap_err();

        assert!(matches!(err, ServiceError::Forbidden(_)));
        assert!(!store.comment(&comment.id).await.unwrap().is_deleted);
    }

    #[tokio::test]
    async fn deleting_twice_is_not_found() {
        let (store, service, thread_id) = setup().await;
        let comment = service
            .add_comment(&json!({ "content": "hi" }), "user-a", &thread_id)
            .await
            .unwrap();

        service.delete_comment(&comment.id, "user-a").await.unwrap();
        assert!(store.comment(&comment.id).await.unwrap().is_deleted);

        let err = service.delete_comment(&comment.id, "user-a").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn deleting_unknown_comment_is_not_found() {
        let (_, service, _) = setup().await;
        let err = service.delete_comment("comment-xxx", "user-a").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn double_toggle_restores_like_state() {
        let (store, service, thread_id) = setup().await;
        let comment = service
            .add_comment(&json!({ "content": "hi" }), "user-a", &thread_id)
            .await
            .unwrap();

        service.toggle_like(&thread_id, &comment.id, "user-b").await.unwrap();
        assert_eq!(store.get_like_count(&comment.id).await.unwrap(), 1);
        assert!(store.has_user_liked_comment(&comment.id, "user-b").await.unwrap());

        service.toggle_like(&thread_id, &comment.id, "user-b").await.unwrap();
        assert_eq!(store.get_like_count(&comment.id).await.unwrap(), 0);
        assert!(!store.has_user_liked_comment(&comment.id, "user-b").await.unwrap());
    }

    #[tokio::test]
    async fn toggle_like_requires_thread_and_comment() {
        let (_, service, thread_id) = setup().await;

        let err = service.toggle_like("thread-xxx", "comment-xxx", "user-a").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "thread not found"));

        let err = service.toggle_like(&thread_id, "comment-xxx", "user-a").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "comment not found"));
    }
}

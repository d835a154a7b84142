use serde_json::Value;
use std::sync::Arc;

use super::ServiceResult;
use crate::database::{CommentRepository, ReplyRepository, ThreadRepository};
use crate::entities::{AddedThread, NewThread, ThreadDetail};

#[derive(Clone)]
pub struct ThreadService {
    threads: Arc<dyn ThreadRepository>,
    comments: Arc<dyn CommentRepository>,
    replies: Arc<dyn ReplyRepository>,
}

impl ThreadService {
    pub fn new(
        threads: Arc<dyn ThreadRepository>,
        comments: Arc<dyn CommentRepository>,
        replies: Arc<dyn ReplyRepository>,
    ) -> Self {
        Self {
            threads,
            comments,
            replies,
        }
    }

    pub async fn add_thread(&self, payload: &Value, owner: &str) -> ServiceResult<AddedThread> {
        let new_thread = NewThread::new(payload, owner)?;
        Ok(self.threads.add_thread(&new_thread).await?)
    }

    /// Thread with its comments and their replies, deleted content masked.
    pub async fn get_thread_detail(&self, thread_id: &str) -> ServiceResult<ThreadDetail> {
        self.threads.verify_thread_availability(thread_id).await?;

        let thread = self.threads.get_thread_by_id(thread_id).await?;
        let comments = self.comments.get_comments_by_thread_id(thread_id).await?;
        let replies = self.replies.get_replies_by_thread_id(thread_id).await?;

        Ok(ThreadDetail::assemble(thread, comments, replies))
    }
}

use serde_json::Value;
use std::sync::Arc;

use super::ServiceResult;
use crate::database::{CommentRepository, ReplyRepository, ThreadRepository};
use crate::entities::{AddedReply, DeleteReply, NewReply};

#[derive(Clone)]
pub struct ReplyService {
    threads: Arc<dyn ThreadRepository>,
    comments: Arc<dyn CommentRepository>,
    replies: Arc<dyn ReplyRepository>,
}

impl ReplyService {
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

    pub async fn add_reply(
        &self,
        payload: &Value,
        owner: &str,
        thread_id: &str,
        comment_id: &str,
    ) -> ServiceResult<AddedReply> {
        self.threads.verify_thread_availability(thread_id).await?;
        self.comments.verify_comment_availability(comment_id).await?;

        let new_reply = NewReply::new(payload, owner, thread_id, comment_id)?;
        Ok(self.replies.add_reply(&new_reply).await?)
    }

    pub async fn delete_reply(&self, reply_id: &str, owner: &str) -> ServiceResult<()> {
        let request = DeleteReply::new(reply_id, owner)?;

        self.replies.verify_reply_availability(&request.reply_id).await?;
        self.replies
            .verify_reply_owner(&request.reply_id, &request.owner)
            .await?;
        self.replies.delete_reply(&request.reply_id).await?;
        Ok(())
    }
}

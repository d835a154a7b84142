//! Thread detail tree and the soft-delete projection.
//!
//! Repositories hand back raw `*Record` rows, including the original text of
//! deleted comments and replies. [`ThreadDetail::assemble`] is the only way
//! to turn them into the external view and it always masks deleted content.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const DELETED_COMMENT_PLACEHOLDER: &str = "**komentar telah dihapus**";
pub const DELETED_REPLY_PLACEHOLDER: &str = "**balasan telah dihapus**";

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ThreadRecord {
    pub id: String,
    pub title: String,
    pub body: String,
    pub date: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CommentRecord {
    pub id: String,
    pub username: String,
    pub date: String,
    pub content: String,
    pub is_deleted: bool,
    pub like_count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ReplyRecord {
    pub id: String,
    pub comment_id: String,
    pub username: String,
    pub date: String,
    pub content: String,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadDetail {
    pub id: String,
    pub title: String,
    pub body: String,
    pub date: String,
    pub username: String,
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub username: String,
    pub date: String,
    pub content: String,
    pub like_count: i32,
    pub replies: Vec<ReplyView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyView {
    pub id: String,
    pub username: String,
    pub date: String,
    pub content: String,
}

impl From<ReplyRecord> for ReplyView {
    fn from(record: ReplyRecord) -> Self {
        let content = if record.is_deleted {
            DELETED_REPLY_PLACEHOLDER.to_string()
        } else {
            record.content
        };

        Self {
            id: record.id,
            username: record.username,
            date: record.date,
            content,
        }
    }
}

impl CommentView {
    fn from_record(record: CommentRecord, replies: Vec<ReplyView>) -> Self {
        let content = if record.is_deleted {
            DELETED_COMMENT_PLACEHOLDER.to_string()
        } else {
            record.content
        };

        Self {
            id: record.id,
            username: record.username,
            date: record.date,
            content,
            like_count: record.like_count,
            replies,
        }
    }
}

impl ThreadDetail {
    /// Nests replies under their comments, both ordered by date ascending.
    ///
    /// Sorting is stable, so records sharing a date keep the order they were
    /// fetched in. Replies whose comment is not in `comments` are dropped.
    pub fn assemble(
        thread: ThreadRecord,
        mut comments: Vec<CommentRecord>,
        mut replies: Vec<ReplyRecord>,
    ) -> Self {
        comments.sort_by(|a, b| a.date.cmp(&b.date));
        replies.sort_by(|a, b| a.date.cmp(&b.date));

        let mut by_comment: HashMap<String, Vec<ReplyView>> = HashMap::new();
        for reply in replies {
            by_comment
                .entry(reply.comment_id.clone())
                .or_default()
                .push(ReplyView::from(reply));
        }

        let comments = comments
            .into_iter()
            .map(|comment| {
                let replies = by_comment.remove(&comment.id).unwrap_or_default();
                CommentView::from_record(comment, replies)
            })
            .collect();

        Self {
            id: thread.id,
            title: thread.title,
            body: thread.body,
            date: thread.date,
            username: thread.username,
            comments,
        }
    }
}

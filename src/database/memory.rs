//! In-process store implementing every repository trait.
//!
//! Backs the unit tests and the test server. Rows keep insertion order so
//! records sharing a timestamp come back the way they were written.

use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{generate_id, timestamp, Comment, Reply, Thread, User};
use crate::database::repository::*;
use crate::entities::thread_detail::{CommentRecord, ReplyRecord, ThreadRecord};
use crate::entities::{
    AddedComment, AddedReply, AddedThread, AddedUser, NewComment, NewReply, NewThread,
    RegisterUser,
};

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<User>,
    tokens: HashSet<String>,
    threads: Vec<Thread>,
    comments: Vec<Comment>,
    replies: Vec<Reply>,
}

impl MemoryState {
    /// Unknown owners fall back to their id.
    fn username_of(&self, owner: &str) -> String {
        self.users
            .iter()
            .find(|u| u.id == owner)
            .map(|u| u.username.clone())
            .unwrap_or_else(|| owner.to_string())
    }

    fn comment_mut(&mut self, comment_id: &str) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| c.id == comment_id)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored comment, deleted content included.
    pub async fn comment(&self, comment_id: &str) -> Option<Comment> {
        self.state.read().await.comments.iter().find(|c| c.id == comment_id).cloned()
    }

    pub async fn reply(&self, reply_id: &str) -> Option<Reply> {
        self.state.read().await.replies.iter().find(|r| r.id == reply_id).cloned()
    }

    pub async fn user_by_username(&self, username: &str) -> Option<User> {
        self.state.read().await.users.iter().find(|u| u.username == username).cloned()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn verify_available_username(&self, username: &str) -> Result<(), DatabaseError> {
        if self.state.read().await.users.iter().any(|u| u.username == username) {
            return Err(DatabaseError::Invariant(USERNAME_TAKEN.to_string()));
        }
        Ok(())
    }

    async fn add_user(&self, user: &RegisterUser) -> Result<AddedUser, DatabaseError> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.username == user.username) {
            return Err(DatabaseError::Invariant(USERNAME_TAKEN.to_string()));
        }

        let row = User {
            id: generate_id("user"),
            username: user.username.clone(),
            password: user.password.clone(),
            fullname: user.fullname.clone(),
        };
        let added = AddedUser {
            id: row.id.clone(),
            username: row.username.clone(),
            fullname: row.fullname.clone(),
        };
        state.users.push(row);
        Ok(added)
    }

    async fn get_password_by_username(&self, username: &str) -> Result<String, DatabaseError> {
        self.state
            .read()
            .await
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.password.clone())
            .ok_or_else(|| DatabaseError::Invariant(USERNAME_UNKNOWN.to_string()))
    }

    async fn get_id_by_username(&self, username: &str) -> Result<String, DatabaseError> {
        self.state
            .read()
            .await
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.id.clone())
            .ok_or_else(|| DatabaseError::Invariant(USERNAME_UNKNOWN.to_string()))
    }
}

#[async_trait]
impl AuthenticationRepository for MemoryStore {
    async fn add_token(&self, token: &str) -> Result<(), DatabaseError> {
        self.state.write().await.tokens.insert(token.to_string());
        Ok(())
    }

    async fn check_availability_token(&self, token: &str) -> Result<(), DatabaseError> {
        if self.state.read().await.tokens.contains(token) {
            Ok(())
        } else {
            Err(DatabaseError::Invariant(REFRESH_TOKEN_UNKNOWN.to_string()))
        }
    }

    async fn delete_token(&self, token: &str) -> Result<(), DatabaseError> {
        self.state.write().await.tokens.remove(token);
        Ok(())
    }
}

#[async_trait]
impl ThreadRepository for MemoryStore {
    async fn add_thread(&self, thread: &NewThread) -> Result<AddedThread, DatabaseError> {
        let row = Thread {
            id: generate_id("thread"),
            title: thread.title.clone(),
            body: thread.body.clone(),
            owner: thread.owner.clone(),
            date: timestamp(),
        };
        let added = AddedThread {
            id: row.id.clone(),
            title: row.title.clone(),
            owner: row.owner.clone(),
        };
        self.state.write().await.threads.push(row);
        Ok(added)
    }

    async fn verify_thread_availability(&self, thread_id: &str) -> Result<(), DatabaseError> {
        if self.state.read().await.threads.iter().any(|t| t.id == thread_id) {
            Ok(())
        } else {
            Err(DatabaseError::NotFound(THREAD_NOT_FOUND.to_string()))
        }
    }

    async fn get_thread_by_id(&self, thread_id: &str) -> Result<ThreadRecord, DatabaseError> {
        let state = self.state.read().await;
        let thread = state
            .threads
            .iter()
            .find(|t| t.id == thread_id)
            .ok_or_else(|| DatabaseError::NotFound(THREAD_NOT_FOUND.to_string()))?;

        Ok(ThreadRecord {
            id: thread.id.clone(),
            title: thread.title.clone(),
            body: thread.body.clone(),
            date: thread.date.clone(),
            username: state.username_of(&thread.owner),
        })
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn add_comment(&self, comment: &NewComment) -> Result<AddedComment, DatabaseError> {
        let mut state = self.state.write().await;
        if !state.threads.iter().any(|t| t.id == comment.thread_id) {
            return Err(DatabaseError::NotFound(THREAD_NOT_FOUND.to_string()));
        }

        let row = Comment {
            id: generate_id("comment"),
            content: comment.content.clone(),
            owner: comment.owner.clone(),
            thread_id: comment.thread_id.clone(),
            date: timestamp(),
            is_deleted: false,
            like_count: 0,
            liked_by: Vec::new(),
        };
        let added = AddedComment {
            id: row.id.clone(),
            content: row.content.clone(),
            owner: row.owner.clone(),
        };
        state.comments.push(row);
        Ok(added)
    }

    async fn verify_comment_availability(&self, comment_id: &str) -> Result<(), DatabaseError> {
        if self.state.read().await.comments.iter().any(|c| c.id == comment_id) {
            Ok(())
        } else {
            Err(DatabaseError::NotFound(COMMENT_NOT_FOUND.to_string()))
        }
    }

    async fn verify_comment_owner(&self, comment_id: &str, owner: &str) -> Result<(), DatabaseError> {
        let state = self.state.read().await;
        let comment = state
            .comments
            .iter()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| DatabaseError::NotFound(COMMENT_NOT_FOUND.to_string()))?;

        if comment.owner != owner {
            return Err(DatabaseError::Forbidden(COMMENT_FORBIDDEN.to_string()));
        }
        Ok(())
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<u64, DatabaseError> {
        let mut state = self.state.write().await;
        match state.comment_mut(comment_id) {
            Some(comment) if !comment.is_deleted => {
                comment.is_deleted = true;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn get_comments_by_thread_id(&self, thread_id: &str) -> Result<Vec<CommentRecord>, DatabaseError> {
        let state = self.state.read().await;
        let mut records: Vec<CommentRecord> = state
            .comments
            .iter()
            .filter(|c| c.thread_id == thread_id)
            .map(|c| CommentRecord {
                id: c.id.clone(),
                username: state.username_of(&c.owner),
                date: c.date.clone(),
                content: c.content.clone(),
                is_deleted: c.is_deleted,
                like_count: c.like_count,
            })
            .collect();
        records.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(records)
    }

    async fn has_user_liked_comment(&self, comment_id: &str, user_id: &str) -> Result<bool, DatabaseError> {
        Ok(self
            .state
            .read()
            .await
            .comments
            .iter()
            .any(|c| c.id == comment_id && c.liked_by.iter().any(|u| u == user_id)))
    }

    async fn like_comment(&self, comment_id: &str, user_id: &str) -> Result<u64, DatabaseError> {
        let mut state = self.state.write().await;
        match state.comment_mut(comment_id) {
            Some(comment) if !comment.liked_by.iter().any(|u| u == user_id) => {
                comment.liked_by.push(user_id.to_string());
                comment.like_count += 1;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn unlike_comment(&self, comment_id: &str, user_id: &str) -> Result<u64, DatabaseError> {
        let mut state = self.state.write().await;
        match state.comment_mut(comment_id) {
            Some(comment) if comment.liked_by.iter().any(|u| u == user_id) => {
                comment.liked_by.retain(|u| u != user_id);
                comment.like_count -= 1;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn get_like_count(&self, comment_id: &str) -> Result<i32, DatabaseError> {
        self.state
            .read()
            .await
            .comments
            .iter()
            .find(|c| c.id == comment_id)
            .map(|c| c.like_count)
            .ok_or_else(|| DatabaseError::NotFound(COMMENT_NOT_FOUND.to_string()))
    }
}

#[async_trait]
impl ReplyRepository for MemoryStore {
    async fn add_reply(&self, reply: &NewReply) -> Result<AddedReply, DatabaseError> {
        let mut state = self.state.write().await;
        if !state.comments.iter().any(|c| c.id == reply.comment_id) {
            return Err(DatabaseError::NotFound(COMMENT_NOT_FOUND.to_string()));
        }

        let row = Reply {
            id: generate_id("reply"),
            content: reply.content.clone(),
            owner: reply.owner.clone(),
            comment_id: reply.comment_id.clone(),
            is_deleted: false,
            date: timestamp(),
        };
        let added = AddedReply {
            id: row.id.clone(),
            content: row.content.clone(),
            owner: row.owner.clone(),
        };
        state.replies.push(row);
        Ok(added)
    }

    async fn verify_reply_availability(&self, reply_id: &str) -> Result<(), DatabaseError> {
        if self.state.read().await.replies.iter().any(|r| r.id == reply_id) {
            Ok(())
        } else {
            Err(DatabaseError::NotFound(REPLY_NOT_FOUND.to_string()))
        }
    }

    async fn verify_reply_owner(&self, reply_id: &str, owner: &str) -> Result<(), DatabaseError> {
        if self
            .state
            .read()
            .await
            .replies
            .iter()
            .any(|r| r.id == reply_id && r.owner == owner)
        {
            Ok(())
        } else {
            Err(DatabaseError::Forbidden(REPLY_FORBIDDEN.to_string()))
        }
    }

    async fn delete_reply(&self, reply_id: &str) -> Result<(), DatabaseError> {
        let mut state = self.state.write().await;
        match state.replies.iter_mut().find(|r| r.id == reply_id) {
            Some(reply) if !reply.is_deleted => {
                reply.is_deleted = true;
                Ok(())
            }
            _ => Err(DatabaseError::NotFound(REPLY_NOT_FOUND.to_string())),
        }
    }

    async fn get_replies_by_thread_id(&self, thread_id: &str) -> Result<Vec<ReplyRecord>, DatabaseError> {
        let state = self.state.read().await;
        let comment_ids: HashSet<&str> = state
            .comments
            .iter()
            .filter(|c| c.thread_id == thread_id)
            .map(|c| c.id.as_str())
            .collect();

        let mut records: Vec<ReplyRecord> = state
            .replies
            .iter()
            .filter(|r| comment_ids.contains(r.comment_id.as_str()))
            .map(|r| ReplyRecord {
                id: r.id.clone(),
                comment_id: r.comment_id.clone(),
                username: state.username_of(&r.owner),
                date: r.date.clone(),
                content: r.content.clone(),
                is_deleted: r.is_deleted,
            })
            .collect();
        records.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(records)
    }
}

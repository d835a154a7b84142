//! Storage contracts consumed by the services.
//!
//! Verification methods return `Ok(())` or a `NotFound` / `Forbidden` /
//! `Invariant` error carrying the client-facing message.

use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::entities::thread_detail::{CommentRecord, ReplyRecord, ThreadRecord};
use crate::entities::{
    AddedComment, AddedReply, AddedThread, AddedUser, NewComment, NewReply, NewThread,
    RegisterUser,
};

pub const THREAD_NOT_FOUND: &str = "thread not found";
pub const COMMENT_NOT_FOUND: &str = "comment not found";
pub const REPLY_NOT_FOUND: &str = "reply not found";
pub const COMMENT_FORBIDDEN: &str = "you are not allowed to delete this comment";
pub const REPLY_FORBIDDEN: &str = "you are not allowed to delete this reply";
pub const USERNAME_TAKEN: &str = "username is not available";
pub const USERNAME_UNKNOWN: &str = "username not found";
pub const REFRESH_TOKEN_UNKNOWN: &str = "refresh token not found in database";

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn verify_available_username(&self, username: &str) -> Result<(), DatabaseError>;

    /// `user.password` must already be hashed.
    async fn add_user(&self, user: &RegisterUser) -> Result<AddedUser, DatabaseError>;

    async fn get_password_by_username(&self, username: &str) -> Result<String, DatabaseError>;

    async fn get_id_by_username(&self, username: &str) -> Result<String, DatabaseError>;
}

/// Refresh tokens of active sessions.
#[async_trait]
pub trait AuthenticationRepository: Send + Sync {
    async fn add_token(&self, token: &str) -> Result<(), DatabaseError>;

    async fn check_availability_token(&self, token: &str) -> Result<(), DatabaseError>;

    async fn delete_token(&self, token: &str) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait ThreadRepository: Send + Sync {
    async fn add_thread(&self, thread: &NewThread) -> Result<AddedThread, DatabaseError>;

    async fn verify_thread_availability(&self, thread_id: &str) -> Result<(), DatabaseError>;

    /// Thread fields joined with the owner's username.
    async fn get_thread_by_id(&self, thread_id: &str) -> Result<ThreadRecord, DatabaseError>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn add_comment(&self, comment: &NewComment) -> Result<AddedComment, DatabaseError>;

    /// Soft-deleted comments still count as available.
    async fn verify_comment_availability(&self, comment_id: &str) -> Result<(), DatabaseError>;

    async fn verify_comment_owner(&self, comment_id: &str, owner: &str) -> Result<(), DatabaseError>;

    /// Marks a live comment deleted. Returns the number of rows changed,
    /// which is zero for unknown or already-deleted comments.
    async fn delete_comment(&self, comment_id: &str) -> Result<u64, DatabaseError>;

    /// Raw records, deleted ones included, ordered by date.
    async fn get_comments_by_thread_id(&self, thread_id: &str) -> Result<Vec<CommentRecord>, DatabaseError>;

    async fn has_user_liked_comment(&self, comment_id: &str, user_id: &str) -> Result<bool, DatabaseError>;

    /// Adds `user_id` to the likers unless already present. Returns rows changed.
    async fn like_comment(&self, comment_id: &str, user_id: &str) -> Result<u64, DatabaseError>;

    /// Removes `user_id` from the likers if present. Returns rows changed.
    async fn unlike_comment(&self, comment_id: &str, user_id: &str) -> Result<u64, DatabaseError>;

    async fn get_like_count(&self, comment_id: &str) -> Result<i32, DatabaseError>;
}

#[async_trait]
pub trait ReplyRepository: Send + Sync {
    async fn add_reply(&self, reply: &NewReply) -> Result<AddedReply, DatabaseError>;

    async fn verify_reply_availability(&self, reply_id: &str) -> Result<(), DatabaseError>;

    async fn verify_reply_owner(&self, reply_id: &str, owner: &str) -> Result<(), DatabaseError>;

    /// `NotFound` when no live reply matched.
    async fn delete_reply(&self, reply_id: &str) -> Result<(), DatabaseError>;

    /// Replies of every comment in the thread, ordered by date.
    async fn get_replies_by_thread_id(&self, thread_id: &str) -> Result<Vec<ReplyRecord>, DatabaseError>;
}

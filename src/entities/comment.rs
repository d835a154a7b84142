use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{require_strings, EntityError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub content: String,
    pub owner: String,
    pub thread_id: String,
}

impl NewComment {
    pub fn new(
        payload: &Value,
        owner: impl Into<String>,
        thread_id: impl Into<String>,
    ) -> Result<Self, EntityError> {
        let [content] = require_strings(payload, ["content"], "create a new comment")?;

        Ok(Self {
            content: content.to_string(),
            owner: owner.into(),
            thread_id: thread_id.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AddedComment {
    pub id: String,
    pub content: String,
    pub owner: String,
}

/// Soft-delete request for a comment, issued by `owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteComment {
    pub comment_id: String,
    pub owner: String,
}

impl DeleteComment {
    pub fn new(comment_id: &str, owner: impl Into<String>) -> Result<Self, EntityError> {
        if comment_id.trim().is_empty() {
            return Err(EntityError::MissingProperty("delete the comment"));
        }

        Ok(Self {
            comment_id: comment_id.to_string(),
            owner: owner.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_missing_content() {
        let err = NewComment::new(&json!({}), "user-123", "thread-123").unwrap_err();
        assert!(matches!(err, EntityError::MissingProperty(_)));
    }

    #[test]
    fn rejects_non_string_content() {
        let err = NewComment::new(&json!({ "content": ["a"] }), "user-123", "thread-123").unwrap_err();
        assert!(matches!(err, EntityError::InvalidType(_)));
    }

    #[test]
    fn keeps_owner_and_thread() {
        let comment = NewComment::new(&json!({ "content": "hi" }), "user-123", "thread-123").unwrap();
        assert_eq!(comment.content, "hi");
        assert_eq!(comment.owner, "user-123");
        assert_eq!(comment.thread_id, "thread-123");
    }

    #[test]
    fn delete_requires_comment_id() {
        assert!(DeleteComment::new("", "user-123").is_err());
        assert!(DeleteComment::new("comment-123", "user-123").is_ok());
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::EntityError;

const ACTION: &str = "create a new reply";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReply {
    pub content: String,
    pub owner: String,
    pub thread_id: String,
    pub comment_id: String,
}

impl NewReply {
    /// Whitespace-only content is rejected along with missing or non-string content.
    pub fn new(
        payload: &Value,
        owner: impl Into<String>,
        thread_id: impl Into<String>,
        comment_id: impl Into<String>,
    ) -> Result<Self, EntityError> {
        let content = match payload.get("content") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            _ => return Err(EntityError::EmptyContent(ACTION)),
        };

        Ok(Self {
            content,
            owner: owner.into(),
            thread_id: thread_id.into(),
            comment_id: comment_id.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AddedReply {
    pub id: String,
    pub content: String,
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReply {
    pub reply_id: String,
    pub owner: String,
}

impl DeleteReply {
    pub fn new(reply_id: &str, owner: impl Into<String>) -> Result<Self, EntityError> {
        if reply_id.trim().is_empty() {
            return Err(EntityError::MissingProperty("delete the reply"));
        }

        Ok(Self {
            reply_id: reply_id.to_string(),
            owner: owner.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_empty_or_blank_content() {
        for payload in [json!({ "content": "" }), json!({ "content": "     " }), json!({})] {
            let err = NewReply::new(&payload, "user-123", "thread-123", "comment-123").unwrap_err();
            assert_eq!(err, EntityError::EmptyContent(ACTION));
        }
    }

    #[test]
    fn rejects_non_string_content() {
        let err = NewReply::new(&json!({ "content": 12345 }), "user-123", "thread-123", "comment-123")
            .unwrap_err();
        assert_eq!(err, EntityError::EmptyContent(ACTION));
    }

    #[test]
    fn builds_reply() {
        let reply = NewReply::new(
            &json!({ "content": "Example content of a new reply" }),
            "user-123",
            "thread-123",
            "comment-123",
        )
        .unwrap();

        assert_eq!(reply.content, "Example content of a new reply");
        assert_eq!(reply.owner, "user-123");
        assert_eq!(reply.comment_id, "comment-123");
    }
}

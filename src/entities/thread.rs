use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{require_strings, EntityError};

const ACTION: &str = "create a new thread";

/// Validated request to open a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewThread {
    pub title: String,
    pub body: String,
    pub owner: String,
}

impl NewThread {
    pub fn new(payload: &Value, owner: impl Into<String>) -> Result<Self, EntityError> {
        let [title, body] = require_strings(payload, ["title", "body"], ACTION)?;

        Ok(Self {
            title: title.to_string(),
            body: body.to_string(),
            owner: owner.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AddedThread {
    pub id: String,
    pub title: String,
    pub owner: String,
}

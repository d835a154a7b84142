use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub owner: String,
    pub thread_id: String,
    pub date: String,
    pub is_deleted: bool,
    /// Always equals `liked_by.len()`.
    pub like_count: i32,
    pub liked_by: Vec<String>,
}

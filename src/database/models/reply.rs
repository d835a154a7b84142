use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reply {
    pub id: String,
    pub content: String,
    pub owner: String,
    pub comment_id: String,
    pub is_deleted: bool,
    pub date: String,
}

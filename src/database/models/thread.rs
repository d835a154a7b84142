use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Thread {
    pub id: String,
    pub title: String,
    pub body: String,
    pub owner: String,
    pub date: String,
}

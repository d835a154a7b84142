//! PostgreSQL implementations of the repository traits.

mod authentication;
mod comment;
mod reply;
mod thread;
mod user;

use sqlx::PgPool;

/// One pool-backed store implementing every repository trait.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

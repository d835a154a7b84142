pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use repository::{
    AuthenticationRepository, CommentRepository, ReplyRepository, ThreadRepository,
    UserRepository,
};

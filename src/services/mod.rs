//! Use cases. Each method checks its preconditions in a fixed order before
//! mutating anything, so the first failed check decides the error.

pub mod authentication_service;
pub mod comment_service;
pub mod reply_service;
pub mod thread_service;
pub mod user_service;

pub use authentication_service::AuthenticationService;
pub use comment_service::CommentService;
pub use reply_service::ReplyService;
pub use thread_service::ThreadService;
pub use user_service::UserService;

use thiserror::Error;

use crate::auth::password::PasswordError;
use crate::auth::JwtError;
use crate::database::DatabaseError;
use crate::entities::EntityError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] EntityError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    /// Request is well-formed but conflicts with stored state.
    #[error("{0}")]
    Invariant(String),

    #[error("{0}")]
    Authentication(String),

    #[error("Database error: {0}")]
    Database(DatabaseError),

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ServiceError::NotFound(msg),
            DatabaseError::Forbidden(msg) => ServiceError::Forbidden(msg),
            DatabaseError::Invariant(msg) => ServiceError::Invariant(msg),
            other => ServiceError::Database(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

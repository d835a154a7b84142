//! Payload validators and the read-side views returned to API consumers.
//!
//! Everything here is pure: constructors take the raw JSON payload, check
//! its shape and either produce a typed value or an [`EntityError`].

pub mod comment;
pub mod reply;
pub mod thread;
pub mod thread_detail;
pub mod user;

pub use comment::{AddedComment, DeleteComment, NewComment};
pub use reply::{AddedReply, DeleteReply, NewReply};
pub use thread::{AddedThread, NewThread};
pub use thread_detail::{CommentView, ReplyView, ThreadDetail};
pub use user::{AddedUser, NewAuthentication, RefreshToken, RegisterUser, UserLogin};

use serde_json::Value;
use thiserror::Error;

/// Shape violations found while validating a payload.
///
/// The `&'static str` carries the attempted action, e.g. "create a new thread".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error("cannot {0} because a required property is missing")]
    MissingProperty(&'static str),

    #[error("cannot {0} because a property has the wrong data type")]
    InvalidType(&'static str),

    #[error("cannot {0} because the content is empty")]
    EmptyContent(&'static str),

    #[error("cannot create a new user because the username exceeds 50 characters")]
    UsernameTooLong,

    #[error("cannot create a new user because the username contains restricted characters")]
    UsernameRestricted,
}

/// Pulls the named string properties out of `payload`.
///
/// Presence of every key is checked before any type is, so a payload that
/// is both incomplete and mistyped reports the missing property.
pub(crate) fn require_strings<'a, const N: usize>(
    payload: &'a Value,
    keys: [&str; N],
    action: &'static str,
) -> Result<[&'a str; N], EntityError> {
    for key in keys {
        match payload.get(key) {
            None | Some(Value::Null) => return Err(EntityError::MissingProperty(action)),
            Some(Value::String(s)) if s.is_empty() => {
                return Err(EntityError::MissingProperty(action))
            }
            _ => {}
        }
    }

    for key in keys {
        if !payload[key].is_string() {
            return Err(EntityError::InvalidType(action));
        }
    }

    Ok(keys.map(|key| payload[key].as_str().unwrap_or_default()))
}

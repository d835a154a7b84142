pub mod comment;
pub mod reply;
pub mod thread;
pub mod user;

pub use comment::Comment;
pub use reply::Reply;
pub use thread::Thread;
pub use user::User;

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

/// Row id such as `thread-6f1c...`.
pub fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// ISO-8601 UTC timestamp with microseconds; sorts lexicographically.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here sits behind `jwt_auth_middleware`, which inserts the
// `AuthUser` extension these handlers read.

pub mod comments;
pub mod replies;
pub mod threads;

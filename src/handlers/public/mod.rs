// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Account registration and token acquisition.

pub mod authentications;
pub mod health;
pub mod users;

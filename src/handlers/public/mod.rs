// handlers/public/mod.rs - Handlers that need no session

pub mod auth;
pub mod system;

pub use auth::*;
pub use system::{health, root};

//! Request handlers.

pub mod chat;
pub mod grants;
pub mod health;

//! # dsa_core
//!
//! Core domain logic for the DSA chat relay: the grants dataset, the
//! context it is rendered into, and the inference providers the chat
//! service forwards to.

pub mod chat;
pub mod grants;
pub mod inference;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Returns a greeting string with the crate version.
pub fn greeting() -> String {
    format!("Hello from dsa_core v{}", version())
}

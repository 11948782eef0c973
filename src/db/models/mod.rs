//! Database models and auth request/response types.

pub mod user;

pub use user::*;

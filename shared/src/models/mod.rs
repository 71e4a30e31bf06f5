//! Data models
//!
//! Shared between the directory server and the SPA (via GraphQL).
//! `*Record` types are storage rows; `Employee` / `User` are client views.
//! All IDs are `i64` internally and GraphQL `ID` strings on the wire.

pub mod employee;
pub mod page;
pub mod user;

// Re-exports
pub use employee::*;
pub use page::*;
pub use user::*;

//! Shared types for the staff directory
//!
//! Common types used by the directory server and its tooling: the unified
//! error system, domain models and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{
    AuthPayload, Employee, EmployeeInput, EmployeeRecord, EmployeeStatus, EmployeesPage,
    LoginInput, Role, User, UserCreate, UserInput, UserRecord,
};

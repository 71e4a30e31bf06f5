//! Storage collaborator
//!
//! [`DirectoryStore`] is the only way the directory service reaches
//! persistence. Two implementations:
//! - [`PgStore`] - PostgreSQL via sqlx
//! - [`MemoryStore`] - process-local maps, used in development and tests

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use shared::error::AppError;
use shared::models::{EmployeeRecord, EmployeeStatus, UserCreate, UserRecord};
use thiserror::Error;

use crate::directory::query::{EmployeeQuery, SearchFilter};

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(_) => AppError::user_already_exists(),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Storage operation failed");
                AppError::database("Database error")
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Employee fields a client may write
///
/// `flagged` and the timestamps are server-managed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub department: String,
    pub position: String,
    pub location: String,
    pub date_of_birth: String,
    pub status: EmployeeStatus,
}

impl EmployeeData {
    /// Stored record with this data, used by create
    pub fn into_record(self, id: i64, now: i64) -> EmployeeRecord {
        EmployeeRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            department: self.department,
            position: self.position,
            location: self.location,
            date_of_birth: self.date_of_birth,
            status: self.status,
            flagged: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[async_trait]
pub trait DirectoryStore: Send + Sync {
    // ========== Employees ==========

    /// Ordered window of employees matching `query.filter`
    async fn find_many(&self, query: &EmployeeQuery) -> RepoResult<Vec<EmployeeRecord>>;

    /// Number of employees matching `filter`, ignoring any window
    async fn count(&self, filter: &SearchFilter) -> RepoResult<i64>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<EmployeeRecord>>;

    /// Create the login credential and the employee as one atomic unit.
    /// Either both persist or neither does.
    async fn create_with_login(
        &self,
        employee: EmployeeData,
        login: UserCreate,
    ) -> RepoResult<EmployeeRecord>;

    /// Replace every client-writable field; `None` when no such employee
    async fn update(&self, id: i64, data: EmployeeData) -> RepoResult<Option<EmployeeRecord>>;

    /// `true` only when a record was removed
    async fn delete(&self, id: i64) -> RepoResult<bool>;

    async fn set_flagged(&self, id: i64, flagged: bool) -> RepoResult<Option<EmployeeRecord>>;

    // ========== Users ==========

    async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<UserRecord>>;

    async fn find_user_by_id(&self, id: i64) -> RepoResult<Option<UserRecord>>;

    async fn create_user(&self, data: UserCreate) -> RepoResult<UserRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_repo_error_to_app_error() {
        assert_eq!(
            AppError::from(RepoError::Duplicate("users_email_key".into())).code,
            ErrorCode::UserAlreadyExists
        );

        let err = AppError::from(RepoError::Database("connection refused".into()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("connection refused"));
    }
}

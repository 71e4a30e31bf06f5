//! Unified error codes for the staff directory
//!
//! Codes are grouped by range:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 8xxx: Employee directory errors
//! - 9xxx: System errors

/// Unified error code enum
///
/// The numeric value is exposed to GraphQL clients as `extensions.errorCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Input failed validation
    ValidationFailed = 2,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 8xxx: Employee directory ====================
    /// Sort field or direction outside the allow-list
    InvalidSortParameters = 8001,
    /// Employee not found
    EmployeeNotFound = 8002,
    /// A login with this email is already registered
    UserAlreadyExists = 8003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",

            // Auth
            ErrorCode::NotAuthenticated => "Not authenticated",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::AdminRequired => "Admin access required",

            // Employee directory
            ErrorCode::InvalidSortParameters => "Invalid sort parameters",
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::UserAlreadyExists => "User already exists",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }

    /// Stable screaming-case name, used as the GraphQL `extensions.code`
    pub const fn name(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::NotAuthenticated => "UNAUTHENTICATED",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::TokenExpired => "TOKEN_EXPIRED",
            ErrorCode::TokenInvalid => "INVALID_TOKEN",
            ErrorCode::AdminRequired => "FORBIDDEN",
            ErrorCode::InvalidSortParameters => "INVALID_SORT_PARAMETERS",
            ErrorCode::EmployeeNotFound => "NOT_FOUND",
            ErrorCode::UserAlreadyExists => "DUPLICATE_USER",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
        }
    }
}

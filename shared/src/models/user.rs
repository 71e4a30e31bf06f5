//! User Model
//!
//! Login accounts (the `users` table). Each account carries one role, which
//! decides the operations it may run and the fields it may see.

use async_graphql::{Enum, ID, InputObject, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::util::millis_to_rfc3339;

/// Coarse-grained permission class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Enum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    #[default]
    Employee,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Employee => "EMPLOYEE",
        }
    }

    /// Parse the stored/claimed form. Anything outside the two roles is rejected.
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "ADMIN" => Some(Role::Admin),
            "EMPLOYEE" => Some(Role::Employee),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored login credential (never serialized with its hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub role: Role,
    pub created_at: i64,
    pub updated_at: i64,
}

/// New login credential, password already hashed
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub email: String,
    pub name: String,
    pub hash_pass: String,
    pub role: Role,
}

/// User as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: ID,
    pub email: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&UserRecord> for User {
    fn from(record: &UserRecord) -> Self {
        let (first_name, last_name) = split_name(&record.name);
        Self {
            id: ID::from(record.id.to_string()),
            email: record.email.clone(),
            name: record.name.clone(),
            first_name,
            last_name,
            role: record.role,
            created_at: millis_to_rfc3339(record.created_at),
            updated_at: millis_to_rfc3339(record.updated_at),
        }
    }
}

/// Split a display name at the first space: "Ada King Lovelace" -> ("Ada", "King Lovelace")
pub fn split_name(name: &str) -> (String, String) {
    match name.trim().split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (name.trim().to_string(), String::new()),
    }
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize, InputObject)]
pub struct UserInput {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Option<Role>,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize, InputObject)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Token plus the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

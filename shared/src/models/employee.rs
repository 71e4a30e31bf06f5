//! Employee Model

use async_graphql::{Enum, ID, InputObject, SimpleObject};
use serde::{Deserialize, Serialize};

use super::Role;
use crate::util::millis_to_rfc3339;

/// Employment status (closed set)
///
/// Stored as `Active` / `On Leave` / `Resigned`, exposed over GraphQL as
/// `Active` / `On_Leave` / `Resigned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Enum)]
pub enum EmployeeStatus {
    #[graphql(name = "Active")]
    Active,
    #[serde(rename = "On Leave")]
    #[graphql(name = "On_Leave")]
    OnLeave,
    #[graphql(name = "Resigned")]
    Resigned,
}

impl EmployeeStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::OnLeave => "On Leave",
            EmployeeStatus::Resigned => "Resigned",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "Active" => Some(EmployeeStatus::Active),
            "On Leave" => Some(EmployeeStatus::OnLeave),
            "Resigned" => Some(EmployeeStatus::Resigned),
            _ => None,
        }
    }
}

/// Employee as stored, every field present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub department: String,
    pub position: String,
    pub location: String,
    /// ISO date `YYYY-MM-DD`
    pub date_of_birth: String,
    pub status: EmployeeStatus,
    pub flagged: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create / full-replace update payload
///
/// `role` only applies to the login credential paired with a newly created
/// employee; updates leave credentials untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, InputObject)]
pub struct EmployeeInput {
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
    #[graphql(default)]
    #[serde(default)]
    pub role: Role,
}

/// Employee as returned to a viewer
///
/// `flagged`, `created_at`, `updated_at` are `None` unless the viewer is an admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: ID,
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
    pub flagged: Option<bool>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Employee {
    /// Full view of a record, restricted fields included
    pub fn full(record: &EmployeeRecord) -> Self {
        Self {
            flagged: Some(record.flagged),
            created_at: Some(millis_to_rfc3339(record.created_at)),
            updated_at: Some(millis_to_rfc3339(record.updated_at)),
            ..Self::restricted(record)
        }
    }

    /// View of a record with `flagged`, `created_at`, `updated_at` withheld
    pub fn restricted(record: &EmployeeRecord) -> Self {
        Self {
            id: ID::from(record.id.to_string()),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            company: record.company.clone(),
            department: record.department.clone(),
            position: record.position.clone(),
            location: record.location.clone(),
            date_of_birth: record.date_of_birth.clone(),
            status: record.status,
            flagged: None,
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> EmployeeRecord {
        EmployeeRecord {
            id: 1,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@x.com".into(),
            phone: "555-0100".into(),
            company: "Analytical Engines".into(),
            department: "Engineering".into(),
            position: "Lead".into(),
            location: "London".into(),
            date_of_birth: "1815-12-10".into(),
            status: EmployeeStatus::OnLeave,
            flagged: true,
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_status_storage_form() {
        assert_eq!(EmployeeStatus::OnLeave.as_str(), "On Leave");
        assert_eq!(
            EmployeeStatus::from_db("On Leave"),
            Some(EmployeeStatus::OnLeave)
        );
        assert_eq!(EmployeeStatus::from_db("Terminated"), None);
        assert_eq!(
            serde_json::to_string(&EmployeeStatus::OnLeave).unwrap(),
            "\"On Leave\""
        );
    }

    #[test]
    fn test_full_view_carries_restricted_fields() {
        let view = Employee::full(&record());
        assert_eq!(view.flagged, Some(true));
        assert!(view.created_at.is_some());
        assert!(view.updated_at.is_some());
    }

    #[test]
    fn test_restricted_view_withholds_all_three() {
        let view = Employee::restricted(&record());
        assert_eq!(view.flagged, None);
        assert_eq!(view.created_at, None);
        assert_eq!(view.updated_at, None);
        assert_eq!(view.first_name, "Ada");
        assert_eq!(view.status, EmployeeStatus::OnLeave);
    }
}

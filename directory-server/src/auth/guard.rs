//! Access control guard
//!
//! Every operation starts with one of the `require_*` checks and every
//! employee leaving the service passes through [`redact`].

use shared::error::{AppError, AppResult};
use shared::models::{Employee, EmployeeRecord};

use super::Identity;

/// Fails with `NotAuthenticated` when no identity is present
pub fn require_authenticated(identity: Option<&Identity>) -> AppResult<&Identity> {
    identity.ok_or_else(AppError::not_authenticated)
}

/// Fails like [`require_authenticated`], then with `AdminRequired` for non-admins
pub fn require_admin(identity: Option<&Identity>) -> AppResult<&Identity> {
    let identity = require_authenticated(identity)?;
    if !identity.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = identity.user_id,
            role = identity.role.as_str()
        );
        return Err(AppError::admin_required());
    }
    Ok(identity)
}

/// View of `record` for `identity`
///
/// `flagged`, `created_at` and `updated_at` are withheld unless the viewer is
/// an admin. All other fields pass through unchanged.
pub fn redact(record: &EmployeeRecord, identity: Option<&Identity>) -> Employee {
    match identity {
        Some(identity) if identity.is_admin() => Employee::full(record),
        _ => Employee::restricted(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;
    use shared::models::{EmployeeStatus, Role};
    use shared::util::millis_to_rfc3339;

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: 1,
            email: "someone@x.com".into(),
            role,
        }
    }

    fn record() -> EmployeeRecord {
        EmployeeRecord {
            id: 10,
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@x.com".into(),
            phone: "555-0101".into(),
            company: "Navy".into(),
            department: "Research".into(),
            position: "Rear Admiral".into(),
            location: "Arlington".into(),
            date_of_birth: "1906-12-09".into(),
            status: EmployeeStatus::Active,
            flagged: true,
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_500_000,
        }
    }

    #[test]
    fn test_require_authenticated() {
        let err = require_authenticated(None).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);

        let id = identity(Role::Employee);
        assert!(require_authenticated(Some(&id)).is_ok());
    }

    #[test]
    fn test_require_admin() {
        assert_eq!(
            require_admin(None).unwrap_err().code,
            ErrorCode::NotAuthenticated
        );

        let employee = identity(Role::Employee);
        assert_eq!(
            require_admin(Some(&employee)).unwrap_err().code,
            ErrorCode::AdminRequired
        );

        let admin = identity(Role::Admin);
        assert_eq!(require_admin(Some(&admin)).unwrap().user_id, 1);
    }

    #[test]
    fn test_redact_for_admin_keeps_stored_values() {
        let admin = identity(Role::Admin);
        let view = redact(&record(), Some(&admin));
        assert_eq!(view.flagged, Some(true));
        assert_eq!(
            view.created_at.as_deref(),
            Some(millis_to_rfc3339(1_700_000_000_000).as_str())
        );
        assert_eq!(
            view.updated_at.as_deref(),
            Some(millis_to_rfc3339(1_700_000_500_000).as_str())
        );
    }

    #[test]
    fn test_redact_for_employee_and_anonymous() {
        let employee = identity(Role::Employee);
        for viewer in [Some(&employee), None] {
            let view = redact(&record(), viewer);
            assert_eq!(view.flagged, None);
            assert_eq!(view.created_at, None);
            assert_eq!(view.updated_at, None);
            assert_eq!(view.email, "grace@x.com");
            assert_eq!(view.position, "Rear Admiral");
        }
    }
}

//! Employee directory service
//!
//! Composes the guard, the listing translator and the storage collaborator.
//! Every operation authorizes first, validates second and only then touches
//! storage. Every employee it returns has been through [`redact`].

use std::sync::Arc;

use shared::error::{AppError, AppResult};
use shared::models::{
    AuthPayload, Employee, EmployeeInput, EmployeesPage, LoginInput, Role, User, UserCreate,
    UserInput,
};

use super::query::{ListingConfig, PageRequest};
use crate::auth::{CredentialService, Identity, redact, require_admin, require_authenticated};
use crate::db::{DirectoryStore, EmployeeData};

#[derive(Clone)]
pub struct DirectoryService {
    store: Arc<dyn DirectoryStore>,
    credentials: CredentialService,
    listing: ListingConfig,
    /// Password given to the login created alongside each new employee
    default_password: String,
}

impl DirectoryService {
    pub fn new(
        store: Arc<dyn DirectoryStore>,
        credentials: CredentialService,
        listing: ListingConfig,
        default_password: impl Into<String>,
    ) -> Self {
        Self {
            store,
            credentials,
            listing,
            default_password: default_password.into(),
        }
    }

    pub fn credentials(&self) -> &CredentialService {
        &self.credentials
    }

    // ========== Queries ==========

    /// One page of employees matching the search, with the total match count
    ///
    /// Count and window are fetched concurrently. Without a storage-level
    /// snapshot they may disagree under concurrent writes.
    pub async fn list_employees(
        &self,
        viewer: Option<&Identity>,
        request: &PageRequest,
    ) -> AppResult<EmployeesPage> {
        require_authenticated(viewer)?;
        let query = request.translate(&self.listing)?;

        let (records, total) = tokio::try_join!(
            self.store.find_many(&query),
            self.store.count(&query.filter)
        )?;

        tracing::debug!(
            page = query.page,
            page_size = query.limit,
            sort = query.sort.field.as_str(),
            dir = query.sort.direction.as_str(),
            search = query.filter.term().unwrap_or(""),
            total,
            returned = records.len(),
            "Listed employees"
        );

        let items = records.iter().map(|r| redact(r, viewer)).collect();
        Ok(EmployeesPage::new(items, total, query.page, query.limit))
    }

    /// `None` when no employee has this id
    pub async fn get_employee(
        &self,
        viewer: Option<&Identity>,
        id: &str,
    ) -> AppResult<Option<Employee>> {
        require_authenticated(viewer)?;
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let record = self.store.find_by_id(id).await?;
        Ok(record.map(|r| redact(&r, viewer)))
    }

    /// The viewer's own login, `None` if it no longer exists
    pub async fn me(&self, viewer: Option<&Identity>) -> AppResult<Option<User>> {
        let identity = require_authenticated(viewer)?;
        let user = self.store.find_user_by_id(identity.user_id).await?;
        Ok(user.as_ref().map(User::from))
    }

    // ========== Employee mutations ==========

    /// Create an employee and its paired login in one atomic unit
    pub async fn create_employee(
        &self,
        viewer: Option<&Identity>,
        input: EmployeeInput,
    ) -> AppResult<Employee> {
        let admin = require_admin(viewer)?;
        let role = input.role;
        let mut data = employee_data(input)?;
        data.email = normalize_email(&data.email)?;

        let login = UserCreate {
            email: data.email.clone(),
            name: format!("{} {}", data.first_name, data.last_name),
            hash_pass: self.credentials.hash(&self.default_password)?,
            role,
        };

        let record = self.store.create_with_login(data, login).await?;
        tracing::info!(
            employee_id = record.id,
            created_by = admin.user_id,
            "Employee created"
        );
        Ok(redact(&record, viewer))
    }

    /// Replace every writable field of an employee
    ///
    /// Fields are stored exactly as given, email included.
    pub async fn update_employee(
        &self,
        viewer: Option<&Identity>,
        id: &str,
        input: EmployeeInput,
    ) -> AppResult<Employee> {
        let admin = require_admin(viewer)?;
        let employee_id = parse_id(id).ok_or_else(|| AppError::employee_not_found(id))?;
        let data = employee_data(input)?;

        let record = self
            .store
            .update(employee_id, data)
            .await?
            .ok_or_else(|| AppError::employee_not_found(id))?;
        tracing::info!(employee_id, updated_by = admin.user_id, "Employee updated");
        Ok(redact(&record, viewer))
    }

    /// `true` when the employee was deleted; a missing id is an error
    pub async fn delete_employee(&self, viewer: Option<&Identity>, id: &str) -> AppResult<bool> {
        let admin = require_admin(viewer)?;
        let employee_id = parse_id(id).ok_or_else(|| AppError::employee_not_found(id))?;

        if !self.store.delete(employee_id).await? {
            return Err(AppError::employee_not_found(id));
        }
        tracing::info!(employee_id, deleted_by = admin.user_id, "Employee deleted");
        Ok(true)
    }

    /// Set the flag bit; any authenticated viewer may do this
    pub async fn flag_employee(
        &self,
        viewer: Option<&Identity>,
        id: &str,
        flag: bool,
    ) -> AppResult<Employee> {
        let identity = require_authenticated(viewer)?;
        let employee_id = parse_id(id).ok_or_else(|| AppError::employee_not_found(id))?;

        let record = self
            .store
            .set_flagged(employee_id, flag)
            .await?
            .ok_or_else(|| AppError::employee_not_found(id))?;
        tracing::info!(employee_id, flag, by = identity.user_id, "Employee flag set");
        Ok(redact(&record, viewer))
    }

    // ========== Accounts ==========

    pub async fn register(&self, input: UserInput) -> AppResult<AuthPayload> {
        let email = normalize_email(&input.email)?;
        if input.password.is_empty() {
            return Err(AppError::validation("Password must not be empty"));
        }
        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::user_already_exists());
        }

        let user = self
            .store
            .create_user(UserCreate {
                email,
                name: input.name,
                hash_pass: self.credentials.hash(&input.password)?,
                role: input.role.unwrap_or(Role::Employee),
            })
            .await?;

        tracing::info!(user_id = user.id, role = user.role.as_str(), "User registered");
        Ok(AuthPayload {
            token: self.credentials.issue_token(&user)?,
            user: User::from(&user),
        })
    }

    /// Unknown email and wrong password fail identically
    pub async fn login(&self, input: LoginInput) -> AppResult<AuthPayload> {
        let email = input.email.trim().to_lowercase();
        let user = self.store.find_user_by_email(&email).await?;

        let Some(user) = user.filter(|u| self.credentials.verify(&input.password, &u.hash_pass))
        else {
            security_log!("WARN", "login_failed", email = email.as_str());
            return Err(AppError::invalid_credentials());
        };

        security_log!("INFO", "login_succeeded", user_id = user.id);
        Ok(AuthPayload {
            token: self.credentials.issue_token(&user)?,
            user: User::from(&user),
        })
    }
}

fn parse_id(id: &str) -> Option<i64> {
    id.trim().parse().ok()
}

fn check_email(email: &str) -> AppResult<()> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("Invalid email address").with_detail("field", "email"));
    }
    Ok(())
}

fn normalize_email(email: &str) -> AppResult<String> {
    check_email(email)?;
    Ok(email.trim().to_lowercase())
}

/// Validate client input into storable fields, unchanged
fn employee_data(input: EmployeeInput) -> AppResult<EmployeeData> {
    check_email(&input.email)?;
    if chrono::NaiveDate::parse_from_str(&input.date_of_birth, "%Y-%m-%d").is_err() {
        return Err(AppError::validation("dateOfBirth must be YYYY-MM-DD")
            .with_detail("field", "dateOfBirth"));
    }

    Ok(EmployeeData {
        email: input.email,
        first_name: input.first_name,
        last_name: input.last_name,
        phone: input.phone,
        company: input.company,
        department: input.department,
        position: input.position,
        location: input.location,
        date_of_birth: input.date_of_birth,
        status: input.status,
    })
}

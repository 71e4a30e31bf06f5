//! In-memory store
//!
//! Both tables sit behind one lock, so the paired create is atomic and a
//! count/fetch pair sees writes in the same order.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::{EmployeeRecord, UserCreate, UserRecord};
use shared::util::{now_millis, snowflake_id};

use super::{DirectoryStore, EmployeeData, RepoError, RepoResult};
use crate::directory::query::{EmployeeQuery, SearchFilter};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, UserRecord>,
    employees: BTreeMap<i64, EmployeeRecord>,
}

impl Tables {
    fn fresh_id<V>(map: &BTreeMap<i64, V>) -> i64 {
        let mut id = snowflake_id();
        while map.contains_key(&id) {
            id = snowflake_id();
        }
        id
    }

    fn user_email_taken(&self, email: &str) -> bool {
        self.users.values().any(|u| u.email == email)
    }

    fn employee_email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.employees
            .values()
            .any(|e| e.email == email && Some(e.id) != except)
    }

    fn insert_user(&mut self, data: UserCreate, now: i64) -> UserRecord {
        let id = Self::fresh_id(&self.users);
        let user = UserRecord {
            id,
            email: data.email,
            name: data.name,
            hash_pass: data.hash_pass,
            role: data.role,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(id, user.clone());
        user
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DirectoryStore for MemoryStore {
    async fn find_many(&self, query: &EmployeeQuery) -> RepoResult<Vec<EmployeeRecord>> {
        let tables = self.tables.read();
        let mut matched: Vec<&EmployeeRecord> = tables
            .employees
            .values()
            .filter(|e| query.filter.matches(e))
            .collect();
        matched.sort_by(|a, b| query.sort.compare(a, b));

        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(0);
        Ok(matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &SearchFilter) -> RepoResult<i64> {
        let tables = self.tables.read();
        let n = tables.employees.values().filter(|e| filter.matches(e)).count();
        i64::try_from(n).map_err(|e| RepoError::Database(e.to_string()))
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<EmployeeRecord>> {
        Ok(self.tables.read().employees.get(&id).cloned())
    }

    async fn create_with_login(
        &self,
        employee: EmployeeData,
        login: UserCreate,
    ) -> RepoResult<EmployeeRecord> {
        let mut tables = self.tables.write();
        // Check both halves before writing either
        if tables.user_email_taken(&login.email) {
            return Err(RepoError::Duplicate(format!("users.email = {}", login.email)));
        }
        if tables.employee_email_taken(&employee.email, None) {
            return Err(RepoError::Duplicate(format!(
                "employees.email = {}",
                employee.email
            )));
        }

        let now = now_millis();
        tables.insert_user(login, now);
        let id = Tables::fresh_id(&tables.employees);
        let record = employee.into_record(id, now);
        tables.employees.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: i64, data: EmployeeData) -> RepoResult<Option<EmployeeRecord>> {
        let mut tables = self.tables.write();
        if !tables.employees.contains_key(&id) {
            return Ok(None);
        }
        if tables.employee_email_taken(&data.email, Some(id)) {
            return Err(RepoError::Duplicate(format!("employees.email = {}", data.email)));
        }

        let Some(existing) = tables.employees.get_mut(&id) else {
            return Ok(None);
        };
        let updated = EmployeeRecord {
            flagged: existing.flagged,
            updated_at: now_millis().max(existing.updated_at),
            ..data.into_record(id, existing.created_at)
        };
        *existing = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        Ok(self.tables.write().employees.remove(&id).is_some())
    }

    async fn set_flagged(&self, id: i64, flagged: bool) -> RepoResult<Option<EmployeeRecord>> {
        let mut tables = self.tables.write();
        Ok(tables.employees.get_mut(&id).map(|e| {
            e.flagged = flagged;
            e.updated_at = now_millis().max(e.updated_at);
            e.clone()
        }))
    }

    async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<UserRecord>> {
        Ok(self
            .tables
            .read()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_user_by_id(&self, id: i64) -> RepoResult<Option<UserRecord>> {
        Ok(self.tables.read().users.get(&id).cloned())
    }

    async fn create_user(&self, data: UserCreate) -> RepoResult<UserRecord> {
        let mut tables = self.tables.write();
        if tables.user_email_taken(&data.email) {
            return Err(RepoError::Duplicate(format!("users.email = {}", data.email)));
        }
        Ok(tables.insert_user(data, now_millis()))
    }
}

//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use directory_server::auth::{CredentialService, Identity, JwtConfig, JwtService};
use directory_server::db::{DirectoryStore, EmployeeData, MemoryStore, RepoResult};
use directory_server::directory::{EmployeeQuery, ListingConfig, SearchFilter};
use directory_server::{DirectoryService, DirectorySchema, build_schema};
use shared::models::{EmployeeInput, EmployeeRecord, EmployeeStatus, Role, UserCreate, UserRecord};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";

/// Memory store that counts every call made through it
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DirectoryStore for CountingStore {
    async fn find_many(&self, query: &EmployeeQuery) -> RepoResult<Vec<EmployeeRecord>> {
        self.hit();
        self.inner.find_many(query).await
    }

    async fn count(&self, filter: &SearchFilter) -> RepoResult<i64> {
        self.hit();
        self.inner.count(filter).await
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<EmployeeRecord>> {
        self.hit();
        self.inner.find_by_id(id).await
    }

    async fn create_with_login(
        &self,
        employee: EmployeeData,
        login: UserCreate,
    ) -> RepoResult<EmployeeRecord> {
        self.hit();
        self.inner.create_with_login(employee, login).await
    }

    async fn update(&self, id: i64, data: EmployeeData) -> RepoResult<Option<EmployeeRecord>> {
        self.hit();
        self.inner.update(id, data).await
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        self.hit();
        self.inner.delete(id).await
    }

    async fn set_flagged(&self, id: i64, flagged: bool) -> RepoResult<Option<EmployeeRecord>> {
        self.hit();
        self.inner.set_flagged(id, flagged).await
    }

    async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<UserRecord>> {
        self.hit();
        self.inner.find_user_by_email(email).await
    }

    async fn find_user_by_id(&self, id: i64) -> RepoResult<Option<UserRecord>> {
        self.hit();
        self.inner.find_user_by_id(id).await
    }

    async fn create_user(&self, data: UserCreate) -> RepoResult<UserRecord> {
        self.hit();
        self.inner.create_user(data).await
    }
}

pub fn credentials() -> CredentialService {
    CredentialService::new(JwtService::with_config(JwtConfig::with_secret(TEST_SECRET)))
}

pub fn service_with(store: Arc<CountingStore>) -> DirectoryService {
    DirectoryService::new(store, credentials(), ListingConfig::default(), "password123")
}

pub fn schema_with(store: Arc<CountingStore>) -> DirectorySchema {
    build_schema(service_with(store))
}

pub fn admin() -> Identity {
    Identity {
        user_id: 1,
        email: "admin@example.com".into(),
        role: Role::Admin,
    }
}

pub fn staff() -> Identity {
    Identity {
        user_id: 2,
        email: "staff@example.com".into(),
        role: Role::Employee,
    }
}

pub fn employee_input(first: &str, last: &str, email: &str) -> EmployeeInput {
    EmployeeInput {
        first_name: first.into(),
        last_name: last.into(),
        email: email.into(),
        phone: "555-0100".into(),
        company: "Analytical Engines".into(),
        department: "Engineering".into(),
        position: "Programmer".into(),
        location: "London".into(),
        date_of_birth: "1815-12-10".into(),
        status: EmployeeStatus::Active,
        role: Role::Employee,
    }
}

/// Insert employees straight into the store, skipping password hashing.
/// Departments rotate through Sales / Support / Research.
pub async fn seed(store: &dyn DirectoryStore, count: usize) -> Vec<EmployeeRecord> {
    const DEPARTMENTS: [&str; 3] = ["Sales", "Support", "Research"];
    let mut records = Vec::with_capacity(count);
    for i in 0..count {
        let email = format!("person{i:02}@example.com");
        let record = store
            .create_with_login(
                EmployeeData {
                    first_name: format!("Person{i:02}"),
                    last_name: format!("Family{}", i % 4),
                    email: email.clone(),
                    phone: format!("555-{i:04}"),
                    company: format!("Company{}", i % 2),
                    department: DEPARTMENTS[i % 3].into(),
                    position: if i % 5 == 0 { "Manager" } else { "Associate" }.into(),
                    location: "Remote".into(),
                    date_of_birth: "1990-01-01".into(),
                    status: EmployeeStatus::Active,
                },
                UserCreate {
                    email,
                    name: format!("Person{i:02} Family{}", i % 4),
                    hash_pass: "not-a-real-hash".into(),
                    role: Role::Employee,
                },
            )
            .await
            .expect("seed employee");
        records.push(record);
    }
    records
}

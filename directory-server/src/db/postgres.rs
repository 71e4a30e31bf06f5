//! PostgreSQL store

use async_trait::async_trait;
use shared::models::{EmployeeRecord, EmployeeStatus, Role, UserCreate, UserRecord};
use shared::util::{now_millis, snowflake_id};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{DirectoryStore, EmployeeData, RepoError, RepoResult};
use crate::directory::query::{EmployeeQuery, SearchFilter, SortDirection, SortField, SortSpec};

const EMPLOYEE_COLUMNS: &str = "id, first_name, last_name, email, phone, company, department, \
     position, location, date_of_birth, status, flagged, created_at, updated_at";

/// `$1` is the `ILIKE` pattern, or NULL for match-all
const SEARCH_PREDICATE: &str = "($1::TEXT IS NULL \
     OR first_name ILIKE $1 ESCAPE '\\' \
     OR last_name ILIKE $1 ESCAPE '\\' \
     OR email ILIKE $1 ESCAPE '\\' \
     OR department ILIKE $1 ESCAPE '\\' \
     OR position ILIKE $1 ESCAPE '\\')";

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    company: String,
    department: String,
    position: String,
    location: String,
    date_of_birth: String,
    status: String,
    flagged: bool,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<EmployeeRow> for EmployeeRecord {
    type Error = RepoError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let status = EmployeeStatus::from_db(&row.status)
            .ok_or_else(|| RepoError::Database(format!("Unknown employee status: {}", row.status)))?;
        Ok(EmployeeRecord {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            company: row.company,
            department: row.department,
            position: row.position,
            location: row.location,
            date_of_birth: row.date_of_birth,
            status,
            flagged: row.flagged,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    name: String,
    hash_pass: String,
    role: String,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = RepoError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::from_db(&row.role)
            .ok_or_else(|| RepoError::Database(format!("Unknown role: {}", row.role)))?;
        Ok(UserRecord {
            id: row.id,
            email: row.email,
            name: row.name,
            hash_pass: row.hash_pass,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Case-folded, code-point ordered text key; matches `SortSpec::compare`
fn folded(column: &str) -> String {
    format!("LOWER({column}) COLLATE \"C\"")
}

/// ORDER BY clause built only from allow-listed columns
fn order_clause(sort: &SortSpec) -> String {
    let dir = sort.direction.as_sql();
    let columns = match sort.field {
        SortField::Name => format!(
            "{} {dir}, {} {dir}",
            folded("first_name"),
            folded("last_name")
        ),
        SortField::Company => format!("{} {dir}", folded("company")),
        SortField::Department => format!("{} {dir}", folded("department")),
        SortField::Status => format!("status {dir}"),
        SortField::Created => format!("created_at {dir}"),
        SortField::Updated => format!("updated_at {dir}"),
    };
    format!("{columns}, id {}", SortDirection::Asc.as_sql())
}

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and bring the schema up to date
    pub async fn connect(database_url: &str, max_connections: u32) -> RepoResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| RepoError::Database(format!("Migration failed: {e}")))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DirectoryStore for PgStore {
    async fn find_many(&self, query: &EmployeeQuery) -> RepoResult<Vec<EmployeeRecord>> {
        let sql = format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE {SEARCH_PREDICATE} \
             ORDER BY {} LIMIT $2 OFFSET $3",
            order_clause(&query.sort)
        );
        let rows: Vec<EmployeeRow> = sqlx::query_as(&sql)
            .bind(query.filter.like_pattern())
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(EmployeeRecord::try_from).collect()
    }

    async fn count(&self, filter: &SearchFilter) -> RepoResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM employees WHERE {SEARCH_PREDICATE}");
        let total: i64 = sqlx::query_scalar(&sql)
            .bind(filter.like_pattern())
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<EmployeeRecord>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1");
        let row: Option<EmployeeRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(EmployeeRecord::try_from).transpose()
    }

    async fn create_with_login(
        &self,
        employee: EmployeeData,
        login: UserCreate,
    ) -> RepoResult<EmployeeRecord> {
        let now = now_millis();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO users (id, email, name, hash_pass, role, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)",
        )
        .bind(snowflake_id())
        .bind(&login.email)
        .bind(&login.name)
        .bind(&login.hash_pass)
        .bind(login.role.as_str())
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let sql = format!(
            "INSERT INTO employees (
                id, first_name, last_name, email, phone, company, department,
                position, location, date_of_birth, status, flagged, created_at, updated_at
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, FALSE, $12, $12)
             RETURNING {EMPLOYEE_COLUMNS}"
        );
        let row: EmployeeRow = sqlx::query_as(&sql)
            .bind(snowflake_id())
            .bind(&employee.first_name)
            .bind(&employee.last_name)
            .bind(&employee.email)
            .bind(&employee.phone)
            .bind(&employee.company)
            .bind(&employee.department)
            .bind(&employee.position)
            .bind(&employee.location)
            .bind(&employee.date_of_birth)
            .bind(employee.status.as_str())
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        // Dropping `tx` on any `?` above rolls back the credential insert
        tx.commit().await?;
        EmployeeRecord::try_from(row)
    }

    async fn update(&self, id: i64, data: EmployeeData) -> RepoResult<Option<EmployeeRecord>> {
        let sql = format!(
            "UPDATE employees SET
                first_name = $1, last_name = $2, email = $3, phone = $4, company = $5,
                department = $6, position = $7, location = $8, date_of_birth = $9,
                status = $10, updated_at = GREATEST($11, updated_at)
             WHERE id = $12
             RETURNING {EMPLOYEE_COLUMNS}"
        );
        let row: Option<EmployeeRow> = sqlx::query_as(&sql)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(&data.email)
            .bind(&data.phone)
            .bind(&data.company)
            .bind(&data.department)
            .bind(&data.position)
            .bind(&data.location)
            .bind(&data.date_of_birth)
            .bind(data.status.as_str())
            .bind(now_millis())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(EmployeeRecord::try_from).transpose()
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_flagged(&self, id: i64, flagged: bool) -> RepoResult<Option<EmployeeRecord>> {
        let sql = format!(
            "UPDATE employees SET flagged = $1, updated_at = GREATEST($2, updated_at)
             WHERE id = $3
             RETURNING {EMPLOYEE_COLUMNS}"
        );
        let row: Option<EmployeeRow> = sqlx::query_as(&sql)
            .bind(flagged)
            .bind(now_millis())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(EmployeeRecord::try_from).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<UserRecord>> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.map(UserRecord::try_from).transpose()
    }

    async fn find_user_by_id(&self, id: i64) -> RepoResult<Option<UserRecord>> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(UserRecord::try_from).transpose()
    }

    async fn create_user(&self, data: UserCreate) -> RepoResult<UserRecord> {
        let now = now_millis();
        let row: UserRow = sqlx::query_as(
            "INSERT INTO users (id, email, name, hash_pass, role, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING *",
        )
        .bind(snowflake_id())
        .bind(&data.email)
        .bind(&data.name)
        .bind(&data.hash_pass)
        .bind(data.role.as_str())
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        UserRecord::try_from(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_clause() {
        let spec = SortSpec {
            field: SortField::Name,
            direction: SortDirection::Desc,
        };
        assert_eq!(
            order_clause(&spec),
            "LOWER(first_name) COLLATE \"C\" DESC, LOWER(last_name) COLLATE \"C\" DESC, id ASC"
        );

        let spec = SortSpec {
            field: SortField::Created,
            direction: SortDirection::Asc,
        };
        assert_eq!(order_clause(&spec), "created_at ASC, id ASC");
    }
}

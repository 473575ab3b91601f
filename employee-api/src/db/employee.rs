//! Employee Repository

use chrono::NaiveDateTime;
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};
use sqlx::PgConnection;

use super::RepoResult;

/// Employee queries over one checked-out connection
pub struct EmployeeRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> EmployeeRepository<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Page through all employees in insertion order
    pub async fn list(&mut self, skip: i64, limit: i64) -> RepoResult<Vec<Employee>> {
        let rows: Vec<Employee> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, email, phone, position,
                   department, salary, hire_date, created_at, updated_at
            FROM employees
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&mut self, id: i64) -> RepoResult<Option<Employee>> {
        let row: Option<Employee> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, email, phone, position,
                   department, salary, hire_date, created_at, updated_at
            FROM employees
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    /// Exact, case-sensitive email match
    pub async fn get_by_email(&mut self, email: &str) -> RepoResult<Option<Employee>> {
        let row: Option<Employee> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, email, phone, position,
                   department, salary, hire_date, created_at, updated_at
            FROM employees
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    /// Case-insensitive substring search over names, email, department and position
    pub async fn search(
        &mut self,
        query: &str,
        skip: i64,
        limit: i64,
    ) -> RepoResult<Vec<Employee>> {
        let pattern = format!("%{}%", escape_like(query));
        let rows: Vec<Employee> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, email, phone, position,
                   department, salary, hire_date, created_at, updated_at
            FROM employees
            WHERE first_name ILIKE $1 ESCAPE '\'
               OR last_name  ILIKE $1 ESCAPE '\'
               OR email      ILIKE $1 ESCAPE '\'
               OR department ILIKE $1 ESCAPE '\'
               OR position   ILIKE $1 ESCAPE '\'
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .bind(skip)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    /// Total row count, independent of any search filter
    pub async fn count(&mut self) -> RepoResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(total)
    }

    /// Insert a new employee; id and timestamps come from the database
    pub async fn create(
        &mut self,
        data: &EmployeeCreate,
        hire_date: NaiveDateTime,
    ) -> RepoResult<Employee> {
        let employee: Employee = sqlx::query_as(
            r#"
            INSERT INTO employees (
                first_name, last_name, email, phone, position,
                department, salary, hire_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, first_name, last_name, email, phone, position,
                      department, salary, hire_date, created_at, updated_at
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.position)
        .bind(&data.department)
        .bind(data.salary)
        .bind(hire_date)
        .fetch_one(&mut *self.conn)
        .await?;

        tracing::debug!(employee = %employee, "Employee created");
        Ok(employee)
    }

    /// Overwrite only the supplied fields. `None` when the id does not exist.
    pub async fn update(
        &mut self,
        id: i64,
        data: &EmployeeUpdate,
        hire_date: Option<NaiveDateTime>,
    ) -> RepoResult<Option<Employee>> {
        if data.is_empty() {
            return self.get_by_id(id).await;
        }

        let employee: Option<Employee> = sqlx::query_as(
            r#"
            UPDATE employees SET
                first_name = COALESCE($2, first_name),
                last_name  = COALESCE($3, last_name),
                email      = COALESCE($4, email),
                phone      = CASE WHEN $5 THEN $6 ELSE phone END,
                position   = COALESCE($7, position),
                department = COALESCE($8, department),
                salary     = COALESCE($9, salary),
                hire_date  = COALESCE($10, hire_date),
                updated_at = now()
            WHERE id = $1
            RETURNING id, first_name, last_name, email, phone, position,
                      department, salary, hire_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(data.phone.is_some())
        .bind(data.phone.clone().flatten())
        .bind(&data.position)
        .bind(&data.department)
        .bind(data.salary)
        .bind(hire_date)
        .fetch_optional(&mut *self.conn)
        .await?;

        if let Some(ref e) = employee {
            tracing::debug!(employee = %e, "Employee updated");
        }
        Ok(employee)
    }

    /// Hard delete. `false` when the id does not exist.
    pub async fn delete(&mut self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::debug!(id, "Employee deleted");
        }
        Ok(deleted)
    }
}

/// Escape LIKE metacharacters so user input matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

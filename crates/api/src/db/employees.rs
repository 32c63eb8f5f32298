//! Employee repository.

use chrono::NaiveDateTime;
use northwind_core::{
    Employee, EmployeeId, EmployeeService, Page, ReservedHeaderCodec, ServiceResult,
};
use sqlx::PgPool;

use super::{PgStore, RepositoryError, limit_offset, row_count};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    id: i32,
    last_name: String,
    first_name: String,
    title: Option<String>,
    title_of_courtesy: Option<String>,
    birth_date: Option<NaiveDateTime>,
    hire_date: Option<NaiveDateTime>,
    address: Option<String>,
    city: Option<String>,
    region: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
    home_phone: Option<String>,
    extension: Option<String>,
    notes: Option<String>,
    reports_to: Option<i32>,
    photo_path: Option<String>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: EmployeeId::new(row.id),
            last_name: row.last_name,
            first_name: row.first_name,
            title: row.title,
            title_of_courtesy: row.title_of_courtesy,
            birth_date: row.birth_date,
            hire_date: row.hire_date,
            address: row.address,
            city: row.city,
            region: row.region,
            postal_code: row.postal_code,
            country: row.country,
            home_phone: row.home_phone,
            extension: row.extension,
            notes: row.notes,
            reports_to: row.reports_to.map(EmployeeId::new),
            photo_path: row.photo_path,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for employee database operations.
pub struct EmployeeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EmployeeRepository<'a> {
    /// Create a new employee repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List employees ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, page: Page) -> Result<Vec<Employee>, RepositoryError> {
        let (limit, offset) = limit_offset(page);
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r"
            SELECT id, last_name, first_name, title, title_of_courtesy, birth_date, hire_date,
                   address, city, region, postal_code, country, home_phone, extension,
                   notes, reports_to, photo_path
            FROM employees
            ORDER BY id
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get an employee by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r"
            SELECT id, last_name, first_name, title, title_of_courtesy, birth_date, hire_date,
                   address, city, region, postal_code, country, home_phone, extension,
                   notes, reports_to, photo_path
            FROM employees
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Insert an employee and return the id the database assigned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, employee: &Employee) -> Result<EmployeeId, RepositoryError> {
        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO employees (last_name, first_name, title, title_of_courtesy, birth_date,
                                   hire_date, address, city, region, postal_code, country,
                                   home_phone, extension, notes, reports_to, photo_path)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING id
            ",
        )
        .bind(&employee.last_name)
        .bind(&employee.first_name)
        .bind(&employee.title)
        .bind(&employee.title_of_courtesy)
        .bind(employee.birth_date)
        .bind(employee.hire_date)
        .bind(&employee.address)
        .bind(&employee.city)
        .bind(&employee.region)
        .bind(&employee.postal_code)
        .bind(&employee.country)
        .bind(&employee.home_phone)
        .bind(&employee.extension)
        .bind(&employee.notes)
        .bind(employee.reports_to)
        .bind(&employee.photo_path)
        .fetch_one(self.pool)
        .await?;

        Ok(EmployeeId::new(id))
    }

    /// Overwrite every record field of an employee; the photo is left alone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(&self, id: EmployeeId, employee: &Employee) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE employees
            SET last_name = $2, first_name = $3, title = $4, title_of_courtesy = $5,
                birth_date = $6, hire_date = $7, address = $8, city = $9, region = $10,
                postal_code = $11, country = $12, home_phone = $13, extension = $14,
                notes = $15, reports_to = $16, photo_path = $17
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&employee.last_name)
        .bind(&employee.first_name)
        .bind(&employee.title)
        .bind(&employee.title_of_courtesy)
        .bind(employee.birth_date)
        .bind(employee.hire_date)
        .bind(&employee.address)
        .bind(&employee.city)
        .bind(&employee.region)
        .bind(&employee.postal_code)
        .bind(&employee.country)
        .bind(&employee.home_phone)
        .bind(&employee.extension)
        .bind(&employee.notes)
        .bind(employee.reports_to)
        .bind(&employee.photo_path)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an employee.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: EmployeeId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count employees.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(self.pool)
            .await?;

        row_count(count)
    }

    /// Fetch the stored (still padded) photo. The outer `Option` is the
    /// employee, the inner one the column.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_photo(&self, id: EmployeeId) -> Result<Option<Option<Vec<u8>>>, RepositoryError> {
        let photo = sqlx::query_scalar("SELECT photo FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(photo)
    }

    /// Replace the stored photo with an already padded buffer (or clear it).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_photo(
        &self,
        id: EmployeeId,
        stored: Option<&[u8]>,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE employees SET photo = $2 WHERE id = $1")
            .bind(id)
            .bind(stored)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Service
// =============================================================================

impl EmployeeService for PgStore {
    async fn list_employees(&self, page: Page) -> ServiceResult<Vec<Employee>> {
        Ok(EmployeeRepository::new(&self.pool).list(page).await?)
    }

    async fn get_employee(&self, id: EmployeeId) -> ServiceResult<Option<Employee>> {
        Ok(EmployeeRepository::new(&self.pool).get(id).await?)
    }

    async fn create_employee(&self, employee: Employee) -> ServiceResult<Option<EmployeeId>> {
        let id = EmployeeRepository::new(&self.pool).create(&employee).await?;
        Ok(Some(id))
    }

    async fn update_employee(&self, id: EmployeeId, employee: Employee) -> ServiceResult<bool> {
        Ok(EmployeeRepository::new(&self.pool)
            .update(id, &employee)
            .await?)
    }

    async fn delete_employee(&self, id: EmployeeId) -> ServiceResult<bool> {
        Ok(EmployeeRepository::new(&self.pool).delete(id).await?)
    }

    async fn count_employees(&self) -> ServiceResult<u64> {
        Ok(EmployeeRepository::new(&self.pool).count().await?)
    }

    async fn get_employee_photo(&self, id: EmployeeId) -> ServiceResult<Option<Vec<u8>>> {
        let Some(stored) = EmployeeRepository::new(&self.pool).get_photo(id).await? else {
            return Ok(None);
        };
        let photo = ReservedHeaderCodec::decode(stored.as_deref())?;
        Ok(Some(photo.to_vec()))
    }

    async fn update_employee_photo(&self, id: EmployeeId, photo: Vec<u8>) -> ServiceResult<bool> {
        let encoded = self.codec.encode(&photo)?;
        Ok(EmployeeRepository::new(&self.pool)
            .set_photo(id, Some(encoded.as_slice()))
            .await?)
    }

    async fn delete_employee_photo(&self, id: EmployeeId) -> ServiceResult<bool> {
        Ok(EmployeeRepository::new(&self.pool)
            .set_photo(id, None)
            .await?)
    }
}

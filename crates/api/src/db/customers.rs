//! Customer repository.

use northwind_core::{Customer, CustomerId, CustomerService, Page, ServiceResult};
use sqlx::PgPool;

use super::{PgStore, RepositoryError, limit_offset, row_count};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: String,
    company_name: String,
    contact_name: Option<String>,
    contact_title: Option<String>,
    address: Option<String>,
    city: Option<String>,
    region: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
    phone: Option<String>,
    fax: Option<String>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        // CHAR(5) pads short codes with spaces
        let id = CustomerId::parse(row.id.trim_end()).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid customer id in database: {e}"))
        })?;

        Ok(Self {
            id,
            company_name: row.company_name,
            contact_name: row.contact_name,
            contact_title: row.contact_title,
            address: row.address,
            city: row.city,
            region: row.region,
            postal_code: row.postal_code,
            country: row.country,
            phone: row.phone,
            fax: row.fax,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List customers ordered by code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored code is invalid.
    pub async fn list(&self, page: Page) -> Result<Vec<Customer>, RepositoryError> {
        let (limit, offset) = limit_offset(page);
        let rows = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, company_name, contact_name, contact_title, address, city,
                   region, postal_code, country, phone, fax
            FROM customers
            ORDER BY id
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a customer by code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, company_name, contact_name, contact_title, address, city,
                   region, postal_code, country, phone, fax
            FROM customers
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Insert a customer. Returns `None` if the code is already taken.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, customer: &Customer) -> Result<Option<CustomerId>, RepositoryError> {
        let inserted = sqlx::query(
            r"
            INSERT INTO customers (id, company_name, contact_name, contact_title, address,
                                   city, region, postal_code, country, phone, fax)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO NOTHING
            ",
        )
        .bind(&customer.id)
        .bind(&customer.company_name)
        .bind(&customer.contact_name)
        .bind(&customer.contact_title)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.region)
        .bind(&customer.postal_code)
        .bind(&customer.country)
        .bind(&customer.phone)
        .bind(&customer.fax)
        .execute(self.pool)
        .await?;

        Ok((inserted.rows_affected() > 0).then(|| customer.id.clone()))
    }

    /// Overwrite every field of a customer. Returns `false` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(&self, id: &CustomerId, customer: &Customer) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE customers
            SET company_name = $2, contact_name = $3, contact_title = $4, address = $5,
                city = $6, region = $7, postal_code = $8, country = $9, phone = $10, fax = $11
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&customer.company_name)
        .bind(&customer.contact_name)
        .bind(&customer.contact_title)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.region)
        .bind(&customer.postal_code)
        .bind(&customer.country)
        .bind(&customer.phone)
        .bind(&customer.fax)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a customer. Returns `false` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: &CustomerId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count customers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(self.pool)
            .await?;

        row_count(count)
    }
}

// =============================================================================
// Service
// =============================================================================

impl CustomerService for PgStore {
    async fn list_customers(&self, page: Page) -> ServiceResult<Vec<Customer>> {
        Ok(CustomerRepository::new(&self.pool).list(page).await?)
    }

    async fn get_customer(&self, id: &CustomerId) -> ServiceResult<Option<Customer>> {
        Ok(CustomerRepository::new(&self.pool).get(id).await?)
    }

    async fn create_customer(&self, customer: Customer) -> ServiceResult<Option<CustomerId>> {
        Ok(CustomerRepository::new(&self.pool).create(&customer).await?)
    }

    async fn update_customer(&self, id: &CustomerId, customer: Customer) -> ServiceResult<bool> {
        Ok(CustomerRepository::new(&self.pool)
            .update(id, &customer)
            .await?)
    }

    async fn delete_customer(&self, id: &CustomerId) -> ServiceResult<bool> {
        Ok(CustomerRepository::new(&self.pool).delete(id).await?)
    }

    async fn count_customers(&self) -> ServiceResult<u64> {
        Ok(CustomerRepository::new(&self.pool).count().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(id: &str) -> CustomerRow {
        CustomerRow {
            id: id.to_string(),
            company_name: "Ana Trujillo Emparedados y helados".to_string(),
            contact_name: Some("Ana Trujillo".to_string()),
            contact_title: None,
            address: None,
            city: Some("México D.F.".to_string()),
            region: None,
            postal_code: None,
            country: Some("Mexico".to_string()),
            phone: None,
            fax: None,
        }
    }

    #[test]
    fn test_row_conversion_trims_padding() {
        let customer = Customer::try_from(row("ANA  ")).unwrap();
        assert_eq!(customer.id.as_str(), "ANA");
        assert_eq!(customer.city.as_deref(), Some("México D.F."));
    }

    #[test]
    fn test_row_conversion_rejects_bad_code() {
        let result = Customer::try_from(row("A-B"));
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }
}

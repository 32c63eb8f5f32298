//! Product repository.

use northwind_core::{
    CategoryId, Page, Product, ProductId, ProductService, ServiceResult, SupplierId,
};
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{PgStore, RepositoryError, limit_offset, row_count};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    supplier_id: Option<i32>,
    category_id: Option<i32>,
    quantity_per_unit: Option<String>,
    unit_price: Option<Decimal>,
    units_in_stock: Option<i16>,
    units_on_order: Option<i16>,
    reorder_level: Option<i16>,
    discontinued: bool,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            supplier_id: row.supplier_id.map(SupplierId::new),
            category_id: row.category_id.map(CategoryId::new),
            quantity_per_unit: row.quantity_per_unit,
            unit_price: row.unit_price,
            units_in_stock: row.units_in_stock,
            units_on_order: row.units_on_order,
            reorder_level: row.reorder_level,
            discontinued: row.discontinued,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, page: Page) -> Result<Vec<Product>, RepositoryError> {
        let (limit, offset) = limit_offset(page);
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, supplier_id, category_id, quantity_per_unit, unit_price,
                   units_in_stock, units_on_order, reorder_level, discontinued
            FROM products
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

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, supplier_id, category_id, quantity_per_unit, unit_price,
                   units_in_stock, units_on_order, reorder_level, discontinued
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Products whose name equals one of `names`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_names(&self, names: &[String]) -> Result<Vec<Product>, RepositoryError> {
        let lowered: Vec<String> = names.iter().map(|name| name.to_lowercase()).collect();
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, supplier_id, category_id, quantity_per_unit, unit_price,
                   units_in_stock, units_on_order, reorder_level, discontinued
            FROM products
            WHERE lower(name) = ANY($1)
            ORDER BY id
            ",
        )
        .bind(&lowered)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Products that belong to a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, supplier_id, category_id, quantity_per_unit, unit_price,
                   units_in_stock, units_on_order, reorder_level, discontinued
            FROM products
            WHERE category_id = $1
            ORDER BY id
            ",
        )
        .bind(category_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Insert a product and return the id the database assigned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, product: &Product) -> Result<ProductId, RepositoryError> {
        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO products (name, supplier_id, category_id, quantity_per_unit, unit_price,
                                  units_in_stock, units_on_order, reorder_level, discontinued)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            ",
        )
        .bind(&product.name)
        .bind(product.supplier_id)
        .bind(product.category_id)
        .bind(&product.quantity_per_unit)
        .bind(product.unit_price)
        .bind(product.units_in_stock)
        .bind(product.units_on_order)
        .bind(product.reorder_level)
        .bind(product.discontinued)
        .fetch_one(self.pool)
        .await?;

        Ok(ProductId::new(id))
    }

    /// Overwrite every field of a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(&self, id: ProductId, product: &Product) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE products
            SET name = $2, supplier_id = $3, category_id = $4, quantity_per_unit = $5,
                unit_price = $6, units_in_stock = $7, units_on_order = $8,
                reorder_level = $9, discontinued = $10
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&product.name)
        .bind(product.supplier_id)
        .bind(product.category_id)
        .bind(&product.quantity_per_unit)
        .bind(product.unit_price)
        .bind(product.units_in_stock)
        .bind(product.units_on_order)
        .bind(product.reorder_level)
        .bind(product.discontinued)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;

        row_count(count)
    }
}

// =============================================================================
// Service
// =============================================================================

impl ProductService for PgStore {
    async fn list_products(&self, page: Page) -> ServiceResult<Vec<Product>> {
        Ok(ProductRepository::new(&self.pool).list(page).await?)
    }

    async fn get_product(&self, id: ProductId) -> ServiceResult<Option<Product>> {
        Ok(ProductRepository::new(&self.pool).get(id).await?)
    }

    async fn create_product(&self, product: Product) -> ServiceResult<Option<ProductId>> {
        let id = ProductRepository::new(&self.pool).create(&product).await?;
        Ok(Some(id))
    }

    async fn update_product(&self, id: ProductId, product: Product) -> ServiceResult<bool> {
        Ok(ProductRepository::new(&self.pool)
            .update(id, &product)
            .await?)
    }

    async fn delete_product(&self, id: ProductId) -> ServiceResult<bool> {
        Ok(ProductRepository::new(&self.pool).delete(id).await?)
    }

    async fn count_products(&self) -> ServiceResult<u64> {
        Ok(ProductRepository::new(&self.pool).count().await?)
    }

    async fn lookup_products_by_name(&self, names: &[String]) -> ServiceResult<Vec<Product>> {
        Ok(ProductRepository::new(&self.pool)
            .find_by_names(names)
            .await?)
    }

    async fn list_products_for_category(
        &self,
        category_id: CategoryId,
    ) -> ServiceResult<Vec<Product>> {
        Ok(ProductRepository::new(&self.pool)
            .list_for_category(category_id)
            .await?)
    }
}

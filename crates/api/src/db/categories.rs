//! Category repository, including the picture column.

use northwind_core::{
    CategoryId, CategoryService, Page, ProductCategory, ReservedHeaderCodec, ServiceResult,
};
use sqlx::PgPool;

use super::{PgStore, RepositoryError, limit_offset, row_count};

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
    description: Option<String>,
}

impl From<CategoryRow> for ProductCategory {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
            description: row.description,
        }
    }
}

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List categories ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, page: Page) -> Result<Vec<ProductCategory>, RepositoryError> {
        let (limit, offset) = limit_offset(page);
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description FROM categories ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a category by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: CategoryId) -> Result<Option<ProductCategory>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Categories whose name equals one of `names`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_names(
        &self,
        names: &[String],
    ) -> Result<Vec<ProductCategory>, RepositoryError> {
        let lowered: Vec<String> = names.iter().map(|name| name.to_lowercase()).collect();
        let rows = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT id, name, description
            FROM categories
            WHERE lower(name) = ANY($1)
            ORDER BY id
            ",
        )
        .bind(&lowered)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Insert a category and return the id the database assigned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, category: &ProductCategory) -> Result<CategoryId, RepositoryError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING id",
        )
        .bind(&category.name)
        .bind(&category.description)
        .fetch_one(self.pool)
        .await?;

        Ok(CategoryId::new(id))
    }

    /// Overwrite name and description; the picture is left alone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(
        &self,
        id: CategoryId,
        category: &ProductCategory,
    ) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("UPDATE categories SET name = $2, description = $3 WHERE id = $1")
                .bind(id)
                .bind(&category.name)
                .bind(&category.description)
                .execute(self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count categories.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(self.pool)
            .await?;

        row_count(count)
    }

    /// Fetch the stored (still padded) picture. The outer `Option` is the
    /// category, the inner one the column.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_picture(
        &self,
        id: CategoryId,
    ) -> Result<Option<Option<Vec<u8>>>, RepositoryError> {
        let picture = sqlx::query_scalar("SELECT picture FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(picture)
    }

    /// Replace the stored picture with an already padded buffer (or clear it).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_picture(
        &self,
        id: CategoryId,
        stored: Option<&[u8]>,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE categories SET picture = $2 WHERE id = $1")
            .bind(id)
            .bind(stored)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl CategoryService for PgStore {
    async fn list_categories(&self, page: Page) -> ServiceResult<Vec<ProductCategory>> {
        Ok(CategoryRepository::new(&self.pool).list(page).await?)
    }

    async fn get_category(&self, id: CategoryId) -> ServiceResult<Option<ProductCategory>> {
        Ok(CategoryRepository::new(&self.pool).get(id).await?)
    }

    async fn create_category(
        &self,
        category: ProductCategory,
    ) -> ServiceResult<Option<CategoryId>> {
        let id = CategoryRepository::new(&self.pool).create(&category).await?;
        Ok(Some(id))
    }

    async fn update_category(
        &self,
        id: CategoryId,
        category: ProductCategory,
    ) -> ServiceResult<bool> {
        Ok(CategoryRepository::new(&self.pool)
            .update(id, &category)
            .await?)
    }

    async fn delete_category(&self, id: CategoryId) -> ServiceResult<bool> {
        Ok(CategoryRepository::new(&self.pool).delete(id).await?)
    }

    async fn count_categories(&self) -> ServiceResult<u64> {
        Ok(CategoryRepository::new(&self.pool).count().await?)
    }

    async fn lookup_categories_by_name(
        &self,
        names: &[String],
    ) -> ServiceResult<Vec<ProductCategory>> {
        Ok(CategoryRepository::new(&self.pool)
            .find_by_names(names)
            .await?)
    }

    async fn get_category_picture(&self, id: CategoryId) -> ServiceResult<Option<Vec<u8>>> {
        let Some(stored) = CategoryRepository::new(&self.pool).get_picture(id).await? else {
            return Ok(None);
        };
        let picture = ReservedHeaderCodec::decode(stored.as_deref())?;
        Ok(Some(picture.to_vec()))
    }

    async fn update_category_picture(
        &self,
        id: CategoryId,
        picture: Vec<u8>,
    ) -> ServiceResult<bool> {
        let encoded = self.codec.encode(&picture)?;
        Ok(CategoryRepository::new(&self.pool)
            .set_picture(id, Some(encoded.as_slice()))
            .await?)
    }

    async fn delete_category_picture(&self, id: CategoryId) -> ServiceResult<bool> {
        Ok(CategoryRepository::new(&self.pool)
            .set_picture(id, None)
            .await?)
    }
}

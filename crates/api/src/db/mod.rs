//! `PostgreSQL` store.
//!
//! # Tables
//!
//! - `customers` - keyed by the client-chosen `CHAR(5)` code
//! - `employees` - `photo` holds the reserved-header-padded image
//! - `products`
//! - `categories` - `picture` holds the reserved-header-padded image
//! - `blog_articles`, `blog_comments`, `blog_article_products`
//!
//! Integer keys are identity columns; the database assigns them on insert.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p northwind-cli -- migrate
//! ```

pub mod blogging;
pub mod categories;
pub mod customers;
pub mod employees;
pub mod products;

use std::time::Duration;

use northwind_core::{BlobError, Page, ReservedHeaderCodec, ServiceError};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use blogging::BloggingRepository;
pub use categories::CategoryRepository;
pub use customers::CustomerRepository;
pub use employees::EmployeeRepository;
pub use products::ProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// A picture could not be encoded or decoded.
    #[error(transparent)]
    Blob(#[from] BlobError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Database(e) => Self::storage(e),
            RepositoryError::DataCorruption(message) => Self::DataCorruption(message),
            RepositoryError::Blob(e) => e.into(),
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Service implementation over a connection pool.
///
/// Each trait method builds the matching repository over the pool and maps
/// its error into a `ServiceError`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
    codec: ReservedHeaderCodec,
}

impl PgStore {
    /// Wrap a pool; pictures larger than `picture_max_file_size` bytes are refused.
    #[must_use]
    pub const fn new(pool: PgPool, picture_max_file_size: usize) -> Self {
        Self {
            pool,
            codec: ReservedHeaderCodec::new(picture_max_file_size),
        }
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check that the database answers.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if no connection can be acquired or the query fails.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// `LIMIT`/`OFFSET` bind values for a page.
fn limit_offset(page: Page) -> (i64, i64) {
    (i64::from(page.limit()), i64::from(page.offset()))
}

/// Convert a `COUNT(*)` result.
fn row_count(count: i64) -> Result<u64, RepositoryError> {
    u64::try_from(count)
        .map_err(|_| RepositoryError::DataCorruption(format!("negative row count {count}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_offset() {
        let page = Page::new(20, 10).unwrap();
        assert_eq!(limit_offset(page), (10, 20));
        assert_eq!(limit_offset(Page::all()), (i64::from(u32::MAX), 0));
    }

    #[test]
    fn test_row_count() {
        assert_eq!(row_count(77).unwrap(), 77);
        assert!(matches!(
            row_count(-1),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_repository_error_maps_to_service_error() {
        let err: ServiceError = RepositoryError::Blob(BlobError::TooLarge { len: 3, max: 2 }).into();
        assert!(matches!(err, ServiceError::PayloadTooLarge { len: 3, max: 2 }));

        let err: ServiceError = RepositoryError::Database(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, ServiceError::Storage(_)));
    }

    // Store behaviour against a real database. `sqlx::test` creates a fresh
    // database per test and applies the migrations.

    use chrono::Utc;
    use northwind_core::{
        ArticleId, BlogArticle, BloggingService, CategoryId, CategoryService, CommentId,
        CustomerId, CustomerService, EmployeeId, EmployeeService, Product, ProductCategory,
        ProductId, ProductService,
    };

    fn category(name: &str) -> ProductCategory {
        ProductCategory {
            id: CategoryId::default(),
            name: name.to_string(),
            description: None,
        }
    }

    fn product(name: &str) -> Product {
        serde_json::from_value(serde_json::json!({ "name": name, "discontinued": false }))
            .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_get_missing_returns_none(pool: PgPool) {
        let store = PgStore::new(pool, 16);

        let code = CustomerId::parse("NONE").unwrap();
        assert!(store.get_customer(&code).await.unwrap().is_none());
        assert!(store.get_employee(EmployeeId::new(1)).await.unwrap().is_none());
        assert!(store.get_product(ProductId::new(1)).await.unwrap().is_none());
        assert!(store.get_category(CategoryId::new(1)).await.unwrap().is_none());
        assert!(store.get_article(ArticleId::new(1)).await.unwrap().is_none());
        assert!(
            store
                .get_comment(ArticleId::new(1), CommentId::new(1))
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            store
                .get_category_picture(CategoryId::new(1))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_update_missing_changes_nothing(pool: PgPool) {
        let store = PgStore::new(pool, 16);
        let id = store.create_product(product("Chai")).await.unwrap().unwrap();

        let missing = ProductId::new(id.as_i32() + 1);
        assert!(!store.update_product(missing, product("Chang")).await.unwrap());
        assert!(!store.update_category(CategoryId::new(9), category("Sauces")).await.unwrap());

        assert_eq!(store.count_products().await.unwrap(), 1);
        assert_eq!(store.count_categories().await.unwrap(), 0);
        assert_eq!(store.get_product(id).await.unwrap().unwrap().name, "Chai");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_duplicate_link_is_not_inserted(pool: PgPool) {
        let store = PgStore::new(pool, 16);
        let product_id = store.create_product(product("Ikura")).await.unwrap().unwrap();
        let article_id = store
            .create_article(BlogArticle {
                id: ArticleId::default(),
                title: "Fresh fish".to_string(),
                text: "Ikura is back.".to_string(),
                posted: Utc::now(),
                author_id: EmployeeId::new(1),
            })
            .await
            .unwrap()
            .unwrap();

        let first = store
            .create_related_product(article_id, product_id)
            .await
            .unwrap();
        assert!(first.is_some());

        let second = store
            .create_related_product(article_id, product_id)
            .await
            .unwrap();
        assert!(second.is_none());
        assert_eq!(
            store.list_related_products(article_id).await.unwrap().len(),
            1
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_oversized_picture_keeps_previous(pool: PgPool) {
        let store = PgStore::new(pool, 16);
        let id = store.create_category(category("Seafood")).await.unwrap().unwrap();

        assert!(store.update_category_picture(id, vec![7_u8; 16]).await.unwrap());
        let err = store
            .update_category_picture(id, vec![0_u8; 17])
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::PayloadTooLarge { len: 17, max: 16 }));

        let stored = store.get_category_picture(id).await.unwrap().unwrap();
        assert_eq!(stored, vec![7_u8; 16]);
    }
}

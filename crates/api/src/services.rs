//! Backend selection and argument validation.
//!
//! [`Services`] is resolved once from [`ServiceBackend`] at start-up and is the
//! only service value handlers see. It rejects invalid arguments before
//! delegating, so both stores enforce the same rules.

use northwind_core::{
    ArticleId, ArticleProductId, BlogArticle, BlogArticleProduct, BlogComment, BloggingService,
    CategoryId, CategoryService, CommentId, Customer, CustomerId, CustomerService, Employee,
    EmployeeId, EmployeeService, Page, Product, ProductCategory, ProductId, ProductService,
    ServiceResult, validate,
};

use crate::config::{ApiConfig, ServiceBackend};
use crate::db::{self, PgStore};
use crate::memory::MemoryStore;

/// Errors raised while resolving the backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("NORTHWIND_DATABASE_URL is required for the postgres backend")]
    MissingDatabaseUrl,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// The configured store.
#[derive(Debug)]
pub enum Services {
    InMemory(MemoryStore),
    Postgres(PgStore),
}

macro_rules! dispatch {
    ($self:ident, $store:ident => $call:expr) => {
        match $self {
            Self::InMemory($store) => $call.await,
            Self::Postgres($store) => $call.await,
        }
    };
}

impl Services {
    /// Build the store named by `config.backend`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the postgres backend is selected without a
    /// database URL or the pool cannot connect.
    pub async fn from_config(config: &ApiConfig) -> Result<Self, BackendError> {
        match config.backend {
            ServiceBackend::InMemory => Ok(Self::in_memory(config.picture_max_file_size)),
            ServiceBackend::Postgres => {
                let url = config
                    .database_url
                    .as_ref()
                    .ok_or(BackendError::MissingDatabaseUrl)?;
                let pool = db::create_pool(url).await?;
                Ok(Self::Postgres(PgStore::new(
                    pool,
                    config.picture_max_file_size,
                )))
            }
        }
    }

    /// An empty in-memory store.
    #[must_use]
    pub fn in_memory(picture_max_file_size: usize) -> Self {
        Self::InMemory(MemoryStore::new(picture_max_file_size))
    }

    /// Which backend this is.
    #[must_use]
    pub const fn backend(&self) -> ServiceBackend {
        match self {
            Self::InMemory(_) => ServiceBackend::InMemory,
            Self::Postgres(_) => ServiceBackend::Postgres,
        }
    }

    /// Whether the backing store can serve requests.
    pub async fn is_ready(&self) -> bool {
        match self {
            Self::InMemory(_) => true,
            Self::Postgres(store) => store.ping().await.is_ok(),
        }
    }
}

// =============================================================================
// Customers
// =============================================================================

impl CustomerService for Services {
    async fn list_customers(&self, page: Page) -> ServiceResult<Vec<Customer>> {
        dispatch!(self, store => store.list_customers(page))
    }

    async fn get_customer(&self, id: &CustomerId) -> ServiceResult<Option<Customer>> {
        dispatch!(self, store => store.get_customer(id))
    }

    async fn create_customer(&self, customer: Customer) -> ServiceResult<Option<CustomerId>> {
        customer.validate()?;
        dispatch!(self, store => store.create_customer(customer))
    }

    async fn update_customer(&self, id: &CustomerId, customer: Customer) -> ServiceResult<bool> {
        customer.validate()?;
        dispatch!(self, store => store.update_customer(id, customer))
    }

    async fn delete_customer(&self, id: &CustomerId) -> ServiceResult<bool> {
        dispatch!(self, store => store.delete_customer(id))
    }

    async fn count_customers(&self) -> ServiceResult<u64> {
        dispatch!(self, store => store.count_customers())
    }
}

// =============================================================================
// Employees
// =============================================================================

impl EmployeeService for Services {
    async fn list_employees(&self, page: Page) -> ServiceResult<Vec<Employee>> {
        dispatch!(self, store => store.list_employees(page))
    }

    async fn get_employee(&self, id: EmployeeId) -> ServiceResult<Option<Employee>> {
        validate::id("employee id", id)?;
        dispatch!(self, store => store.get_employee(id))
    }

    async fn create_employee(&self, employee: Employee) -> ServiceResult<Option<EmployeeId>> {
        employee.validate()?;
        dispatch!(self, store => store.create_employee(employee))
    }

    async fn update_employee(&self, id: EmployeeId, employee: Employee) -> ServiceResult<bool> {
        validate::id("employee id", id)?;
        employee.validate()?;
        dispatch!(self, store => store.update_employee(id, employee))
    }

    async fn delete_employee(&self, id: EmployeeId) -> ServiceResult<bool> {
        validate::id("employee id", id)?;
        dispatch!(self, store => store.delete_employee(id))
    }

    async fn count_employees(&self) -> ServiceResult<u64> {
        dispatch!(self, store => store.count_employees())
    }

    async fn get_employee_photo(&self, id: EmployeeId) -> ServiceResult<Option<Vec<u8>>> {
        validate::id("employee id", id)?;
        dispatch!(self, store => store.get_employee_photo(id))
    }

    async fn update_employee_photo(&self, id: EmployeeId, photo: Vec<u8>) -> ServiceResult<bool> {
        validate::id("employee id", id)?;
        dispatch!(self, store => store.update_employee_photo(id, photo))
    }

    async fn delete_employee_photo(&self, id: EmployeeId) -> ServiceResult<bool> {
        validate::id("employee id", id)?;
        dispatch!(self, store => store.delete_employee_photo(id))
    }
}

// =============================================================================
// Products
// =============================================================================

impl ProductService for Services {
    async fn list_products(&self, page: Page) -> ServiceResult<Vec<Product>> {
        dispatch!(self, store => store.list_products(page))
    }

    async fn get_product(&self, id: ProductId) -> ServiceResult<Option<Product>> {
        validate::id("product id", id)?;
        dispatch!(self, store => store.get_product(id))
    }

    async fn create_product(&self, product: Product) -> ServiceResult<Option<ProductId>> {
        product.validate()?;
        dispatch!(self, store => store.create_product(product))
    }

    async fn update_product(&self, id: ProductId, product: Product) -> ServiceResult<bool> {
        validate::id("product id", id)?;
        product.validate()?;
        dispatch!(self, store => store.update_product(id, product))
    }

    async fn delete_product(&self, id: ProductId) -> ServiceResult<bool> {
        validate::id("product id", id)?;
        dispatch!(self, store => store.delete_product(id))
    }

    async fn count_products(&self) -> ServiceResult<u64> {
        dispatch!(self, store => store.count_products())
    }

    async fn lookup_products_by_name(&self, names: &[String]) -> ServiceResult<Vec<Product>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        dispatch!(self, store => store.lookup_products_by_name(names))
    }

    async fn list_products_for_category(
        &self,
        category_id: CategoryId,
    ) -> ServiceResult<Vec<Product>> {
        validate::id("category id", category_id)?;
        dispatch!(self, store => store.list_products_for_category(category_id))
    }
}

// =============================================================================
// Categories
// =============================================================================

impl CategoryService for Services {
    async fn list_categories(&self, page: Page) -> ServiceResult<Vec<ProductCategory>> {
        dispatch!(self, store => store.list_categories(page))
    }

    async fn get_category(&self, id: CategoryId) -> ServiceResult<Option<ProductCategory>> {
        validate::id("category id", id)?;
        dispatch!(self, store => store.get_category(id))
    }

    async fn create_category(
        &self,
        category: ProductCategory,
    ) -> ServiceResult<Option<CategoryId>> {
        category.validate()?;
        dispatch!(self, store => store.create_category(category))
    }

    async fn update_category(
        &self,
        id: CategoryId,
        category: ProductCategory,
    ) -> ServiceResult<bool> {
        validate::id("category id", id)?;
        category.validate()?;
        dispatch!(self, store => store.update_category(id, category))
    }

    async fn delete_category(&self, id: CategoryId) -> ServiceResult<bool> {
        validate::id("category id", id)?;
        dispatch!(self, store => store.delete_category(id))
    }

    async fn count_categories(&self) -> ServiceResult<u64> {
        dispatch!(self, store => store.count_categories())
    }

    async fn lookup_categories_by_name(
        &self,
        names: &[String],
    ) -> ServiceResult<Vec<ProductCategory>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        dispatch!(self, store => store.lookup_categories_by_name(names))
    }

    async fn get_category_picture(&self, id: CategoryId) -> ServiceResult<Option<Vec<u8>>> {
        validate::id("category id", id)?;
        dispatch!(self, store => store.get_category_picture(id))
    }

    async fn update_category_picture(
        &self,
        id: CategoryId,
        picture: Vec<u8>,
    ) -> ServiceResult<bool> {
        validate::id("category id", id)?;
        dispatch!(self, store => store.update_category_picture(id, picture))
    }

    async fn delete_category_picture(&self, id: CategoryId) -> ServiceResult<bool> {
        validate::id("category id", id)?;
        dispatch!(self, store => store.delete_category_picture(id))
    }
}

// =============================================================================
// Blogging
// =============================================================================

impl BloggingService for Services {
    async fn list_articles(&self, page: Page) -> ServiceResult<Vec<BlogArticle>> {
        dispatch!(self, store => store.list_articles(page))
    }

    async fn get_article(&self, id: ArticleId) -> ServiceResult<Option<BlogArticle>> {
        validate::id("article id", id)?;
        dispatch!(self, store => store.get_article(id))
    }

    async fn create_article(&self, article: BlogArticle) -> ServiceResult<Option<ArticleId>> {
        article.validate()?;
        dispatch!(self, store => store.create_article(article))
    }

    async fn update_article(&self, id: ArticleId, article: BlogArticle) -> ServiceResult<bool> {
        validate::id("article id", id)?;
        article.validate()?;
        dispatch!(self, store => store.update_article(id, article))
    }

    async fn delete_article(&self, id: ArticleId) -> ServiceResult<bool> {
        validate::id("article id", id)?;
        dispatch!(self, store => store.delete_article(id))
    }

    async fn count_articles(&self) -> ServiceResult<u64> {
        dispatch!(self, store => store.count_articles())
    }

    async fn list_related_products(
        &self,
        article_id: ArticleId,
    ) -> ServiceResult<Vec<BlogArticleProduct>> {
        validate::id("article id", article_id)?;
        dispatch!(self, store => store.list_related_products(article_id))
    }

    async fn create_related_product(
        &self,
        article_id: ArticleId,
        product_id: ProductId,
    ) -> ServiceResult<Option<ArticleProductId>> {
        validate::id("article id", article_id)?;
        validate::id("product id", product_id)?;
        dispatch!(self, store => store.create_related_product(article_id, product_id))
    }

    async fn delete_related_product(
        &self,
        article_id: ArticleId,
        product_id: ProductId,
    ) -> ServiceResult<bool> {
        validate::id("article id", article_id)?;
        validate::id("product id", product_id)?;
        dispatch!(self, store => store.delete_related_product(article_id, product_id))
    }

    async fn list_comments(
        &self,
        article_id: ArticleId,
        page: Page,
    ) -> ServiceResult<Vec<BlogComment>> {
        validate::id("article id", article_id)?;
        dispatch!(self, store => store.list_comments(article_id, page))
    }

    async fn get_comment(
        &self,
        article_id: ArticleId,
        comment_id: CommentId,
    ) -> ServiceResult<Option<BlogComment>> {
        validate::id("article id", article_id)?;
        validate::id("comment id", comment_id)?;
        dispatch!(self, store => store.get_comment(article_id, comment_id))
    }

    async fn create_comment(&self, comment: BlogComment) -> ServiceResult<Option<CommentId>> {
        comment.validate()?;
        dispatch!(self, store => store.create_comment(comment))
    }

    async fn update_comment(
        &self,
        article_id: ArticleId,
        comment_id: CommentId,
        comment: BlogComment,
    ) -> ServiceResult<bool> {
        validate::id("article id", article_id)?;
        validate::id("comment id", comment_id)?;
        comment.validate()?;
        dispatch!(self, store => store.update_comment(article_id, comment_id, comment))
    }

    async fn delete_comment(
        &self,
        article_id: ArticleId,
        comment_id: CommentId,
    ) -> ServiceResult<bool> {
        validate::id("article id", article_id)?;
        validate::id("comment id", comment_id)?;
        dispatch!(self, store => store.delete_comment(article_id, comment_id))
    }

    async fn count_comments(&self, article_id: ArticleId) -> ServiceResult<u64> {
        validate::id("article id", article_id)?;
        dispatch!(self, store => store.count_comments(article_id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use northwind_core::ServiceError;

    use super::*;

    fn services() -> Services {
        Services::in_memory(1024)
    }

    #[tokio::test]
    async fn test_non_positive_ids_are_rejected() {
        let services = services();

        assert!(matches!(
            services.get_employee(EmployeeId::new(0)).await,
            Err(ServiceError::InvalidArgument(_))
        ));
        assert!(matches!(
            services.delete_product(ProductId::new(-1)).await,
            Err(ServiceError::InvalidArgument(_))
        ));
        assert!(matches!(
            services.get_category_picture(CategoryId::new(0)).await,
            Err(ServiceError::InvalidArgument(_))
        ));
        assert!(matches!(
            services
                .get_comment(ArticleId::new(1), CommentId::new(0))
                .await,
            Err(ServiceError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none_for_every_entity() {
        let services = services();

        assert!(
            services
                .get_customer(&CustomerId::parse("NONE").unwrap())
                .await
                .unwrap()
                .is_none()
        );
        assert!(services.get_employee(EmployeeId::new(1)).await.unwrap().is_none());
        assert!(services.get_product(ProductId::new(1)).await.unwrap().is_none());
        assert!(services.get_category(CategoryId::new(1)).await.unwrap().is_none());
        assert!(services.get_article(ArticleId::new(1)).await.unwrap().is_none());
        assert!(
            services
                .get_comment(ArticleId::new(1), CommentId::new(1))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_invalid_record_is_not_stored() {
        let services = services();
        let category = ProductCategory {
            id: CategoryId::default(),
            name: "  ".to_string(),
            description: None,
        };

        assert!(matches!(
            services.create_category(category).await,
            Err(ServiceError::InvalidArgument(_))
        ));
        assert_eq!(services.count_categories().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_name_lookup() {
        let services = services();
        assert!(services.lookup_products_by_name(&[]).await.unwrap().is_empty());
        assert!(services.lookup_categories_by_name(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_is_always_ready() {
        let services = services();
        assert_eq!(services.backend(), ServiceBackend::InMemory);
        assert!(services.is_ready().await);
    }
}

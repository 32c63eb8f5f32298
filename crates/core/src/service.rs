//! Service trait definitions shared by every backend.
//!
//! All operations are async. Absence is reported through the return type
//! (`Option` for lookups, `bool` for updates and deletes) rather than as an
//! error; `ServiceError` is reserved for invalid arguments, oversized
//! payloads and storage failures.

use crate::error::ServiceResult;
use crate::models::{
    BlogArticle, BlogArticleProduct, BlogComment, Customer, Employee, Product, ProductCategory,
};
use crate::types::{
    ArticleId, ArticleProductId, CategoryId, CommentId, CustomerId, EmployeeId, Page, ProductId,
};

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

pub trait CustomerService: Send + Sync {
    fn list_customers(&self, page: Page) -> impl Future<Output = ServiceResult<Vec<Customer>>> + Send;
    fn get_customer(
        &self,
        id: &CustomerId,
    ) -> impl Future<Output = ServiceResult<Option<Customer>>> + Send;
    /// Returns `None` when the customer code is already taken.
    fn create_customer(
        &self,
        customer: Customer,
    ) -> impl Future<Output = ServiceResult<Option<CustomerId>>> + Send;
    fn update_customer(
        &self,
        id: &CustomerId,
        customer: Customer,
    ) -> impl Future<Output = ServiceResult<bool>> + Send;
    fn delete_customer(&self, id: &CustomerId) -> impl Future<Output = ServiceResult<bool>> + Send;
    fn count_customers(&self) -> impl Future<Output = ServiceResult<u64>> + Send;
}

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

pub trait EmployeeService: Send + Sync {
    fn list_employees(&self, page: Page) -> impl Future<Output = ServiceResult<Vec<Employee>>> + Send;
    fn get_employee(
        &self,
        id: EmployeeId,
    ) -> impl Future<Output = ServiceResult<Option<Employee>>> + Send;
    /// Returns `None` when no id could be allocated.
    fn create_employee(
        &self,
        employee: Employee,
    ) -> impl Future<Output = ServiceResult<Option<EmployeeId>>> + Send;
    fn update_employee(
        &self,
        id: EmployeeId,
        employee: Employee,
    ) -> impl Future<Output = ServiceResult<bool>> + Send;
    fn delete_employee(&self, id: EmployeeId) -> impl Future<Output = ServiceResult<bool>> + Send;
    fn count_employees(&self) -> impl Future<Output = ServiceResult<u64>> + Send;

    /// Decoded photo bytes. `None` when the employee does not exist, empty
    /// when it has no photo.
    fn get_employee_photo(
        &self,
        id: EmployeeId,
    ) -> impl Future<Output = ServiceResult<Option<Vec<u8>>>> + Send;
    /// Replace the photo. Oversized payloads fail with
    /// `ServiceError::PayloadTooLarge` and leave the stored photo untouched.
    fn update_employee_photo(
        &self,
        id: EmployeeId,
        photo: Vec<u8>,
    ) -> impl Future<Output = ServiceResult<bool>> + Send;
    fn delete_employee_photo(
        &self,
        id: EmployeeId,
    ) -> impl Future<Output = ServiceResult<bool>> + Send;
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

pub trait ProductService: Send + Sync {
    fn list_products(&self, page: Page) -> impl Future<Output = ServiceResult<Vec<Product>>> + Send;
    fn get_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = ServiceResult<Option<Product>>> + Send;
    fn create_product(
        &self,
        product: Product,
    ) -> impl Future<Output = ServiceResult<Option<ProductId>>> + Send;
    fn update_product(
        &self,
        id: ProductId,
        product: Product,
    ) -> impl Future<Output = ServiceResult<bool>> + Send;
    fn delete_product(&self, id: ProductId) -> impl Future<Output = ServiceResult<bool>> + Send;
    fn count_products(&self) -> impl Future<Output = ServiceResult<u64>> + Send;
    /// Case-insensitive exact match on the product name.
    fn lookup_products_by_name(
        &self,
        names: &[String],
    ) -> impl Future<Output = ServiceResult<Vec<Product>>> + Send;
    fn list_products_for_category(
        &self,
        category_id: CategoryId,
    ) -> impl Future<Output = ServiceResult<Vec<Product>>> + Send;
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub trait CategoryService: Send + Sync {
    fn list_categories(
        &self,
        page: Page,
    ) -> impl Future<Output = ServiceResult<Vec<ProductCategory>>> + Send;
    fn get_category(
        &self,
        id: CategoryId,
    ) -> impl Future<Output = ServiceResult<Option<ProductCategory>>> + Send;
    fn create_category(
        &self,
        category: ProductCategory,
    ) -> impl Future<Output = ServiceResult<Option<CategoryId>>> + Send;
    fn update_category(
        &self,
        id: CategoryId,
        category: ProductCategory,
    ) -> impl Future<Output = ServiceResult<bool>> + Send;
    fn delete_category(&self, id: CategoryId) -> impl Future<Output = ServiceResult<bool>> + Send;
    fn count_categories(&self) -> impl Future<Output = ServiceResult<u64>> + Send;
    fn lookup_categories_by_name(
        &self,
        names: &[String],
    ) -> impl Future<Output = ServiceResult<Vec<ProductCategory>>> + Send;

    /// Decoded picture bytes. `None` when the category does not exist, empty
    /// when it has no picture.
    fn get_category_picture(
        &self,
        id: CategoryId,
    ) -> impl Future<Output = ServiceResult<Option<Vec<u8>>>> + Send;
    /// Replace the picture. Oversized payloads fail with
    /// `ServiceError::PayloadTooLarge` and leave the stored picture untouched.
    fn update_category_picture(
        &self,
        id: CategoryId,
        picture: Vec<u8>,
    ) -> impl Future<Output = ServiceResult<bool>> + Send;
    fn delete_category_picture(
        &self,
        id: CategoryId,
    ) -> impl Future<Output = ServiceResult<bool>> + Send;
}

// ---------------------------------------------------------------------------
// Blogging
// ---------------------------------------------------------------------------

pub trait BloggingService: Send + Sync {
    fn list_articles(
        &self,
        page: Page,
    ) -> impl Future<Output = ServiceResult<Vec<BlogArticle>>> + Send;
    fn get_article(
        &self,
        id: ArticleId,
    ) -> impl Future<Output = ServiceResult<Option<BlogArticle>>> + Send;
    fn create_article(
        &self,
        article: BlogArticle,
    ) -> impl Future<Output = ServiceResult<Option<ArticleId>>> + Send;
    /// Updates title, text and posted time only.
    fn update_article(
        &self,
        id: ArticleId,
        article: BlogArticle,
    ) -> impl Future<Output = ServiceResult<bool>> + Send;
    fn delete_article(&self, id: ArticleId) -> impl Future<Output = ServiceResult<bool>> + Send;
    fn count_articles(&self) -> impl Future<Output = ServiceResult<u64>> + Send;

    fn list_related_products(
        &self,
        article_id: ArticleId,
    ) -> impl Future<Output = ServiceResult<Vec<BlogArticleProduct>>> + Send;
    /// Returns `None` when the pair is already linked.
    fn create_related_product(
        &self,
        article_id: ArticleId,
        product_id: ProductId,
    ) -> impl Future<Output = ServiceResult<Option<ArticleProductId>>> + Send;
    fn delete_related_product(
        &self,
        article_id: ArticleId,
        product_id: ProductId,
    ) -> impl Future<Output = ServiceResult<bool>> + Send;

    fn list_comments(
        &self,
        article_id: ArticleId,
        page: Page,
    ) -> impl Future<Output = ServiceResult<Vec<BlogComment>>> + Send;
    fn get_comment(
        &self,
        article_id: ArticleId,
        comment_id: CommentId,
    ) -> impl Future<Output = ServiceResult<Option<BlogComment>>> + Send;
    /// Returns `None` when the comment's article does not exist.
    fn create_comment(
        &self,
        comment: BlogComment,
    ) -> impl Future<Output = ServiceResult<Option<CommentId>>> + Send;
    /// Updates text and posted time only.
    fn update_comment(
        &self,
        article_id: ArticleId,
        comment_id: CommentId,
        comment: BlogComment,
    ) -> impl Future<Output = ServiceResult<bool>> + Send;
    fn delete_comment(
        &self,
        article_id: ArticleId,
        comment_id: CommentId,
    ) -> impl Future<Output = ServiceResult<bool>> + Send;
    fn count_comments(
        &self,
        article_id: ArticleId,
    ) -> impl Future<Output = ServiceResult<u64>> + Send;
}

//! Blogging repository: articles, comments and article-product links.

use chrono::{DateTime, Utc};
use northwind_core::{
    ArticleId, ArticleProductId, BlogArticle, BlogArticleProduct, BlogComment, BloggingService,
    CommentId, EmployeeId, Page, ProductId, ServiceResult,
};
use sqlx::PgPool;

use super::{PgStore, RepositoryError, limit_offset, row_count};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ArticleRow {
    id: i32,
    title: String,
    text: String,
    posted: DateTime<Utc>,
    author_id: i32,
}

impl From<ArticleRow> for BlogArticle {
    fn from(row: ArticleRow) -> Self {
        Self {
            id: ArticleId::new(row.id),
            title: row.title,
            text: row.text,
            posted: row.posted,
            author_id: EmployeeId::new(row.author_id),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id: i32,
    text: String,
    posted: DateTime<Utc>,
    author_id: String,
    article_id: i32,
}

impl From<CommentRow> for BlogComment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: CommentId::new(row.id),
            text: row.text,
            posted: row.posted,
            author_id: row.author_id,
            article_id: ArticleId::new(row.article_id),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ArticleProductRow {
    id: i32,
    article_id: i32,
    product_id: i32,
}

impl From<ArticleProductRow> for BlogArticleProduct {
    fn from(row: ArticleProductRow) -> Self {
        Self {
            id: ArticleProductId::new(row.id),
            article_id: ArticleId::new(row.article_id),
            product_id: ProductId::new(row.product_id),
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for blogging database operations.
pub struct BloggingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BloggingRepository<'a> {
    /// Create a new blogging repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    // -------------------------------------------------------------------------
    // Articles
    // -------------------------------------------------------------------------

    /// List articles ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_articles(&self, page: Page) -> Result<Vec<BlogArticle>, RepositoryError> {
        let (limit, offset) = limit_offset(page);
        let rows = sqlx::query_as::<_, ArticleRow>(
            r"
            SELECT id, title, text, posted, author_id
            FROM blog_articles
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

    /// Get an article by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_article(&self, id: ArticleId) -> Result<Option<BlogArticle>, RepositoryError> {
        let row = sqlx::query_as::<_, ArticleRow>(
            "SELECT id, title, text, posted, author_id FROM blog_articles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Whether an article exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn article_exists(&self, id: ArticleId) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM blog_articles WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    /// Insert an article and return the id the database assigned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_article(&self, article: &BlogArticle) -> Result<ArticleId, RepositoryError> {
        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO blog_articles (title, text, posted, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(&article.title)
        .bind(&article.text)
        .bind(article.posted)
        .bind(article.author_id)
        .fetch_one(self.pool)
        .await?;

        Ok(ArticleId::new(id))
    }

    /// Update title, text and posted time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_article(
        &self,
        id: ArticleId,
        article: &BlogArticle,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE blog_articles SET title = $2, text = $3, posted = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(&article.title)
        .bind(&article.text)
        .bind(article.posted)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an article row. Comments and product links are not touched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_article(&self, id: ArticleId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM blog_articles WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count articles.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_articles(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blog_articles")
            .fetch_one(self.pool)
            .await?;

        row_count(count)
    }

    // -------------------------------------------------------------------------
    // Related products
    // -------------------------------------------------------------------------

    /// Product links of an article.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_related_products(
        &self,
        article_id: ArticleId,
    ) -> Result<Vec<BlogArticleProduct>, RepositoryError> {
        let rows = sqlx::query_as::<_, ArticleProductRow>(
            r"
            SELECT id, article_id, product_id
            FROM blog_article_products
            WHERE article_id = $1
            ORDER BY id
            ",
        )
        .bind(article_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Link a product to an article. Returns `None` if the pair already exists.
    ///
    /// The existence check and the insert are separate statements.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_related_product(
        &self,
        article_id: ArticleId,
        product_id: ProductId,
    ) -> Result<Option<ArticleProductId>, RepositoryError> {
        let linked: bool = sqlx::query_scalar(
            r"
            SELECT EXISTS (
                SELECT 1 FROM blog_article_products
                WHERE article_id = $1 AND product_id = $2
            )
            ",
        )
        .bind(article_id)
        .bind(product_id)
        .fetch_one(self.pool)
        .await?;

        if linked {
            return Ok(None);
        }

        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO blog_article_products (article_id, product_id)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(article_id)
        .bind(product_id)
        .fetch_one(self.pool)
        .await?;

        Ok(Some(ArticleProductId::new(id)))
    }

    /// Remove a product link.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_related_product(
        &self,
        article_id: ArticleId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "DELETE FROM blog_article_products WHERE article_id = $1 AND product_id = $2",
        )
        .bind(article_id)
        .bind(product_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // -------------------------------------------------------------------------
    // Comments
    // -------------------------------------------------------------------------

    /// Comments of an article ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_comments(
        &self,
        article_id: ArticleId,
        page: Page,
    ) -> Result<Vec<BlogComment>, RepositoryError> {
        let (limit, offset) = limit_offset(page);
        let rows = sqlx::query_as::<_, CommentRow>(
            r"
            SELECT id, text, posted, author_id, article_id
            FROM blog_comments
            WHERE article_id = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(article_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a comment of an article.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_comment(
        &self,
        article_id: ArticleId,
        comment_id: CommentId,
    ) -> Result<Option<BlogComment>, RepositoryError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r"
            SELECT id, text, posted, author_id, article_id
            FROM blog_comments
            WHERE id = $1 AND article_id = $2
            ",
        )
        .bind(comment_id)
        .bind(article_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Insert a comment and return the id the database assigned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_comment(&self, comment: &BlogComment) -> Result<CommentId, RepositoryError> {
        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO blog_comments (text, posted, author_id, article_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(&comment.text)
        .bind(comment.posted)
        .bind(&comment.author_id)
        .bind(comment.article_id)
        .fetch_one(self.pool)
        .await?;

        Ok(CommentId::new(id))
    }

    /// Update text and posted time of a comment of an article.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_comment(
        &self,
        article_id: ArticleId,
        comment_id: CommentId,
        comment: &BlogComment,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE blog_comments
            SET text = $3, posted = $4
            WHERE id = $1 AND article_id = $2
            ",
        )
        .bind(comment_id)
        .bind(article_id)
        .bind(&comment.text)
        .bind(comment.posted)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a comment of an article.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_comment(
        &self,
        article_id: ArticleId,
        comment_id: CommentId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM blog_comments WHERE id = $1 AND article_id = $2")
            .bind(comment_id)
            .bind(article_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count the comments of an article.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_comments(&self, article_id: ArticleId) -> Result<u64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM blog_comments WHERE article_id = $1")
                .bind(article_id)
                .fetch_one(self.pool)
                .await?;

        row_count(count)
    }
}

// =============================================================================
// Service
// =============================================================================

impl BloggingService for PgStore {
    async fn list_articles(&self, page: Page) -> ServiceResult<Vec<BlogArticle>> {
        Ok(BloggingRepository::new(&self.pool)
            .list_articles(page)
            .await?)
    }

    async fn get_article(&self, id: ArticleId) -> ServiceResult<Option<BlogArticle>> {
        Ok(BloggingRepository::new(&self.pool).get_article(id).await?)
    }

    async fn create_article(&self, article: BlogArticle) -> ServiceResult<Option<ArticleId>> {
        let id = BloggingRepository::new(&self.pool)
            .create_article(&article)
            .await?;
        Ok(Some(id))
    }

    async fn update_article(&self, id: ArticleId, article: BlogArticle) -> ServiceResult<bool> {
        Ok(BloggingRepository::new(&self.pool)
            .update_article(id, &article)
            .await?)
    }

    async fn delete_article(&self, id: ArticleId) -> ServiceResult<bool> {
        Ok(BloggingRepository::new(&self.pool)
            .delete_article(id)
            .await?)
    }

    async fn count_articles(&self) -> ServiceResult<u64> {
        Ok(BloggingRepository::new(&self.pool).count_articles().await?)
    }

    async fn list_related_products(
        &self,
        article_id: ArticleId,
    ) -> ServiceResult<Vec<BlogArticleProduct>> {
        Ok(BloggingRepository::new(&self.pool)
            .list_related_products(article_id)
            .await?)
    }

    async fn create_related_product(
        &self,
        article_id: ArticleId,
        product_id: ProductId,
    ) -> ServiceResult<Option<ArticleProductId>> {
        Ok(BloggingRepository::new(&self.pool)
            .create_related_product(article_id, product_id)
            .await?)
    }

    async fn delete_related_product(
        &self,
        article_id: ArticleId,
        product_id: ProductId,
    ) -> ServiceResult<bool> {
        Ok(BloggingRepository::new(&self.pool)
            .delete_related_product(article_id, product_id)
            .await?)
    }

    async fn list_comments(
        &self,
        article_id: ArticleId,
        page: Page,
    ) -> ServiceResult<Vec<BlogComment>> {
        Ok(BloggingRepository::new(&self.pool)
            .list_comments(article_id, page)
            .await?)
    }

    async fn get_comment(
        &self,
        article_id: ArticleId,
        comment_id: CommentId,
    ) -> ServiceResult<Option<BlogComment>> {
        Ok(BloggingRepository::new(&self.pool)
            .get_comment(article_id, comment_id)
            .await?)
    }

    async fn create_comment(&self, comment: BlogComment) -> ServiceResult<Option<CommentId>> {
        let repo = BloggingRepository::new(&self.pool);
        if !repo.article_exists(comment.article_id).await? {
            return Ok(None);
        }
        Ok(Some(repo.create_comment(&comment).await?))
    }

    async fn update_comment(
        &self,
        article_id: ArticleId,
        comment_id: CommentId,
        comment: BlogComment,
    ) -> ServiceResult<bool> {
        Ok(BloggingRepository::new(&self.pool)
            .update_comment(article_id, comment_id, &comment)
            .await?)
    }

    async fn delete_comment(
        &self,
        article_id: ArticleId,
        comment_id: CommentId,
    ) -> ServiceResult<bool> {
        Ok(BloggingRepository::new(&self.pool)
            .delete_comment(article_id, comment_id)
            .await?)
    }

    async fn count_comments(&self, article_id: ArticleId) -> ServiceResult<u64> {
        Ok(BloggingRepository::new(&self.pool)
            .count_comments(article_id)
            .await?)
    }
}

use northwind_core::{
    ArticleId, ArticleProductId, BlogArticle, BlogArticleProduct, BlogComment, BloggingService,
    CommentId, Page, ProductId, ServiceResult, allocator,
};

use super::{MemoryStore, row_count};

impl BloggingService for MemoryStore {
    async fn list_articles(&self, page: Page) -> ServiceResult<Vec<BlogArticle>> {
        let tables = self.tables.read().await;
        Ok(page.apply(tables.articles.values()).cloned().collect())
    }

    async fn get_article(&self, id: ArticleId) -> ServiceResult<Option<BlogArticle>> {
        let tables = self.tables.read().await;
        Ok(tables.articles.get(&id).cloned())
    }

    async fn create_article(&self, mut article: BlogArticle) -> ServiceResult<Option<ArticleId>> {
        let mut tables = self.tables.write().await;
        let Some(id) = allocator::allocate(&tables.articles) else {
            tracing::warn!("article id range exhausted");
            return Ok(None);
        };
        article.id = id;
        tables.articles.insert(id, article);
        Ok(Some(id))
    }

    async fn update_article(&self, id: ArticleId, article: BlogArticle) -> ServiceResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables.articles.get_mut(&id) else {
            return Ok(false);
        };
        stored.overwrite_with(article);
        Ok(true)
    }

    async fn delete_article(&self, id: ArticleId) -> ServiceResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.articles.remove(&id).is_some())
    }

    async fn count_articles(&self) -> ServiceResult<u64> {
        let tables = self.tables.read().await;
        Ok(row_count(&tables.articles))
    }

    async fn list_related_products(
        &self,
        article_id: ArticleId,
    ) -> ServiceResult<Vec<BlogArticleProduct>> {
        let tables = self.tables.read().await;
        Ok(tables
            .article_products
            .values()
            .filter(|link| link.article_id == article_id)
            .copied()
            .collect())
    }

    async fn create_related_product(
        &self,
        article_id: ArticleId,
        product_id: ProductId,
    ) -> ServiceResult<Option<ArticleProductId>> {
        let mut tables = self.tables.write().await;
        let linked = tables
            .article_products
            .values()
            .any(|link| link.article_id == article_id && link.product_id == product_id);
        if linked {
            return Ok(None);
        }

        let Some(id) = allocator::allocate(&tables.article_products) else {
            tracing::warn!("article product id range exhausted");
            return Ok(None);
        };
        tables.article_products.insert(
            id,
            BlogArticleProduct {
                id,
                article_id,
                product_id,
            },
        );
        Ok(Some(id))
    }

    async fn delete_related_product(
        &self,
        article_id: ArticleId,
        product_id: ProductId,
    ) -> ServiceResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.article_products.len();
        tables
            .article_products
            .retain(|_, link| !(link.article_id == article_id && link.product_id == product_id));
        Ok(tables.article_products.len() < before)
    }

    async fn list_comments(
        &self,
        article_id: ArticleId,
        page: Page,
    ) -> ServiceResult<Vec<BlogComment>> {
        let tables = self.tables.read().await;
        let comments = tables
            .comments
            .values()
            .filter(|comment| comment.article_id == article_id);
        Ok(page.apply(comments).cloned().collect())
    }

    async fn get_comment(
        &self,
        article_id: ArticleId,
        comment_id: CommentId,
    ) -> ServiceResult<Option<BlogComment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .get(&comment_id)
            .filter(|comment| comment.article_id == article_id)
            .cloned())
    }

    async fn create_comment(&self, mut comment: BlogComment) -> ServiceResult<Option<CommentId>> {
        let mut tables = self.tables.write().await;
        if !tables.articles.contains_key(&comment.article_id) {
            return Ok(None);
        }

        let Some(id) = allocator::allocate(&tables.comments) else {
            tracing::warn!("comment id range exhausted");
            return Ok(None);
        };
        comment.id = id;
        tables.comments.insert(id, comment);
        Ok(Some(id))
    }

    async fn update_comment(
        &self,
        article_id: ArticleId,
        comment_id: CommentId,
        comment: BlogComment,
    ) -> ServiceResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables
            .comments
            .get_mut(&comment_id)
            .filter(|stored| stored.article_id == article_id)
        else {
            return Ok(false);
        };
        stored.overwrite_with(comment);
        Ok(true)
    }

    async fn delete_comment(
        &self,
        article_id: ArticleId,
        comment_id: CommentId,
    ) -> ServiceResult<bool> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .comments
            .get(&comment_id)
            .is_some_and(|comment| comment.article_id == article_id);
        if !owned {
            return Ok(false);
        }
        Ok(tables.comments.remove(&comment_id).is_some())
    }

    async fn count_comments(&self, article_id: ArticleId) -> ServiceResult<u64> {
        let tables = self.tables.read().await;
        let count = tables
            .comments
            .values()
            .filter(|comment| comment.article_id == article_id)
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }
}

//! Blog route handlers: articles, related products and comments.
//!
//! Articles are listed with their author's display name. Comments and
//! related-product links are always addressed through their article.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;
use northwind_core::{
    ArticleId, BlogArticle, BlogArticleProduct, BlogComment, BloggingService, CommentId,
    EmployeeService, Page, Product, ProductId, ProductService,
};
use tracing::instrument;

use super::extract::Pagination;
use crate::error::AppError;
use crate::models::{ArticleFullInfo, ArticleShortInfo};
use crate::state::AppState;

/// Build the blogging router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/articles", get(list_articles).post(create_article))
        .route("/api/articles/count", get(count_articles))
        .route(
            "/api/articles/{article_id}",
            get(get_article).put(update_article).delete(delete_article),
        )
        .route(
            "/api/articles/{article_id}/products",
            get(list_related_products),
        )
        .route(
            "/api/articles/{article_id}/products/{product_id}",
            post(create_related_product).delete(delete_related_product),
        )
        .route(
            "/api/articles/{article_id}/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/api/articles/{article_id}/comments/count",
            get(count_comments),
        )
        .route(
            "/api/articles/{article_id}/comments/{comment_id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
}

fn article_not_found(id: ArticleId) -> AppError {
    AppError::NotFound(format!("article {id}"))
}

// =============================================================================
// Articles
// =============================================================================

/// GET /api/articles
///
/// Articles whose author no longer exists are left out.
#[instrument(skip_all)]
async fn list_articles(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<ArticleShortInfo>>, AppError> {
    let services = state.services();
    let articles = services.list_articles(pagination.page()?).await?;

    let mut listing = Vec::with_capacity(articles.len());
    for article in articles {
        match services.get_employee(article.author_id).await? {
            Some(author) => listing.push(ArticleShortInfo::new(article, &author)),
            None => {
                tracing::debug!(article_id = %article.id, "skipping article without author");
            }
        }
    }

    Ok(Json(listing))
}

/// GET /api/articles/count
#[instrument(skip_all)]
async fn count_articles(State(state): State<AppState>) -> Result<Json<u64>, AppError> {
    Ok(Json(state.services().count_articles().await?))
}

/// GET /api/articles/{article_id}
#[instrument(skip_all)]
async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<ArticleId>,
) -> Result<Json<ArticleFullInfo>, AppError> {
    let services = state.services();
    let article = services
        .get_article(id)
        .await?
        .ok_or_else(|| article_not_found(id))?;
    let author = services.get_employee(article.author_id).await?;

    Ok(Json(ArticleFullInfo::new(article, author.as_ref())))
}

/// POST /api/articles
///
/// The author must be an existing employee. `posted` is set to now.
#[instrument(skip_all)]
async fn create_article(
    State(state): State<AppState>,
    Json(mut article): Json<BlogArticle>,
) -> Result<(StatusCode, Json<BlogArticle>), AppError> {
    let services = state.services();
    article.validate()?;
    if services.get_employee(article.author_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "author employee {}",
            article.author_id
        )));
    }

    article.posted = Utc::now();
    let mut created = article.clone();
    created.id = services
        .create_article(article)
        .await?
        .ok_or_else(|| AppError::Conflict("no article id available".to_string()))?;

    tracing::info!(article_id = %created.id, author_id = %created.author_id, "article created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/articles/{article_id}
///
/// Replaces title and text; `posted` is set to now.
#[instrument(skip_all)]
async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<ArticleId>,
    Json(mut article): Json<BlogArticle>,
) -> Result<StatusCode, AppError> {
    if article.id != id {
        return Err(AppError::BadRequest(format!(
            "body id {} does not match path id {id}",
            article.id
        )));
    }

    article.posted = Utc::now();
    if state.services().update_article(id, article).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(article_not_found(id))
    }
}

/// DELETE /api/articles/{article_id}
///
/// Removes the article's comments and product links before the article.
#[instrument(skip_all)]
async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<ArticleId>,
) -> Result<StatusCode, AppError> {
    let services = state.services();

    for comment in services.list_comments(id, Page::all()).await? {
        services.delete_comment(id, comment.id).await?;
    }
    for link in services.list_related_products(id).await? {
        services.delete_related_product(id, link.product_id).await?;
    }

    if services.delete_article(id).await? {
        tracing::info!(article_id = %id, "article deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(article_not_found(id))
    }
}

// =============================================================================
// Related products
// =============================================================================

/// GET /api/articles/{article_id}/products
///
/// Links to products that no longer exist are left out.
#[instrument(skip_all)]
async fn list_related_products(
    State(state): State<AppState>,
    Path(article_id): Path<ArticleId>,
) -> Result<Json<Vec<Product>>, AppError> {
    let services = state.services();
    let links = services.list_related_products(article_id).await?;

    let mut products = Vec::with_capacity(links.len());
    for link in links {
        if let Some(product) = services.get_product(link.product_id).await? {
            products.push(product);
        }
    }

    Ok(Json(products))
}

/// POST /api/articles/{article_id}/products/{product_id}
#[instrument(skip_all)]
async fn create_related_product(
    State(state): State<AppState>,
    Path((article_id, product_id)): Path<(ArticleId, ProductId)>,
) -> Result<(StatusCode, Json<BlogArticleProduct>), AppError> {
    let services = state.services();
    if services.get_article(article_id).await?.is_none() {
        return Err(article_not_found(article_id));
    }
    if services.get_product(product_id).await?.is_none() {
        return Err(AppError::NotFound(format!("product {product_id}")));
    }

    let id = services
        .create_related_product(article_id, product_id)
        .await?
        .ok_or_else(|| {
            AppError::Conflict(format!(
                "product {product_id} is already linked to article {article_id}"
            ))
        })?;

    Ok((
        StatusCode::CREATED,
        Json(BlogArticleProduct {
            id,
            article_id,
            product_id,
        }),
    ))
}

/// DELETE /api/articles/{article_id}/products/{product_id}
#[instrument(skip_all)]
async fn delete_related_product(
    State(state): State<AppState>,
    Path((article_id, product_id)): Path<(ArticleId, ProductId)>,
) -> Result<StatusCode, AppError> {
    if state
        .services()
        .delete_related_product(article_id, product_id)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "product {product_id} is not linked to article {article_id}"
        )))
    }
}

// =============================================================================
// Comments
// =============================================================================

/// GET /api/articles/{article_id}/comments
#[instrument(skip_all)]
async fn list_comments(
    State(state): State<AppState>,
    Path(article_id): Path<ArticleId>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<BlogComment>>, AppError> {
    let comments = state
        .services()
        .list_comments(article_id, pagination.page()?)
        .await?;
    Ok(Json(comments))
}

/// GET /api/articles/{article_id}/comments/count
#[instrument(skip_all)]
async fn count_comments(
    State(state): State<AppState>,
    Path(article_id): Path<ArticleId>,
) -> Result<Json<u64>, AppError> {
    Ok(Json(state.services().count_comments(article_id).await?))
}

/// GET /api/articles/{article_id}/comments/{comment_id}
#[instrument(skip_all)]
async fn get_comment(
    State(state): State<AppState>,
    Path((article_id, comment_id)): Path<(ArticleId, CommentId)>,
) -> Result<Json<BlogComment>, AppError> {
    state
        .services()
        .get_comment(article_id, comment_id)
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!("comment {comment_id} on article {article_id}"))
        })
}

/// POST /api/articles/{article_id}/comments
///
/// The body's `articleId` must name the article in the path. `posted` is set
/// to now.
#[instrument(skip_all)]
async fn create_comment(
    State(state): State<AppState>,
    Path(article_id): Path<ArticleId>,
    Json(mut comment): Json<BlogComment>,
) -> Result<(StatusCode, Json<BlogComment>), AppError> {
    if comment.article_id != article_id {
        return Err(AppError::BadRequest(format!(
            "body article id {} does not match path article id {article_id}",
            comment.article_id
        )));
    }

    let services = state.services();
    if services.get_article(article_id).await?.is_none() {
        return Err(article_not_found(article_id));
    }

    comment.posted = Utc::now();
    let mut created = comment.clone();
    created.id = services
        .create_comment(comment)
        .await?
        .ok_or_else(|| article_not_found(article_id))?;

    tracing::info!(article_id = %article_id, comment_id = %created.id, "comment created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/articles/{article_id}/comments/{comment_id}
///
/// Replaces the text; `posted` is set to now.
#[instrument(skip_all)]
async fn update_comment(
    State(state): State<AppState>,
    Path((article_id, comment_id)): Path<(ArticleId, CommentId)>,
    Json(mut comment): Json<BlogComment>,
) -> Result<StatusCode, AppError> {
    if comment.article_id != article_id || comment.id != comment_id {
        return Err(AppError::BadRequest(format!(
            "body ids ({}, {}) do not match path ids ({article_id}, {comment_id})",
            comment.article_id, comment.id
        )));
    }

    comment.posted = Utc::now();
    if state
        .services()
        .update_comment(article_id, comment_id, comment)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "comment {comment_id} on article {article_id}"
        )))
    }
}

/// DELETE /api/articles/{article_id}/comments/{comment_id}
#[instrument(skip_all)]
async fn delete_comment(
    State(state): State<AppState>,
    Path((article_id, comment_id)): Path<(ArticleId, CommentId)>,
) -> Result<StatusCode, AppError> {
    if state
        .services()
        .delete_comment(article_id, comment_id)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "comment {comment_id} on article {article_id}"
        )))
    }
}

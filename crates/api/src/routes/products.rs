//! Product route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use northwind_core::{CategoryId, Product, ProductId, ProductService};
use tracing::instrument;

use super::extract::{NameList, Pagination};
use crate::error::AppError;
use crate::state::AppState;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/count", get(count_products))
        .route("/api/products/lookup", get(lookup_products))
        .route(
            "/api/products/category/{category_id}",
            get(list_products_for_category),
        )
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// GET /api/products
#[instrument(skip_all)]
async fn list_products(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state
        .services()
        .list_products(pagination.page()?)
        .await?;
    Ok(Json(products))
}

/// GET /api/products/count
#[instrument(skip_all)]
async fn count_products(State(state): State<AppState>) -> Result<Json<u64>, AppError> {
    Ok(Json(state.services().count_products().await?))
}

/// GET /api/products/lookup?name=..&name=..
#[instrument(skip_all)]
async fn lookup_products(
    State(state): State<AppState>,
    NameList(names): NameList,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.services().lookup_products_by_name(&names).await?))
}

/// GET /api/products/category/{category_id}
#[instrument(skip_all)]
async fn list_products_for_category(
    State(state): State<AppState>,
    Path(category_id): Path<CategoryId>,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(
        state
            .services()
            .list_products_for_category(category_id)
            .await?,
    ))
}

/// GET /api/products/{id}
#[instrument(skip_all)]
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, AppError> {
    state
        .services()
        .get_product(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// POST /api/products
#[instrument(skip_all)]
async fn create_product(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let mut created = product.clone();
    created.id = state
        .services()
        .create_product(product)
        .await?
        .ok_or_else(|| AppError::Conflict("no product id available".to_string()))?;

    tracing::info!(product_id = %created.id, "product created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/products/{id}
#[instrument(skip_all)]
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(product): Json<Product>,
) -> Result<StatusCode, AppError> {
    if product.id != id {
        return Err(AppError::BadRequest(format!(
            "body id {} does not match path id {id}",
            product.id
        )));
    }

    if state.services().update_product(id, product).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("product {id}")))
    }
}

/// DELETE /api/products/{id}
#[instrument(skip_all)]
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode, AppError> {
    if state.services().delete_product(id).await? {
        tracing::info!(product_id = %id, "product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("product {id}")))
    }
}

//! Category route handlers, including the picture sub-resource.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use northwind_core::{CategoryId, CategoryService, ProductCategory};
use tracing::instrument;

use super::extract::{NameList, Pagination, Upload};
use super::picture_response;
use crate::error::AppError;
use crate::state::AppState;

/// Content type served for category pictures.
const PICTURE_CONTENT_TYPE: &str = "image/jpeg";

/// Build the categories router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(list_categories).post(create_category))
        .route("/api/categories/count", get(count_categories))
        .route("/api/categories/lookup", get(lookup_categories))
        .route(
            "/api/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route(
            "/api/categories/{id}/picture",
            get(get_picture).put(update_picture).delete(delete_picture),
        )
}

// =============================================================================
// Records
// =============================================================================

/// GET /api/categories
#[instrument(skip_all)]
async fn list_categories(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<ProductCategory>>, AppError> {
    let categories = state
        .services()
        .list_categories(pagination.page()?)
        .await?;
    Ok(Json(categories))
}

/// GET /api/categories/count
#[instrument(skip_all)]
async fn count_categories(State(state): State<AppState>) -> Result<Json<u64>, AppError> {
    Ok(Json(state.services().count_categories().await?))
}

/// GET /api/categories/lookup?name=..&name=..
#[instrument(skip_all)]
async fn lookup_categories(
    State(state): State<AppState>,
    NameList(names): NameList,
) -> Result<Json<Vec<ProductCategory>>, AppError> {
    Ok(Json(
        state.services().lookup_categories_by_name(&names).await?,
    ))
}

/// GET /api/categories/{id}
#[instrument(skip_all)]
async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<ProductCategory>, AppError> {
    state
        .services()
        .get_category(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))
}

/// POST /api/categories
#[instrument(skip_all)]
async fn create_category(
    State(state): State<AppState>,
    Json(category): Json<ProductCategory>,
) -> Result<(StatusCode, Json<ProductCategory>), AppError> {
    let mut created = category.clone();
    created.id = state
        .services()
        .create_category(category)
        .await?
        .ok_or_else(|| AppError::Conflict("no category id available".to_string()))?;

    tracing::info!(category_id = %created.id, "category created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/categories/{id}
#[instrument(skip_all)]
async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(category): Json<ProductCategory>,
) -> Result<StatusCode, AppError> {
    if category.id != id {
        return Err(AppError::BadRequest(format!(
            "body id {} does not match path id {id}",
            category.id
        )));
    }

    if state.services().update_category(id, category).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("category {id}")))
    }
}

/// DELETE /api/categories/{id}
#[instrument(skip_all)]
async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<StatusCode, AppError> {
    if state.services().delete_category(id).await? {
        tracing::info!(category_id = %id, "category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("category {id}")))
    }
}

// =============================================================================
// Picture
// =============================================================================

/// GET /api/categories/{id}/picture
///
/// A category without a picture answers 200 with an empty body.
#[instrument(skip_all)]
async fn get_picture(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Response, AppError> {
    let picture = state
        .services()
        .get_category_picture(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))?;

    Ok(picture_response(PICTURE_CONTENT_TYPE, picture).into_response())
}

/// PUT /api/categories/{id}/picture
#[instrument(skip_all)]
async fn update_picture(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Upload(picture): Upload,
) -> Result<StatusCode, AppError> {
    let len = picture.len();
    if state.services().update_category_picture(id, picture).await? {
        tracing::info!(category_id = %id, bytes = len, "category picture replaced");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("category {id}")))
    }
}

/// DELETE /api/categories/{id}/picture
#[instrument(skip_all)]
async fn delete_picture(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<StatusCode, AppError> {
    if state.services().delete_category_picture(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("category {id}")))
    }
}

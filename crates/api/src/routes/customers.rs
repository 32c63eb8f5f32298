//! Customer route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use northwind_core::{Customer, CustomerId, CustomerService};
use tracing::instrument;

use super::extract::Pagination;
use crate::error::AppError;
use crate::state::AppState;

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/customers", get(list_customers).post(create_customer))
        .route("/api/customers/count", get(count_customers))
        .route(
            "/api/customers/{id}",
            get(get_customer)
                .put(update_customer)
                .delete(delete_customer),
        )
}

/// GET /api/customers
#[instrument(skip_all)]
async fn list_customers(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = state
        .services()
        .list_customers(pagination.page()?)
        .await?;
    Ok(Json(customers))
}

/// GET /api/customers/count
#[instrument(skip_all)]
async fn count_customers(State(state): State<AppState>) -> Result<Json<u64>, AppError> {
    Ok(Json(state.services().count_customers().await?))
}

/// GET /api/customers/{id}
#[instrument(skip_all)]
async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<Customer>, AppError> {
    state
        .services()
        .get_customer(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("customer {id}")))
}

/// POST /api/customers
///
/// The customer code is chosen by the client; a taken code is a 409.
#[instrument(skip_all)]
async fn create_customer(
    State(state): State<AppState>,
    Json(customer): Json<Customer>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    let created = customer.clone();
    let id = state
        .services()
        .create_customer(customer)
        .await?
        .ok_or_else(|| AppError::Conflict(format!("customer {} already exists", created.id)))?;

    tracing::info!(customer_id = %id, "customer created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/customers/{id}
#[instrument(skip_all)]
async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    Json(customer): Json<Customer>,
) -> Result<StatusCode, AppError> {
    if customer.id != id {
        return Err(AppError::BadRequest(format!(
            "body id {} does not match path id {id}",
            customer.id
        )));
    }

    if state.services().update_customer(&id, customer).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("customer {id}")))
    }
}

/// DELETE /api/customers/{id}
#[instrument(skip_all)]
async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<StatusCode, AppError> {
    if state.services().delete_customer(&id).await? {
        tracing::info!(customer_id = %id, "customer deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("customer {id}")))
    }
}

//! Employee route handlers, including the photo sub-resource.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use northwind_core::{Employee, EmployeeId, EmployeeService};
use tracing::instrument;

use super::extract::{Pagination, Upload};
use super::picture_response;
use crate::error::AppError;
use crate::state::AppState;

/// Content type served for employee photos.
const PHOTO_CONTENT_TYPE: &str = "image/bmp";

/// Build the employees router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/employees", get(list_employees).post(create_employee))
        .route("/api/employees/count", get(count_employees))
        .route(
            "/api/employees/{id}",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
        .route(
            "/api/employees/{id}/photo",
            get(get_photo).put(update_photo).delete(delete_photo),
        )
}

// =============================================================================
// Records
// =============================================================================

/// GET /api/employees
#[instrument(skip_all)]
async fn list_employees(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = state
        .services()
        .list_employees(pagination.page()?)
        .await?;
    Ok(Json(employees))
}

/// GET /api/employees/count
#[instrument(skip_all)]
async fn count_employees(State(state): State<AppState>) -> Result<Json<u64>, AppError> {
    Ok(Json(state.services().count_employees().await?))
}

/// GET /api/employees/{id}
#[instrument(skip_all)]
async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
) -> Result<Json<Employee>, AppError> {
    state
        .services()
        .get_employee(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("employee {id}")))
}

/// POST /api/employees
#[instrument(skip_all)]
async fn create_employee(
    State(state): State<AppState>,
    Json(employee): Json<Employee>,
) -> Result<(StatusCode, Json<Employee>), AppError> {
    let mut created = employee.clone();
    created.id = state
        .services()
        .create_employee(employee)
        .await?
        .ok_or_else(|| AppError::Conflict("no employee id available".to_string()))?;

    tracing::info!(employee_id = %created.id, "employee created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/employees/{id}
#[instrument(skip_all)]
async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
    Json(employee): Json<Employee>,
) -> Result<StatusCode, AppError> {
    if employee.id != id {
        return Err(AppError::BadRequest(format!(
            "body id {} does not match path id {id}",
            employee.id
        )));
    }

    if state.services().update_employee(id, employee).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("employee {id}")))
    }
}

/// DELETE /api/employees/{id}
#[instrument(skip_all)]
async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
) -> Result<StatusCode, AppError> {
    if state.services().delete_employee(id).await? {
        tracing::info!(employee_id = %id, "employee deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("employee {id}")))
    }
}

// =============================================================================
// Photo
// =============================================================================

/// GET /api/employees/{id}/photo
///
/// An employee without a photo answers 200 with an empty body.
#[instrument(skip_all)]
async fn get_photo(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
) -> Result<Response, AppError> {
    let photo = state
        .services()
        .get_employee_photo(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("employee {id}")))?;

    Ok(picture_response(PHOTO_CONTENT_TYPE, photo).into_response())
}

/// PUT /api/employees/{id}/photo
#[instrument(skip_all)]
async fn update_photo(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
    Upload(photo): Upload,
) -> Result<StatusCode, AppError> {
    let len = photo.len();
    if state.services().update_employee_photo(id, photo).await? {
        tracing::info!(employee_id = %id, bytes = len, "employee photo replaced");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("employee {id}")))
    }
}

/// DELETE /api/employees/{id}/photo
#[instrument(skip_all)]
async fn delete_photo(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
) -> Result<StatusCode, AppError> {
    if state.services().delete_employee_photo(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("employee {id}")))
    }
}

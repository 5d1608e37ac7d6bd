//! Employee CRUD request handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
};

use crate::api::dto::{
    AvailabilityPatchParams, CreateEmployeeRequest, EmployeeListParams, EmployeeResponse,
    UpdateEmployeeRequest,
};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// Creates employee-related routes.
///
/// Routes:
/// - GET /                   - List employees (role/available filters)
/// - POST /                  - Create a new employee
/// - GET /{id}               - Get employee by ID
/// - PUT /{id}               - Update employee by ID
/// - DELETE /{id}            - Delete employee by ID
/// - PATCH /{id}/availability - Flip the availability flag
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route("/{id}/availability", patch(update_availability))
}

/// GET /api/employees - List employees
///
/// Filter precedence: role, then available, then all. The available
/// filter returns available staff ordered by rating descending.
async fn list_employees(
    State(state): State<AppState>,
    Query(params): Query<EmployeeListParams>,
) -> Result<Json<Vec<EmployeeResponse>>, AppError> {
    let employees = if let Some(role) = params.role {
        state.services.employees.list_employees_by_role(&role).await?
    } else if params.available == Some(true) {
        state.services.employees.list_available_employees().await?
    } else {
        state.services.employees.list_employees().await?
    };

    let responses = employees.into_iter().map(EmployeeResponse::from).collect();
    Ok(Json(responses))
}

/// GET /api/employees/{id} - Get employee by ID
async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let employee = state.services.employees.get_employee(id).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// POST /api/employees - Create new employee
///
/// Returns 201 Created with the created employee data.
async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>), AppError> {
    let new_employee = payload.into_new_employee();
    let employee = state.services.employees.create_employee(new_employee).await?;
    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(employee))))
}

/// PUT /api/employees/{id} - Update employee
async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let update_data = payload.into_update_employee();
    let employee = state
        .services
        .employees
        .update_employee(id, update_data)
        .await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// PATCH /api/employees/{id}/availability - Update availability flag
async fn update_availability(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<AvailabilityPatchParams>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let employee = state
        .services
        .employees
        .update_availability(id, params.available)
        .await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// DELETE /api/employees/{id} - Delete employee
///
/// Returns 204 No Content on success.
async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.services.employees.delete_employee(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

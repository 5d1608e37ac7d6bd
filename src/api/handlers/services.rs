//! Service catalog CRUD request handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::api::dto::{
    CreateServiceRequest, ServiceListParams, ServiceResponse, UpdateServiceRequest,
};
use crate::error::AppError;
use crate::services::ServiceSort;
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// Creates catalog service routes.
///
/// Routes:
/// - GET /        - List services (category/search/sort_by filters)
/// - POST /       - Create a new service
/// - GET /{id}    - Get service by ID
/// - PUT /{id}    - Update service by ID
/// - DELETE /{id} - Delete service by ID
pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services).post(create_service))
        .route(
            "/{id}",
            get(get_service).put(update_service).delete(delete_service),
        )
}

fn parse_sort(value: &str) -> Result<ServiceSort, AppError> {
    match value.to_ascii_lowercase().as_str() {
        "price" => Ok(ServiceSort::Price),
        "duration" => Ok(ServiceSort::Duration),
        other => Err(AppError::BadRequest {
            message: format!("Unrecognized sort order: {}", other),
        }),
    }
}

/// GET /api/services - List services
///
/// Filter precedence: category, then search, then sort_by, then all.
async fn list_services(
    State(state): State<AppState>,
    Query(params): Query<ServiceListParams>,
) -> Result<Json<Vec<ServiceResponse>>, AppError> {
    let services = if let Some(category) = params.category {
        state
            .services
            .catalog
            .list_services_by_category(&category)
            .await?
    } else if let Some(term) = params.search {
        state.services.catalog.search_services(&term).await?
    } else if let Some(sort_by) = params.sort_by {
        let sort = parse_sort(&sort_by)?;
        state.services.catalog.list_services_sorted(sort).await?
    } else {
        state.services.catalog.list_services().await?
    };

    let responses = services.into_iter().map(ServiceResponse::from).collect();
    Ok(Json(responses))
}

/// GET /api/services/{id} - Get service by ID
async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ServiceResponse>, AppError> {
    let service = state.services.catalog.get_service(id).await?;
    Ok(Json(ServiceResponse::from(service)))
}

/// POST /api/services - Create new service
///
/// Returns 201 Created with the created service data.
async fn create_service(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ServiceResponse>), AppError> {
    let new_service = payload.into_new_service();
    let service = state.services.catalog.create_service(new_service).await?;
    Ok((StatusCode::CREATED, Json(ServiceResponse::from(service))))
}

/// PUT /api/services/{id} - Update service
async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateServiceRequest>,
) -> Result<Json<ServiceResponse>, AppError> {
    let update_data = payload.into_update_service();
    let service = state
        .services
        .catalog
        .update_service(id, update_data)
        .await?;
    Ok(Json(ServiceResponse::from(service)))
}

/// DELETE /api/services/{id} - Delete service
///
/// Returns 204 No Content on success.
async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.services.catalog.delete_service(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_accepts_known_orders() {
        assert_eq!(parse_sort("price").unwrap(), ServiceSort::Price);
        assert_eq!(parse_sort("Duration").unwrap(), ServiceSort::Duration);
    }

    #[test]
    fn test_parse_sort_rejects_unknown_order() {
        assert!(matches!(
            parse_sort("popularity"),
            Err(AppError::BadRequest { .. })
        ));
    }
}

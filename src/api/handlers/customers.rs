//! Customer CRUD request handlers.

use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::api::dto::{
    CreateCustomerRequest, CustomerListParams, CustomerResponse, UpdateCustomerRequest,
};
use crate::error::AppError;
use crate::models::Gender;
use crate::services::CustomerSort;
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// Creates customer-related routes.
///
/// Routes:
/// - GET /              - List customers (search/gender/sort_by filters)
/// - POST /             - Create a new customer
/// - GET /{id}          - Get customer by ID
/// - PUT /{id}          - Update customer by ID
/// - DELETE /{id}       - Delete customer by ID
/// - GET /phone/{phone} - Get customer by phone number
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/phone/{phone}", get(get_customer_by_phone))
}

fn parse_sort(value: &str) -> Result<CustomerSort, AppError> {
    match value.to_ascii_lowercase().as_str() {
        "visits" => Ok(CustomerSort::Visits),
        "spent" => Ok(CustomerSort::Spent),
        "lastvisit" | "last_visit" => Ok(CustomerSort::LastVisit),
        other => Err(AppError::BadRequest {
            message: format!("Unrecognized sort order: {}", other),
        }),
    }
}

/// `gender=all` means "no gender filter", matching what the frontend
/// sends for the unfiltered view.
fn gender_filter(raw: Option<String>) -> Option<String> {
    raw.filter(|g| !g.eq_ignore_ascii_case("all"))
}

/// GET /api/customers - List customers
///
/// Filter precedence: search, then gender, then sort_by, then all.
async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<CustomerListParams>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    let customers = if let Some(term) = params.search {
        state.services.customers.search_customers(&term).await?
    } else if let Some(gender) = gender_filter(params.gender) {
        let gender = Gender::from_str(&gender)
            .map_err(|message| AppError::BadRequest { message })?;
        state
            .services
            .customers
            .list_customers_by_gender(gender)
            .await?
    } else if let Some(sort_by) = params.sort_by {
        let sort = parse_sort(&sort_by)?;
        state.services.customers.list_customers_sorted(sort).await?
    } else {
        state.services.customers.list_customers().await?
    };

    let responses = customers.into_iter().map(CustomerResponse::from).collect();
    Ok(Json(responses))
}

/// GET /api/customers/{id} - Get customer by ID
async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CustomerResponse>, AppError> {
    let customer = state.services.customers.get_customer(id).await?;
    Ok(Json(CustomerResponse::from(customer)))
}

/// GET /api/customers/phone/{phone} - Get customer by phone number
async fn get_customer_by_phone(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> Result<Json<CustomerResponse>, AppError> {
    let customer = state
        .services
        .customers
        .get_customer_by_phone(&phone)
        .await?;
    Ok(Json(CustomerResponse::from(customer)))
}

/// POST /api/customers - Create new customer
///
/// Returns 201 Created with the created customer data.
async fn create_customer(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), AppError> {
    let new_customer = payload.into_new_customer();
    let customer = state.services.customers.create_customer(new_customer).await?;
    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}

/// PUT /api/customers/{id} - Update customer
async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateCustomerRequest>,
) -> Result<Json<CustomerResponse>, AppError> {
    let update_data = payload.into_update_customer();
    let customer = state
        .services
        .customers
        .update_customer(id, update_data)
        .await?;
    Ok(Json(CustomerResponse::from(customer)))
}

/// DELETE /api/customers/{id} - Delete customer
///
/// Returns 204 No Content on success.
async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.services.customers.delete_customer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_accepts_known_orders() {
        assert_eq!(parse_sort("visits").unwrap(), CustomerSort::Visits);
        assert_eq!(parse_sort("SPENT").unwrap(), CustomerSort::Spent);
        assert_eq!(parse_sort("last_visit").unwrap(), CustomerSort::LastVisit);
        assert_eq!(parse_sort("lastVisit").unwrap(), CustomerSort::LastVisit);
    }

    #[test]
    fn test_parse_sort_rejects_unknown_order() {
        let error = parse_sort("alphabetical").unwrap_err();
        assert!(matches!(error, AppError::BadRequest { .. }));
    }

    #[test]
    fn test_gender_all_means_no_filter() {
        assert_eq!(gender_filter(Some("all".to_string())), None);
        assert_eq!(gender_filter(Some("ALL".to_string())), None);
        assert_eq!(
            gender_filter(Some("FEMALE".to_string())),
            Some("FEMALE".to_string())
        );
        assert_eq!(gender_filter(None), None);
    }
}

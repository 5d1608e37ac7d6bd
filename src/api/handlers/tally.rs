//! Tally ledger request handlers: payment records, settlement status
//! transitions, and daily revenue.

use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
};

use crate::api::dto::{
    CreateTallyRecordRequest, PaymentStatusParams, RevenueParams, RevenueResponse,
    TallyListParams, TallyRecordResponse, UpdateTallyRecordRequest,
};
use crate::error::AppError;
use crate::models::{PaymentMethod, PaymentStatus};
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// Creates tally ledger routes.
///
/// Routes:
/// - GET /                      - List records (date/status/method/range filters)
/// - POST /                     - Create a new record
/// - GET /revenue               - Total revenue for a date
/// - GET /{id}                  - Get record by ID
/// - PUT /{id}                  - Update record by ID
/// - DELETE /{id}               - Delete record by ID
/// - PATCH /{id}/payment-status - Transition payment status
pub fn tally_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records).post(create_record))
        .route("/revenue", get(total_revenue))
        .route(
            "/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .route("/{id}/payment-status", patch(update_payment_status))
}

fn parse_status(value: &str) -> Result<PaymentStatus, AppError> {
    PaymentStatus::from_str(value).map_err(|message| AppError::BadRequest { message })
}

fn parse_method(value: &str) -> Result<PaymentMethod, AppError> {
    PaymentMethod::from_str(value).map_err(|message| AppError::BadRequest { message })
}

/// GET /api/tally - List tally records
///
/// Filter precedence: date, then status, then payment_method, then a
/// start_date/end_date range, then all.
async fn list_records(
    State(state): State<AppState>,
    Query(params): Query<TallyListParams>,
) -> Result<Json<Vec<TallyRecordResponse>>, AppError> {
    let records = if let Some(date) = params.date {
        state.services.tally.list_by_date(date).await?
    } else if let Some(status) = params.status {
        let status = parse_status(&status)?;
        state.services.tally.list_by_status(status).await?
    } else if let Some(method) = params.payment_method {
        let method = parse_method(&method)?;
        state.services.tally.list_by_method(method).await?
    } else if let (Some(start), Some(end)) = (params.start_date, params.end_date) {
        state.services.tally.list_by_date_range(start, end).await?
    } else {
        state.services.tally.list_records().await?
    };

    let responses = records.into_iter().map(TallyRecordResponse::from).collect();
    Ok(Json(responses))
}

/// GET /api/tally/revenue - Total revenue for a date
///
/// Sums `total_cost` over COMPLETED records on the given date; a day
/// with no completed payments reports 0.0.
async fn total_revenue(
    State(state): State<AppState>,
    Query(params): Query<RevenueParams>,
) -> Result<Json<RevenueResponse>, AppError> {
    let total = state.services.tally.total_revenue(params.date).await?;
    Ok(Json(RevenueResponse {
        date: params.date,
        total_revenue: total,
    }))
}

/// GET /api/tally/{id} - Get tally record by ID
async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TallyRecordResponse>, AppError> {
    let record = state.services.tally.get_record(id).await?;
    Ok(Json(TallyRecordResponse::from(record)))
}

/// POST /api/tally - Create new tally record
///
/// Returns 201 Created with the created record data.
async fn create_record(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateTallyRecordRequest>,
) -> Result<(StatusCode, Json<TallyRecordResponse>), AppError> {
    let new_record = payload.into_new_record();
    let record = state.services.tally.create_record(new_record).await?;
    Ok((StatusCode::CREATED, Json(TallyRecordResponse::from(record))))
}

/// PUT /api/tally/{id} - Update tally record
async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateTallyRecordRequest>,
) -> Result<Json<TallyRecordResponse>, AppError> {
    let update_data = payload.into_update_record();
    let record = state.services.tally.update_record(id, update_data).await?;
    Ok(Json(TallyRecordResponse::from(record)))
}

/// PATCH /api/tally/{id}/payment-status - Transition payment status
///
/// A COMPLETED transition stamps the payment date.
async fn update_payment_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<PaymentStatusParams>,
) -> Result<Json<TallyRecordResponse>, AppError> {
    let status = parse_status(&params.status)?;
    let record = state
        .services
        .tally
        .update_payment_status(id, status, params.upi_transaction_id)
        .await?;
    Ok(Json(TallyRecordResponse::from(record)))
}

/// DELETE /api/tally/{id} - Delete tally record
///
/// Returns 204 No Content on success.
async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.services.tally.delete_record(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_and_method() {
        assert_eq!(parse_status("pending").unwrap(), PaymentStatus::Pending);
        assert_eq!(parse_method("UPI").unwrap(), PaymentMethod::Upi);
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert!(matches!(
            parse_status("refunded"),
            Err(AppError::BadRequest { .. })
        ));
        assert!(matches!(
            parse_method("cheque"),
            Err(AppError::BadRequest { .. })
        ));
    }
}

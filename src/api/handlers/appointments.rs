//! Appointment request handlers: booking, filtering, the slot
//! availability probe, and status transitions.

use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
};

use crate::api::dto::{
    AppointmentListParams, AppointmentResponse, AvailabilityParams, AvailabilityResponse,
    CreateAppointmentRequest, StatusPatchParams, UpdateAppointmentRequest,
};
use crate::error::AppError;
use crate::models::AppointmentStatus;
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// Creates appointment-related routes.
///
/// Routes:
/// - GET /              - List appointments (date/employee/status/range filters)
/// - POST /             - Book a new appointment
/// - GET /availability  - Check whether a slot is free
/// - GET /{id}          - Get appointment by ID
/// - PUT /{id}          - Update appointment by ID
/// - DELETE /{id}       - Delete appointment by ID
/// - PATCH /{id}/status - Transition appointment status
pub fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_appointments).post(create_appointment))
        .route("/availability", get(check_availability))
        .route(
            "/{id}",
            get(get_appointment)
                .put(update_appointment)
                .delete(delete_appointment),
        )
        .route("/{id}/status", patch(update_status))
}

fn parse_status(value: &str) -> Result<AppointmentStatus, AppError> {
    AppointmentStatus::from_str(value).map_err(|message| AppError::BadRequest { message })
}

/// GET /api/appointments - List appointments
///
/// Filter precedence: employee_id+date, then date, then status, then a
/// start_date/end_date range, then all.
async fn list_appointments(
    State(state): State<AppState>,
    Query(params): Query<AppointmentListParams>,
) -> Result<Json<Vec<AppointmentResponse>>, AppError> {
    let appointments = match (params.employee_id, params.date) {
        (Some(employee_id), Some(date)) => {
            state
                .services
                .appointments
                .list_by_employee_and_date(employee_id, date)
                .await?
        }
        (None, Some(date)) => state.services.appointments.list_by_date(date).await?,
        _ => {
            if let Some(status) = params.status {
                let status = parse_status(&status)?;
                state.services.appointments.list_by_status(status).await?
            } else if let (Some(start), Some(end)) = (params.start_date, params.end_date) {
                state
                    .services
                    .appointments
                    .list_by_date_range(start, end)
                    .await?
            } else {
                state.services.appointments.list_appointments().await?
            }
        }
    };

    let responses = appointments
        .into_iter()
        .map(AppointmentResponse::from)
        .collect();
    Ok(Json(responses))
}

/// GET /api/appointments/availability - Check slot availability
///
/// Returns whether the (employee, date, time) slot has no non-cancelled
/// booking. An unknown employee ID yields 404.
async fn check_availability(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let available = state
        .services
        .appointments
        .is_slot_available(params.employee_id, params.date, params.time)
        .await?;
    Ok(Json(AvailabilityResponse { available }))
}

/// GET /api/appointments/{id} - Get appointment by ID
async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let details = state.services.appointments.get_appointment(id).await?;
    Ok(Json(AppointmentResponse::from(details)))
}

/// POST /api/appointments - Book new appointment
///
/// Returns 201 Created, or 409 when the slot is already taken.
async fn create_appointment(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentResponse>), AppError> {
    let (new_appointment, service_ids) = payload.into_parts();
    let details = state
        .services
        .appointments
        .create_appointment(new_appointment, service_ids)
        .await?;
    Ok((StatusCode::CREATED, Json(AppointmentResponse::from(details))))
}

/// PUT /api/appointments/{id} - Update appointment
async fn update_appointment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateAppointmentRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let (update_data, service_ids) = payload.into_parts();
    let details = state
        .services
        .appointments
        .update_appointment(id, update_data, service_ids)
        .await?;
    Ok(Json(AppointmentResponse::from(details)))
}

/// PATCH /api/appointments/{id}/status - Transition status
///
/// Completing a scheduled appointment credits the customer's visit
/// statistics; re-completing yields 409.
async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<StatusPatchParams>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let status = parse_status(&params.status)?;
    let details = state.services.appointments.update_status(id, status).await?;
    Ok(Json(AppointmentResponse::from(details)))
}

/// DELETE /api/appointments/{id} - Delete appointment
///
/// Returns 204 No Content on success.
async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.services.appointments.delete_appointment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_accepts_wire_forms() {
        assert_eq!(
            parse_status("COMPLETED").unwrap(),
            AppointmentStatus::Completed
        );
        assert_eq!(
            parse_status("cancelled").unwrap(),
            AppointmentStatus::Cancelled
        );
    }

    #[test]
    fn test_parse_status_rejects_unknown() {
        assert!(matches!(
            parse_status("rescheduled"),
            Err(AppError::BadRequest { .. })
        ));
    }
}

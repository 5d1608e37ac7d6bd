//! Appointment DTOs for API requests and responses.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{AppointmentStatus, NewAppointment, UpdateAppointment};
use crate::services::AppointmentDetails;

fn default_status() -> AppointmentStatus {
    AppointmentStatus::Scheduled
}

/// Request body for booking an appointment.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateAppointmentRequest {
    pub customer_id: i64,
    pub employee_id: i64,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    #[serde(default = "default_status")]
    pub status: AppointmentStatus,
    #[validate(range(min = 0.0, message = "Total must not be negative"))]
    #[serde(default)]
    pub total: f64,
    pub notes: Option<String>,
    #[validate(length(min = 1, message = "At least one service is required"))]
    pub service_ids: Vec<i64>,
}

impl CreateAppointmentRequest {
    /// Splits into an insertable row and the services to book, stamping
    /// creation timestamps.
    pub fn into_parts(self) -> (NewAppointment, Vec<i64>) {
        let now = Utc::now().naive_utc();
        let new_appointment = NewAppointment {
            customer_id: self.customer_id,
            employee_id: self.employee_id,
            appointment_date: self.appointment_date,
            appointment_time: self.appointment_time,
            status: self.status,
            total: self.total,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        };
        (new_appointment, self.service_ids)
    }
}

/// Request body for a full appointment overwrite.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateAppointmentRequest {
    pub customer_id: i64,
    pub employee_id: i64,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: AppointmentStatus,
    #[validate(range(min = 0.0, message = "Total must not be negative"))]
    pub total: f64,
    pub notes: Option<String>,
    #[validate(length(min = 1, message = "At least one service is required"))]
    pub service_ids: Vec<i64>,
}

impl UpdateAppointmentRequest {
    pub fn into_parts(self) -> (UpdateAppointment, Vec<i64>) {
        let update = UpdateAppointment {
            customer_id: self.customer_id,
            employee_id: self.employee_id,
            appointment_date: self.appointment_date,
            appointment_time: self.appointment_time,
            status: self.status,
            total: self.total,
            notes: self.notes,
            updated_at: Utc::now().naive_utc(),
        };
        (update, self.service_ids)
    }
}

/// Query parameters for the appointment listing endpoint.
///
/// Filter precedence: employee+date, then date, then status, then a
/// start/end range, then plain list-all.
#[derive(Debug, Deserialize, IntoParams)]
pub struct AppointmentListParams {
    pub date: Option<NaiveDate>,
    pub employee_id: Option<i64>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Query parameters for the slot availability check.
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityParams {
    pub employee_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Query parameter for the status patch.
#[derive(Debug, Deserialize, IntoParams)]
pub struct StatusPatchParams {
    pub status: String,
}

/// Response body reporting whether a slot is free.
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub available: bool,
}

/// Response body for appointment data, booked services included.
#[derive(Debug, Serialize, ToSchema)]
pub struct AppointmentResponse {
    pub id: i64,
    pub customer_id: i64,
    pub employee_id: i64,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: AppointmentStatus,
    pub total: f64,
    pub notes: Option<String>,
    pub service_ids: Vec<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<AppointmentDetails> for AppointmentResponse {
    fn from(details: AppointmentDetails) -> Self {
        let appointment = details.appointment;
        Self {
            id: appointment.id,
            customer_id: appointment.customer_id,
            employee_id: appointment.employee_id,
            appointment_date: appointment.appointment_date,
            appointment_time: appointment.appointment_time,
            status: appointment.status,
            total: appointment.total,
            notes: appointment.notes,
            service_ids: details.service_ids,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        }
    }
}

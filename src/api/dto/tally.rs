//! Tally ledger DTOs for API requests and responses.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{NewTallyRecord, PaymentMethod, PaymentStatus, TallyRecord, UpdateTallyRecord};

fn default_payment_status() -> PaymentStatus {
    PaymentStatus::Pending
}

/// Request body for creating a tally record.
///
/// The ledger is denormalized on purpose: customer and staff are stored
/// by name so entries survive later edits to those entities.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateTallyRecordRequest {
    pub entry_date: NaiveDate,
    pub entry_time: NaiveTime,
    #[validate(length(min = 1, max = 255, message = "Customer name is required"))]
    pub customer_name: String,
    #[validate(length(min = 1, max = 32, message = "Customer phone is required"))]
    pub customer_phone: String,
    #[validate(length(min = 1, max = 255, message = "Staff name is required"))]
    pub staff_name: String,
    pub services: JsonValue,
    #[validate(range(min = 0.01, message = "Total cost must be positive"))]
    pub total_cost: f64,
    pub payment_method: PaymentMethod,
    #[serde(default = "default_payment_status")]
    pub payment_status: PaymentStatus,
    pub payment_date: Option<NaiveDateTime>,
    pub upi_transaction_id: Option<String>,
}

impl CreateTallyRecordRequest {
    pub fn into_new_record(self) -> NewTallyRecord {
        let now = Utc::now().naive_utc();
        NewTallyRecord {
            entry_date: self.entry_date,
            entry_time: self.entry_time,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            staff_name: self.staff_name,
            services: self.services,
            total_cost: self.total_cost,
            payment_method: self.payment_method,
            payment_status: self.payment_status,
            payment_date: self.payment_date,
            upi_transaction_id: self.upi_transaction_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request body for a full tally record overwrite.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateTallyRecordRequest {
    pub entry_date: NaiveDate,
    pub entry_time: NaiveTime,
    #[validate(length(min = 1, max = 255, message = "Customer name is required"))]
    pub customer_name: String,
    #[validate(length(min = 1, max = 32, message = "Customer phone is required"))]
    pub customer_phone: String,
    #[validate(length(min = 1, max = 255, message = "Staff name is required"))]
    pub staff_name: String,
    pub services: JsonValue,
    #[validate(range(min = 0.01, message = "Total cost must be positive"))]
    pub total_cost: f64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub payment_date: Option<NaiveDateTime>,
    pub upi_transaction_id: Option<String>,
}

impl UpdateTallyRecordRequest {
    pub fn into_update_record(self) -> UpdateTallyRecord {
        UpdateTallyRecord {
            entry_date: self.entry_date,
            entry_time: self.entry_time,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            staff_name: self.staff_name,
            services: self.services,
            total_cost: self.total_cost,
            payment_method: self.payment_method,
            payment_status: self.payment_status,
            payment_date: self.payment_date,
            upi_transaction_id: self.upi_transaction_id,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

/// Query parameters for the tally listing endpoint.
///
/// Filter precedence: date, then status, then payment method, then a
/// start/end range, then plain list-all.
#[derive(Debug, Deserialize, IntoParams)]
pub struct TallyListParams {
    pub date: Option<NaiveDate>,
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Query parameters for the payment status patch.
#[derive(Debug, Deserialize, IntoParams)]
pub struct PaymentStatusParams {
    pub status: String,
    pub upi_transaction_id: Option<String>,
}

/// Query parameter for the daily revenue endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct RevenueParams {
    pub date: NaiveDate,
}

/// Response body for the daily revenue total.
#[derive(Debug, Serialize, ToSchema)]
pub struct RevenueResponse {
    pub date: NaiveDate,
    pub total_revenue: f64,
}

/// Response body for tally record data.
#[derive(Debug, Serialize, ToSchema)]
pub struct TallyRecordResponse {
    pub id: i64,
    pub entry_date: NaiveDate,
    pub entry_time: NaiveTime,
    pub customer_name: String,
    pub customer_phone: String,
    pub staff_name: String,
    pub services: JsonValue,
    pub total_cost: f64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub payment_date: Option<NaiveDateTime>,
    pub upi_transaction_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<TallyRecord> for TallyRecordResponse {
    fn from(record: TallyRecord) -> Self {
        Self {
            id: record.id,
            entry_date: record.entry_date,
            entry_time: record.entry_time,
            customer_name: record.customer_name,
            customer_phone: record.customer_phone,
            staff_name: record.staff_name,
            services: record.services,
            total_cost: record.total_cost,
            payment_method: record.payment_method,
            payment_status: record.payment_status,
            payment_date: record.payment_date,
            upi_transaction_id: record.upi_transaction_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_cost(total_cost: f64) -> CreateTallyRecordRequest {
        CreateTallyRecordRequest {
            entry_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            entry_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            customer_name: "Asha".to_string(),
            customer_phone: "555-0100".to_string(),
            staff_name: "Meera".to_string(),
            services: serde_json::json!(["Haircut"]),
            total_cost,
            payment_method: PaymentMethod::Cash,
            payment_status: PaymentStatus::Pending,
            payment_date: None,
            upi_transaction_id: None,
        }
    }

    #[test]
    fn test_total_cost_must_be_positive() {
        assert!(request_with_cost(0.0).validate().is_err());
        assert!(request_with_cost(-5.0).validate().is_err());
        assert!(request_with_cost(250.0).validate().is_ok());
    }
}

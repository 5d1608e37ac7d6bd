//! Customer-related DTOs for API requests and responses.

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{Customer, Gender, NewCustomer, UpdateCustomer};

/// Request body for creating a customer.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 32, message = "Phone is required"))]
    pub phone: String,
    #[validate(email(message = "Email should be valid"))]
    #[schema(format = "email")]
    pub email: Option<String>,
    pub gender: Gender,
    #[serde(default)]
    pub preferred_services: Vec<String>,
    pub notes: Option<String>,
    pub photo: Option<String>,
}

impl CreateCustomerRequest {
    /// Converts into an insertable model, stamping creation timestamps.
    pub fn into_new_customer(self) -> NewCustomer {
        let now = Utc::now().naive_utc();
        NewCustomer {
            name: self.name,
            phone: self.phone,
            email: self.email,
            gender: self.gender,
            preferred_services: self.preferred_services,
            notes: self.notes,
            photo: self.photo,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request body for a full customer overwrite.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 32, message = "Phone is required"))]
    pub phone: String,
    #[validate(email(message = "Email should be valid"))]
    pub email: Option<String>,
    pub gender: Gender,
    #[serde(default)]
    pub preferred_services: Vec<String>,
    pub notes: Option<String>,
    pub photo: Option<String>,
}

impl UpdateCustomerRequest {
    /// Converts into a changeset, refreshing `updated_at`.
    pub fn into_update_customer(self) -> UpdateCustomer {
        UpdateCustomer {
            name: self.name,
            phone: self.phone,
            email: self.email,
            gender: self.gender,
            preferred_services: self.preferred_services,
            notes: self.notes,
            photo: self.photo,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

/// Query parameters for the customer listing endpoint.
///
/// Dispatch precedence mirrors the original API: search, then gender
/// filter, then sort order, then plain list-all.
#[derive(Debug, Deserialize, IntoParams)]
pub struct CustomerListParams {
    pub search: Option<String>,
    pub gender: Option<String>,
    pub sort_by: Option<String>,
}

/// Response body for customer data.
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub gender: Gender,
    pub visit_count: i32,
    pub total_spent: f64,
    pub last_visit: Option<NaiveDateTime>,
    pub preferred_services: Vec<String>,
    pub notes: Option<String>,
    pub photo: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            phone: customer.phone,
            email: customer.email,
            gender: customer.gender,
            visit_count: customer.visit_count,
            total_spent: customer.total_spent,
            last_visit: customer.last_visit,
            preferred_services: customer.preferred_services,
            notes: customer.notes,
            photo: customer.photo,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

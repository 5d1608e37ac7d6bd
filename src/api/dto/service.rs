//! Service catalog DTOs for API requests and responses.

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{NewService, Service, UpdateService};

/// Request body for creating a catalog service.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateServiceRequest {
    #[validate(length(min = 1, max = 255, message = "Service name is required"))]
    pub name: String,
    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub duration_minutes: i32,
    #[validate(range(min = 0.01, message = "Price must be positive"))]
    pub price: f64,
    #[validate(length(min = 1, max = 255, message = "Category is required"))]
    pub category: String,
    pub description: Option<String>,
}

impl CreateServiceRequest {
    pub fn into_new_service(self) -> NewService {
        let now = Utc::now().naive_utc();
        NewService {
            name: self.name,
            duration_minutes: self.duration_minutes,
            price: self.price,
            category: self.category,
            description: self.description,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request body for a full service overwrite.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateServiceRequest {
    #[validate(length(min = 1, max = 255, message = "Service name is required"))]
    pub name: String,
    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub duration_minutes: i32,
    #[validate(range(min = 0.01, message = "Price must be positive"))]
    pub price: f64,
    #[validate(length(min = 1, max = 255, message = "Category is required"))]
    pub category: String,
    pub description: Option<String>,
}

impl UpdateServiceRequest {
    pub fn into_update_service(self) -> UpdateService {
        UpdateService {
            name: self.name,
            duration_minutes: self.duration_minutes,
            price: self.price,
            category: self.category,
            description: self.description,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

/// Query parameters for the service listing endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ServiceListParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
}

/// Response body for catalog service data.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceResponse {
    pub id: i64,
    pub name: String,
    pub duration_minutes: i32,
    pub price: f64,
    pub category: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Service> for ServiceResponse {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            name: service.name,
            duration_minutes: service.duration_minutes,
            price: service.price,
            category: service.category,
            description: service.description,
            created_at: service.created_at,
            updated_at: service.updated_at,
        }
    }
}

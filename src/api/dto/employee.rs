//! Employee-related DTOs for API requests and responses.

use chrono::{NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{Employee, NewEmployee, UpdateEmployee};

fn default_rating() -> f64 {
    5.0
}

fn default_true() -> bool {
    true
}

/// Request body for creating an employee.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "Role is required"))]
    pub role: String,
    #[validate(email(message = "Email should be valid"))]
    #[schema(format = "email")]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo: Option<String>,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    #[serde(default = "default_rating")]
    pub rating: f64,
    pub work_start_time: Option<NaiveTime>,
    pub work_end_time: Option<NaiveTime>,
}

impl CreateEmployeeRequest {
    pub fn into_new_employee(self) -> NewEmployee {
        let now = Utc::now().naive_utc();
        NewEmployee {
            name: self.name,
            role: self.role,
            email: self.email,
            phone: self.phone,
            photo: self.photo,
            available: self.available,
            specialties: self.specialties,
            rating: self.rating,
            work_start_time: self.work_start_time,
            work_end_time: self.work_end_time,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request body for a full employee overwrite.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "Role is required"))]
    pub role: String,
    #[validate(email(message = "Email should be valid"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo: Option<String>,
    pub available: bool,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: f64,
    pub work_start_time: Option<NaiveTime>,
    pub work_end_time: Option<NaiveTime>,
}

impl UpdateEmployeeRequest {
    pub fn into_update_employee(self) -> UpdateEmployee {
        UpdateEmployee {
            name: self.name,
            role: self.role,
            email: self.email,
            phone: self.phone,
            photo: self.photo,
            available: self.available,
            specialties: self.specialties,
            rating: self.rating,
            work_start_time: self.work_start_time,
            work_end_time: self.work_end_time,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

/// Query parameters for the employee listing endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct EmployeeListParams {
    pub role: Option<String>,
    pub available: Option<bool>,
}

/// Query parameter for the availability patch.
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityPatchParams {
    pub available: bool,
}

/// Response body for employee data.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeResponse {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo: Option<String>,
    pub available: bool,
    pub specialties: Vec<String>,
    pub rating: f64,
    pub next_available: Option<NaiveDateTime>,
    pub work_start_time: Option<NaiveTime>,
    pub work_end_time: Option<NaiveTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            role: employee.role,
            email: employee.email,
            phone: employee.phone,
            photo: employee.photo,
            available: employee.available,
            specialties: employee.specialties,
            rating: employee.rating,
            next_available: employee.next_available,
            work_start_time: employee.work_start_time,
            work_end_time: employee.work_end_time,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}

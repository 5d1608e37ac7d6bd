//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `customer` - Customer request/response DTOs
//! - `employee` - Employee request/response DTOs
//! - `service` - Catalog service request/response DTOs
//! - `appointment` - Appointment request/response DTOs
//! - `tally` - Tally ledger request/response DTOs
//! - `error` - Common error response DTOs

mod appointment;
mod customer;
mod employee;
mod error;
mod service;
mod tally;

pub use appointment::{
    AppointmentListParams, AppointmentResponse, AvailabilityParams, AvailabilityResponse,
    CreateAppointmentRequest, StatusPatchParams, UpdateAppointmentRequest,
};
pub use customer::{
    CreateCustomerRequest, CustomerListParams, CustomerResponse, UpdateCustomerRequest,
};
pub use employee::{
    AvailabilityPatchParams, CreateEmployeeRequest, EmployeeListParams, EmployeeResponse,
    UpdateEmployeeRequest,
};
pub use error::ErrorResponse;
pub use service::{
    CreateServiceRequest, ServiceListParams, ServiceResponse, UpdateServiceRequest,
};
pub use tally::{
    CreateTallyRecordRequest, PaymentStatusParams, RevenueParams, RevenueResponse,
    TallyListParams, TallyRecordResponse, UpdateTallyRecordRequest,
};

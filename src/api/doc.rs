use utoipa::OpenApi;

pub const CUSTOMER_TAG: &str = "Customers";
pub const EMPLOYEE_TAG: &str = "Employees";
pub const SERVICE_TAG: &str = "Services";
pub const APPOINTMENT_TAG: &str = "Appointments";
pub const TALLY_TAG: &str = "Tally";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Salon",
        description = "An api server for salon management",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::CustomerResponse,
            crate::api::dto::EmployeeResponse,
            crate::api::dto::ServiceResponse,
            crate::api::dto::AppointmentResponse,
            crate::api::dto::TallyRecordResponse,
            crate::models::Gender,
            crate::models::AppointmentStatus,
            crate::models::PaymentMethod,
            crate::models::PaymentStatus,
        )
    ),
    tags(
        (name = CUSTOMER_TAG, description = "Customer management endpoints"),
        (name = EMPLOYEE_TAG, description = "Employee management endpoints"),
        (name = SERVICE_TAG, description = "Service catalog endpoints"),
        (name = APPOINTMENT_TAG, description = "Appointment scheduling endpoints"),
        (name = TALLY_TAG, description = "Payment ledger and revenue endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

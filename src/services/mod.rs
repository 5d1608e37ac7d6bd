//! Service layer for business logic operations.
//!
//! Services encapsulate business rules and coordinate between
//! repositories and handlers.

mod appointment_service;
mod catalog_service;
mod customer_service;
mod employee_service;
mod tally_service;

pub use appointment_service::{AppointmentDetails, AppointmentService};
pub use catalog_service::{CatalogService, ServiceSort};
pub use customer_service::{CustomerService, CustomerSort};
pub use employee_service::EmployeeService;
pub use tally_service::TallyService;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Designed to be used as Axum application state; cloning is cheap since
/// the underlying pool uses `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub customers: CustomerService,
    pub employees: EmployeeService,
    pub catalog: CatalogService,
    pub appointments: AppointmentService,
    pub tally: TallyService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        let customers = CustomerService::new(repos.customers);
        let appointments = AppointmentService::new(
            repos.appointments,
            repos.employees.clone(),
            customers.clone(),
        );
        Self {
            customers,
            employees: EmployeeService::new(repos.employees),
            catalog: CatalogService::new(repos.services),
            appointments,
            tally: TallyService::new(repos.tally),
        }
    }
}

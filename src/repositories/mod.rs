//! Repository layer for data access operations.
//!
//! Provides async CRUD and filtered queries for all salon entities.

mod appointment_repo;
mod customer_repo;
mod employee_repo;
mod service_repo;
mod tally_repo;

pub use appointment_repo::AppointmentRepository;
pub use customer_repo::CustomerRepository;
pub use employee_repo::EmployeeRepository;
pub use service_repo::ServiceRepository;
pub use tally_repo::TallyRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub customers: CustomerRepository,
    pub employees: EmployeeRepository,
    pub services: ServiceRepository,
    pub appointments: AppointmentRepository,
    pub tally: TallyRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            customers: CustomerRepository::new(pool.clone()),
            employees: EmployeeRepository::new(pool.clone()),
            services: ServiceRepository::new(pool.clone()),
            appointments: AppointmentRepository::new(pool.clone()),
            tally: TallyRepository::new(pool),
        }
    }
}

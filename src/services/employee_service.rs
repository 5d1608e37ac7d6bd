//! Employee business logic.

use chrono::Utc;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{Employee, NewEmployee, UpdateEmployee};
use crate::repositories::EmployeeRepository;

#[derive(Clone)]
pub struct EmployeeService {
    repo: EmployeeRepository,
}

impl EmployeeService {
    pub fn new(repo: EmployeeRepository) -> Self {
        Self { repo }
    }

    pub async fn create_employee(&self, new_employee: NewEmployee) -> AppResult<Employee> {
        let employee = self.repo.create(new_employee).await?;
        info!(employee_id = employee.id, "Employee created");
        Ok(employee)
    }

    pub async fn get_employee(&self, id: i64) -> AppResult<Employee> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("employee", id))
    }

    pub async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        self.repo.list_all().await
    }

    /// Available employees only, ordered by rating descending.
    pub async fn list_available_employees(&self) -> AppResult<Vec<Employee>> {
        self.repo.list_available_by_rating().await
    }

    pub async fn list_employees_by_role(&self, role: &str) -> AppResult<Vec<Employee>> {
        self.repo.find_by_role(role).await
    }

    pub async fn update_employee(
        &self,
        id: i64,
        update_data: UpdateEmployee,
    ) -> AppResult<Employee> {
        self.repo
            .update(id, update_data)
            .await?
            .ok_or_else(|| AppError::not_found("employee", id))
    }

    /// Flips the availability flag; becoming available stamps
    /// `next_available` to now.
    pub async fn update_availability(&self, id: i64, available: bool) -> AppResult<Employee> {
        let now = Utc::now().naive_utc();
        let employee = self
            .repo
            .set_availability(id, available, now)
            .await?
            .ok_or_else(|| AppError::not_found("employee", id))?;
        info!(employee_id = id, available, "Employee availability updated");
        Ok(employee)
    }

    pub async fn delete_employee(&self, id: i64) -> AppResult<()> {
        let affected = self.repo.delete(id).await?;
        if affected == 0 {
            return Err(AppError::not_found("employee", id));
        }
        info!(employee_id = id, "Employee deleted");
        Ok(())
    }
}

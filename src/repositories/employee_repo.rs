//! Employee repository for async database operations.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Employee, NewEmployee, UpdateEmployee};

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: AsyncDbPool,
}

impl EmployeeRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates a new employee.
    pub async fn create(&self, new_employee: NewEmployee) -> AppResult<Employee> {
        use crate::schema::employees::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(employees)
            .values(&new_employee)
            .returning(Employee::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds an employee by id.
    pub async fn find_by_id(&self, employee_id: i64) -> AppResult<Option<Employee>> {
        use crate::schema::employees::dsl::*;
        let mut conn = self.pool.get().await?;

        employees
            .filter(id.eq(employee_id))
            .select(Employee::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists all employees.
    pub async fn list_all(&self) -> AppResult<Vec<Employee>> {
        use crate::schema::employees::dsl::*;
        let mut conn = self.pool.get().await?;

        employees
            .select(Employee::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists available employees ordered by rating, best first.
    pub async fn list_available_by_rating(&self) -> AppResult<Vec<Employee>> {
        use crate::schema::employees::dsl::*;
        let mut conn = self.pool.get().await?;

        employees
            .filter(available.eq(true))
            .order(rating.desc())
            .select(Employee::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists employees with the given role (exact match).
    pub async fn find_by_role(&self, employee_role: &str) -> AppResult<Vec<Employee>> {
        use crate::schema::employees::dsl::*;
        let mut conn = self.pool.get().await?;

        employees
            .filter(role.eq(employee_role))
            .select(Employee::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Overwrites an employee's fields. Returns `None` when absent.
    pub async fn update(
        &self,
        employee_id: i64,
        update_data: UpdateEmployee,
    ) -> AppResult<Option<Employee>> {
        use crate::schema::employees::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(employees.filter(id.eq(employee_id)))
            .set(&update_data)
            .returning(Employee::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Flips the availability flag, stamping `next_available` when the
    /// employee becomes available again. Returns `None` when absent.
    pub async fn set_availability(
        &self,
        employee_id: i64,
        is_available: bool,
        now: NaiveDateTime,
    ) -> AppResult<Option<Employee>> {
        use crate::schema::employees::dsl::*;
        let mut conn = self.pool.get().await?;

        if is_available {
            diesel::update(employees.filter(id.eq(employee_id)))
                .set((
                    available.eq(true),
                    next_available.eq(now),
                    updated_at.eq(now),
                ))
                .returning(Employee::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(AppError::from)
        } else {
            diesel::update(employees.filter(id.eq(employee_id)))
                .set((available.eq(false), updated_at.eq(now)))
                .returning(Employee::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(AppError::from)
        }
    }

    /// Deletes an employee, returning the number of affected rows.
    pub async fn delete(&self, employee_id: i64) -> AppResult<usize> {
        use crate::schema::employees::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(employees.filter(id.eq(employee_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}

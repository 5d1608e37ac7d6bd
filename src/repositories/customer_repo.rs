//! Customer repository for async database operations.
//!
//! Provides CRUD plus the search/sort/filter queries and the atomic
//! visit-statistics update for the customers table.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Customer, Gender, NewCustomer, UpdateCustomer};

/// Customer repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct CustomerRepository {
    pool: AsyncDbPool,
}

impl CustomerRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates a new customer.
    pub async fn create(&self, new_customer: NewCustomer) -> AppResult<Customer> {
        use crate::schema::customers::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(customers)
            .values(&new_customer)
            .returning(Customer::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds a customer by id.
    pub async fn find_by_id(&self, customer_id: i64) -> AppResult<Option<Customer>> {
        use crate::schema::customers::dsl::*;
        let mut conn = self.pool.get().await?;

        customers
            .filter(id.eq(customer_id))
            .select(Customer::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Finds a customer by their exact phone number.
    pub async fn find_by_phone(&self, customer_phone: &str) -> AppResult<Option<Customer>> {
        use crate::schema::customers::dsl::*;
        let mut conn = self.pool.get().await?;

        customers
            .filter(phone.eq(customer_phone))
            .select(Customer::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists all customers.
    pub async fn list_all(&self) -> AppResult<Vec<Customer>> {
        use crate::schema::customers::dsl::*;
        let mut conn = self.pool.get().await?;

        customers
            .select(Customer::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Case-insensitive substring search across name, phone and email.
    pub async fn search(&self, term: &str) -> AppResult<Vec<Customer>> {
        use crate::schema::customers::dsl::*;
        let mut conn = self.pool.get().await?;

        let pattern = format!("%{}%", term);
        customers
            .filter(
                name.ilike(pattern.clone())
                    .or(phone.ilike(pattern.clone()))
                    .or(email.ilike(pattern)),
            )
            .select(Customer::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists customers with the given gender.
    pub async fn find_by_gender(&self, customer_gender: Gender) -> AppResult<Vec<Customer>> {
        use crate::schema::customers::dsl::*;
        let mut conn = self.pool.get().await?;

        customers
            .filter(gender.eq(customer_gender))
            .select(Customer::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists all customers ordered by visit count, most visits first.
    pub async fn list_by_visit_count_desc(&self) -> AppResult<Vec<Customer>> {
        use crate::schema::customers::dsl::*;
        let mut conn = self.pool.get().await?;

        customers
            .order(visit_count.desc())
            .select(Customer::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists all customers ordered by lifetime spend, biggest first.
    pub async fn list_by_total_spent_desc(&self) -> AppResult<Vec<Customer>> {
        use crate::schema::customers::dsl::*;
        let mut conn = self.pool.get().await?;

        customers
            .order(total_spent.desc())
            .select(Customer::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists all customers ordered by most recent visit.
    pub async fn list_by_last_visit_desc(&self) -> AppResult<Vec<Customer>> {
        use crate::schema::customers::dsl::*;
        let mut conn = self.pool.get().await?;

        customers
            .order(last_visit.desc())
            .select(Customer::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Overwrites a customer's profile fields.
    ///
    /// Returns `None` when the id does not exist.
    pub async fn update(
        &self,
        customer_id: i64,
        update_data: UpdateCustomer,
    ) -> AppResult<Option<Customer>> {
        use crate::schema::customers::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(customers.filter(id.eq(customer_id)))
            .set(&update_data)
            .returning(Customer::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Applies the appointment-completion side effect in a single
    /// statement: visit_count + 1, total_spent + amount, last_visit = now.
    ///
    /// Returns `None` when the id does not exist.
    pub async fn apply_completion(
        &self,
        customer_id: i64,
        amount: f64,
        now: NaiveDateTime,
    ) -> AppResult<Option<Customer>> {
        use crate::schema::customers::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(customers.filter(id.eq(customer_id)))
            .set((
                visit_count.eq(visit_count + 1),
                total_spent.eq(total_spent + amount),
                last_visit.eq(now),
                updated_at.eq(now),
            ))
            .returning(Customer::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Deletes a customer, returning the number of affected rows.
    pub async fn delete(&self, customer_id: i64) -> AppResult<usize> {
        use crate::schema::customers::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(customers.filter(id.eq(customer_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}

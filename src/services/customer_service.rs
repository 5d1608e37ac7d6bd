//! Customer business logic.

use chrono::Utc;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{Customer, Gender, NewCustomer, UpdateCustomer};
use crate::repositories::CustomerRepository;

/// Sort orders supported by the customer listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerSort {
    Visits,
    Spent,
    LastVisit,
}

/// Customer service wrapping the repository with business-level
/// operations, including the appointment-completion stat update.
#[derive(Clone)]
pub struct CustomerService {
    repo: CustomerRepository,
}

impl CustomerService {
    pub fn new(repo: CustomerRepository) -> Self {
        Self { repo }
    }

    /// Creates a new customer. A duplicate phone number surfaces as
    /// `Duplicate` from the unique constraint.
    pub async fn create_customer(&self, new_customer: NewCustomer) -> AppResult<Customer> {
        let customer = self.repo.create(new_customer).await?;
        info!(customer_id = customer.id, "Customer created");
        Ok(customer)
    }

    /// Gets a customer by id, or `NotFound`.
    pub async fn get_customer(&self, id: i64) -> AppResult<Customer> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("customer", id))
    }

    /// Looks up a customer by exact phone number.
    pub async fn get_customer_by_phone(&self, phone: &str) -> AppResult<Customer> {
        self.repo
            .find_by_phone(phone)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "customer".to_string(),
                field: "phone".to_string(),
                value: phone.to_string(),
            })
    }

    /// Lists all customers.
    pub async fn list_customers(&self) -> AppResult<Vec<Customer>> {
        self.repo.list_all().await
    }

    /// Case-insensitive substring search across name, phone and email.
    pub async fn search_customers(&self, term: &str) -> AppResult<Vec<Customer>> {
        self.repo.search(term).await
    }

    /// Lists customers of the given gender.
    pub async fn list_customers_by_gender(&self, gender: Gender) -> AppResult<Vec<Customer>> {
        self.repo.find_by_gender(gender).await
    }

    /// Lists customers in the requested sort order.
    pub async fn list_customers_sorted(&self, sort: CustomerSort) -> AppResult<Vec<Customer>> {
        match sort {
            CustomerSort::Visits => self.repo.list_by_visit_count_desc().await,
            CustomerSort::Spent => self.repo.list_by_total_spent_desc().await,
            CustomerSort::LastVisit => self.repo.list_by_last_visit_desc().await,
        }
    }

    /// Overwrites a customer's profile, or `NotFound`.
    pub async fn update_customer(
        &self,
        id: i64,
        update_data: UpdateCustomer,
    ) -> AppResult<Customer> {
        self.repo
            .update(id, update_data)
            .await?
            .ok_or_else(|| AppError::not_found("customer", id))
    }

    /// Deletes a customer, or `NotFound`.
    pub async fn delete_customer(&self, id: i64) -> AppResult<()> {
        let affected = self.repo.delete(id).await?;
        if affected == 0 {
            return Err(AppError::not_found("customer", id));
        }
        info!(customer_id = id, "Customer deleted");
        Ok(())
    }

    /// Credits a completed appointment to the customer: one more visit,
    /// `amount` added to lifetime spend, last visit stamped now.
    ///
    /// The caller (appointment lifecycle) guarantees this runs at most
    /// once per appointment completion.
    pub async fn apply_completion(&self, customer_id: i64, amount: f64) -> AppResult<Customer> {
        let now = Utc::now().naive_utc();
        let customer = self
            .repo
            .apply_completion(customer_id, amount, now)
            .await?
            .ok_or_else(|| AppError::not_found("customer", customer_id))?;
        info!(
            customer_id,
            amount,
            visit_count = customer.visit_count,
            total_spent = customer.total_spent,
            "Customer stats credited for completed appointment"
        );
        Ok(customer)
    }
}

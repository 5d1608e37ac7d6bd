//! Tally ledger business logic: payment status transitions and daily
//! revenue aggregation.

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{NewTallyRecord, PaymentMethod, PaymentStatus, TallyRecord, UpdateTallyRecord};
use crate::repositories::TallyRepository;

#[derive(Clone)]
pub struct TallyService {
    repo: TallyRepository,
}

impl TallyService {
    pub fn new(repo: TallyRepository) -> Self {
        Self { repo }
    }

    pub async fn create_record(&self, new_record: NewTallyRecord) -> AppResult<TallyRecord> {
        let record = self.repo.create(new_record).await?;
        info!(record_id = record.id, "Tally record created");
        Ok(record)
    }

    pub async fn get_record(&self, id: i64) -> AppResult<TallyRecord> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("tally record", id))
    }

    pub async fn list_records(&self) -> AppResult<Vec<TallyRecord>> {
        self.repo.list_all().await
    }

    pub async fn list_by_date(&self, date: NaiveDate) -> AppResult<Vec<TallyRecord>> {
        self.repo.find_by_date(date).await
    }

    pub async fn list_by_status(&self, status: PaymentStatus) -> AppResult<Vec<TallyRecord>> {
        self.repo.find_by_status(status).await
    }

    pub async fn list_by_method(&self, method: PaymentMethod) -> AppResult<Vec<TallyRecord>> {
        self.repo.find_by_method(method).await
    }

    pub async fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<TallyRecord>> {
        self.repo.find_by_date_range(start, end).await
    }

    pub async fn update_record(
        &self,
        id: i64,
        update_data: UpdateTallyRecord,
    ) -> AppResult<TallyRecord> {
        self.repo
            .update(id, update_data)
            .await?
            .ok_or_else(|| AppError::not_found("tally record", id))
    }

    /// Moves a record to a new payment status.
    ///
    /// A COMPLETED transition stamps `payment_date` to now; any other
    /// status leaves an existing payment date untouched. A supplied
    /// transaction id is stored regardless of payment method.
    pub async fn update_payment_status(
        &self,
        id: i64,
        new_status: PaymentStatus,
        upi_transaction_id: Option<String>,
    ) -> AppResult<TallyRecord> {
        let now = Utc::now().naive_utc();
        let payment_date = (new_status == PaymentStatus::Completed).then_some(now);

        let record = self
            .repo
            .set_payment_status(id, new_status, payment_date, upi_transaction_id, now)
            .await?
            .ok_or_else(|| AppError::not_found("tally record", id))?;
        info!(record_id = id, status = %new_status, "Payment status updated");
        Ok(record)
    }

    /// Total revenue for a calendar day: the sum of `total_cost` over
    /// COMPLETED records, 0.0 when there are none.
    pub async fn total_revenue(&self, date: NaiveDate) -> AppResult<f64> {
        let sum = self.repo.sum_completed_for_date(date).await?;
        Ok(sum.unwrap_or(0.0))
    }

    pub async fn delete_record(&self, id: i64) -> AppResult<()> {
        let affected = self.repo.delete(id).await?;
        if affected == 0 {
            return Err(AppError::not_found("tally record", id));
        }
        info!(record_id = id, "Tally record deleted");
        Ok(())
    }
}

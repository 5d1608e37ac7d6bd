//! Tally record repository for async database operations.
//!
//! The tally table is the denormalized payment ledger; besides CRUD it
//! answers the date/status/method filters and the daily revenue sum.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewTallyRecord, PaymentMethod, PaymentStatus, TallyRecord, UpdateTallyRecord};

#[derive(Clone)]
pub struct TallyRepository {
    pool: AsyncDbPool,
}

impl TallyRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates a new tally record.
    pub async fn create(&self, new_record: NewTallyRecord) -> AppResult<TallyRecord> {
        use crate::schema::tally_records::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(tally_records)
            .values(&new_record)
            .returning(TallyRecord::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds a tally record by id.
    pub async fn find_by_id(&self, record_id: i64) -> AppResult<Option<TallyRecord>> {
        use crate::schema::tally_records::dsl::*;
        let mut conn = self.pool.get().await?;

        tally_records
            .filter(id.eq(record_id))
            .select(TallyRecord::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists all tally records.
    pub async fn list_all(&self) -> AppResult<Vec<TallyRecord>> {
        use crate::schema::tally_records::dsl::*;
        let mut conn = self.pool.get().await?;

        tally_records
            .select(TallyRecord::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists records on the given calendar day.
    pub async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<TallyRecord>> {
        use crate::schema::tally_records::dsl::*;
        let mut conn = self.pool.get().await?;

        tally_records
            .filter(entry_date.eq(date))
            .select(TallyRecord::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists records with the given payment status.
    pub async fn find_by_status(&self, status: PaymentStatus) -> AppResult<Vec<TallyRecord>> {
        use crate::schema::tally_records::dsl::*;
        let mut conn = self.pool.get().await?;

        tally_records
            .filter(payment_status.eq(status))
            .select(TallyRecord::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists records paid with the given method.
    pub async fn find_by_method(&self, method: PaymentMethod) -> AppResult<Vec<TallyRecord>> {
        use crate::schema::tally_records::dsl::*;
        let mut conn = self.pool.get().await?;

        tally_records
            .filter(payment_method.eq(method))
            .select(TallyRecord::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists records with entry dates in `[start, end]` inclusive.
    pub async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<TallyRecord>> {
        use crate::schema::tally_records::dsl::*;
        let mut conn = self.pool.get().await?;

        tally_records
            .filter(entry_date.ge(start))
            .filter(entry_date.le(end))
            .select(TallyRecord::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Sums total_cost over COMPLETED records on the given day.
    ///
    /// Returns `None` when no rows match; the service maps that to 0.0.
    pub async fn sum_completed_for_date(&self, date: NaiveDate) -> AppResult<Option<f64>> {
        use crate::schema::tally_records::dsl::*;
        let mut conn = self.pool.get().await?;

        tally_records
            .filter(entry_date.eq(date))
            .filter(payment_status.eq(PaymentStatus::Completed))
            .select(diesel::dsl::sum(total_cost))
            .first(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Overwrites a tally record. Returns `None` when absent.
    pub async fn update(
        &self,
        record_id: i64,
        update_data: UpdateTallyRecord,
    ) -> AppResult<Option<TallyRecord>> {
        use crate::schema::tally_records::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(tally_records.filter(id.eq(record_id)))
            .set(&update_data)
            .returning(TallyRecord::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Applies a payment status change in one statement.
    ///
    /// `new_payment_date` is only `Some` on a COMPLETED transition; the
    /// transaction id is stored whenever supplied. Returns `None` when
    /// the id does not exist.
    pub async fn set_payment_status(
        &self,
        record_id: i64,
        new_status: PaymentStatus,
        new_payment_date: Option<NaiveDateTime>,
        transaction_id: Option<String>,
        now: NaiveDateTime,
    ) -> AppResult<Option<TallyRecord>> {
        use crate::schema::tally_records::dsl::*;
        let mut conn = self.pool.get().await?;

        // Build the statement so unset parts keep their stored values.
        match (new_payment_date, transaction_id) {
            (Some(paid_at), Some(txn)) => {
                diesel::update(tally_records.filter(id.eq(record_id)))
                    .set((
                        payment_status.eq(new_status),
                        payment_date.eq(paid_at),
                        upi_transaction_id.eq(txn),
                        updated_at.eq(now),
                    ))
                    .returning(TallyRecord::as_returning())
                    .get_result(&mut conn)
                    .await
                    .optional()
                    .map_err(AppError::from)
            }
            (Some(paid_at), None) => {
                diesel::update(tally_records.filter(id.eq(record_id)))
                    .set((
                        payment_status.eq(new_status),
                        payment_date.eq(paid_at),
                        updated_at.eq(now),
                    ))
                    .returning(TallyRecord::as_returning())
                    .get_result(&mut conn)
                    .await
                    .optional()
                    .map_err(AppError::from)
            }
            (None, Some(txn)) => {
                diesel::update(tally_records.filter(id.eq(record_id)))
                    .set((
                        payment_status.eq(new_status),
                        upi_transaction_id.eq(txn),
                        updated_at.eq(now),
                    ))
                    .returning(TallyRecord::as_returning())
                    .get_result(&mut conn)
                    .await
                    .optional()
                    .map_err(AppError::from)
            }
            (None, None) => {
                diesel::update(tally_records.filter(id.eq(record_id)))
                    .set((payment_status.eq(new_status), updated_at.eq(now)))
                    .returning(TallyRecord::as_returning())
                    .get_result(&mut conn)
                    .await
                    .optional()
                    .map_err(AppError::from)
            }
        }
    }

    /// Deletes a tally record, returning the number of affected rows.
    pub async fn delete(&self, record_id: i64) -> AppResult<usize> {
        use crate::schema::tally_records::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(tally_records.filter(id.eq(record_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}

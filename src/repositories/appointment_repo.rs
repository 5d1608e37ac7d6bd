//! Appointment repository for async database operations.
//!
//! Appointments own a join table (`appointment_services`) linking them to
//! the booked catalog entries; creation and full updates touch both
//! tables inside one transaction. The partial unique index on
//! (employee_id, appointment_date, appointment_time) surfaces concurrent
//! double bookings as `SlotConflict`.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    Appointment, AppointmentServiceRow, AppointmentStatus, NewAppointment, UpdateAppointment,
};

/// Name of the partial unique index guarding the booking slot.
const SLOT_INDEX: &str = "appointments_employee_slot_idx";

#[derive(Clone)]
pub struct AppointmentRepository {
    pool: AsyncDbPool,
}

impl AppointmentRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates an appointment together with its service join rows.
    ///
    /// Runs in a transaction; a unique violation on the slot index maps
    /// to `SlotConflict` so a concurrent double booking is rejected even
    /// though the caller's availability pre-check passed.
    pub async fn create(
        &self,
        new_appointment: NewAppointment,
        service_ids: &[i64],
    ) -> AppResult<Appointment> {
        let mut conn = self.pool.get().await?;

        let slot = (
            new_appointment.employee_id,
            new_appointment.appointment_date,
            new_appointment.appointment_time,
        );
        conn.transaction::<Appointment, AppError, _>(|conn| {
            async move {
                let appointment: Appointment =
                    diesel::insert_into(crate::schema::appointments::table)
                        .values(&new_appointment)
                        .returning(Appointment::as_returning())
                        .get_result(conn)
                        .await
                        .map_err(|e| Self::map_slot_conflict(e, slot))?;

                let rows: Vec<AppointmentServiceRow> = service_ids
                    .iter()
                    .map(|sid| AppointmentServiceRow {
                        appointment_id: appointment.id,
                        service_id: *sid,
                    })
                    .collect();
                if !rows.is_empty() {
                    diesel::insert_into(crate::schema::appointment_services::table)
                        .values(&rows)
                        .execute(conn)
                        .await?;
                }

                Ok(appointment)
            }
            .scope_boxed()
        })
        .await
    }

    /// Finds an appointment by id.
    pub async fn find_by_id(&self, appointment_id: i64) -> AppResult<Option<Appointment>> {
        use crate::schema::appointments::dsl::*;
        let mut conn = self.pool.get().await?;

        appointments
            .filter(id.eq(appointment_id))
            .select(Appointment::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Resolves the booked service ids for an appointment.
    pub async fn service_ids(&self, appointment: i64) -> AppResult<Vec<i64>> {
        use crate::schema::appointment_services::dsl::*;
        let mut conn = self.pool.get().await?;

        appointment_services
            .filter(appointment_id.eq(appointment))
            .select(service_id)
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Resolves booked service ids for a batch of appointments in one
    /// query, keyed by appointment id.
    pub async fn service_ids_for(
        &self,
        ids: &[i64],
    ) -> AppResult<HashMap<i64, Vec<i64>>> {
        use crate::schema::appointment_services::dsl::*;
        let mut conn = self.pool.get().await?;

        let rows: Vec<(i64, i64)> = appointment_services
            .filter(appointment_id.eq_any(ids))
            .select((appointment_id, service_id))
            .load(&mut conn)
            .await
            .map_err(AppError::from)?;

        let mut grouped: HashMap<i64, Vec<i64>> = HashMap::new();
        for (appt, svc) in rows {
            grouped.entry(appt).or_default().push(svc);
        }
        Ok(grouped)
    }

    /// Lists all appointments.
    pub async fn list_all(&self) -> AppResult<Vec<Appointment>> {
        use crate::schema::appointments::dsl::*;
        let mut conn = self.pool.get().await?;

        appointments
            .select(Appointment::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists appointments on the given date.
    pub async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<Appointment>> {
        use crate::schema::appointments::dsl::*;
        let mut conn = self.pool.get().await?;

        appointments
            .filter(appointment_date.eq(date))
            .select(Appointment::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists appointments for an employee on the given date.
    pub async fn find_by_employee_and_date(
        &self,
        employee: i64,
        date: NaiveDate,
    ) -> AppResult<Vec<Appointment>> {
        use crate::schema::appointments::dsl::*;
        let mut conn = self.pool.get().await?;

        appointments
            .filter(employee_id.eq(employee))
            .filter(appointment_date.eq(date))
            .select(Appointment::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists appointments with the given status.
    pub async fn find_by_status(
        &self,
        appointment_status: AppointmentStatus,
    ) -> AppResult<Vec<Appointment>> {
        use crate::schema::appointments::dsl::*;
        let mut conn = self.pool.get().await?;

        appointments
            .filter(status.eq(appointment_status))
            .select(Appointment::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists appointments with dates in `[start, end]` inclusive.
    pub async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<Appointment>> {
        use crate::schema::appointments::dsl::*;
        let mut conn = self.pool.get().await?;

        appointments
            .filter(appointment_date.ge(start))
            .filter(appointment_date.le(end))
            .select(Appointment::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Counts non-cancelled appointments occupying the exact slot.
    pub async fn count_conflicts(
        &self,
        employee: i64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> AppResult<i64> {
        use crate::schema::appointments::dsl::*;
        let mut conn = self.pool.get().await?;

        appointments
            .filter(employee_id.eq(employee))
            .filter(appointment_date.eq(date))
            .filter(appointment_time.eq(time))
            .filter(status.ne(AppointmentStatus::Cancelled))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Overwrites an appointment and replaces its service join rows.
    ///
    /// Returns `None` when the id does not exist. Moving the appointment
    /// onto an occupied slot maps to `SlotConflict` via the slot index.
    pub async fn update(
        &self,
        appointment_id: i64,
        update_data: UpdateAppointment,
        service_ids: &[i64],
    ) -> AppResult<Option<Appointment>> {
        let mut conn = self.pool.get().await?;

        let slot = (
            update_data.employee_id,
            update_data.appointment_date,
            update_data.appointment_time,
        );
        conn.transaction::<Option<Appointment>, AppError, _>(|conn| {
            async move {
                let updated: Option<Appointment> = {
                    use crate::schema::appointments::dsl::*;
                    diesel::update(appointments.filter(id.eq(appointment_id)))
                        .set(&update_data)
                        .returning(Appointment::as_returning())
                        .get_result(conn)
                        .await
                        .optional()
                        .map_err(|e| Self::map_slot_conflict(e, slot))?
                };

                let Some(appointment) = updated else {
                    return Ok(None);
                };

                {
                    use crate::schema::appointment_services as aps;
                    diesel::delete(aps::table.filter(aps::appointment_id.eq(appointment.id)))
                        .execute(conn)
                        .await?;
                }

                let rows: Vec<AppointmentServiceRow> = service_ids
                    .iter()
                    .map(|sid| AppointmentServiceRow {
                        appointment_id: appointment.id,
                        service_id: *sid,
                    })
                    .collect();
                if !rows.is_empty() {
                    diesel::insert_into(crate::schema::appointment_services::table)
                        .values(&rows)
                        .execute(conn)
                        .await?;
                }

                Ok(Some(appointment))
            }
            .scope_boxed()
        })
        .await
    }

    /// Sets the status field, refreshing `updated_at`.
    ///
    /// Returns `None` when the id does not exist.
    pub async fn set_status(
        &self,
        appointment_id: i64,
        new_status: AppointmentStatus,
        now: NaiveDateTime,
    ) -> AppResult<Option<Appointment>> {
        use crate::schema::appointments::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(appointments.filter(id.eq(appointment_id)))
            .set((status.eq(new_status), updated_at.eq(now)))
            .returning(Appointment::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Sets the status field only if the row currently holds
    /// `from_status`, in a single conditional UPDATE.
    ///
    /// Returns `None` when the id does not exist or the row is no longer
    /// in `from_status`; concurrent callers race on the row itself, so at
    /// most one of them gets the updated appointment back.
    pub async fn set_status_from(
        &self,
        appointment_id: i64,
        from_status: AppointmentStatus,
        new_status: AppointmentStatus,
        now: NaiveDateTime,
    ) -> AppResult<Option<Appointment>> {
        use crate::schema::appointments::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(
            appointments
                .filter(id.eq(appointment_id))
                .filter(status.eq(from_status)),
        )
        .set((status.eq(new_status), updated_at.eq(now)))
        .returning(Appointment::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(AppError::from)
    }

    /// Hard-deletes an appointment; join rows cascade.
    pub async fn delete(&self, appointment_id: i64) -> AppResult<usize> {
        use crate::schema::appointments::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(appointments.filter(id.eq(appointment_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }

    fn map_slot_conflict(
        error: DieselError,
        (employee_id, date, time): (i64, NaiveDate, NaiveTime),
    ) -> AppError {
        match &error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
                if info.constraint_name() == Some(SLOT_INDEX) =>
            {
                AppError::SlotConflict {
                    employee_id,
                    date,
                    time,
                }
            }
            _ => AppError::from(error),
        }
    }
}

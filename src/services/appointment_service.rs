//! Appointment scheduling and lifecycle logic.
//!
//! Owns the two rules with real business weight: the slot-availability
//! check (one non-cancelled booking per employee/date/time) and the
//! completion side effect that credits the customer's visit statistics.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{Appointment, AppointmentStatus, NewAppointment, UpdateAppointment};
use crate::repositories::{AppointmentRepository, EmployeeRepository};
use crate::services::CustomerService;

/// An appointment together with its resolved service ids.
///
/// Join resolution is explicit; nothing is lazily fetched.
#[derive(Debug, Clone)]
pub struct AppointmentDetails {
    pub appointment: Appointment,
    pub service_ids: Vec<i64>,
}

#[derive(Clone)]
pub struct AppointmentService {
    repo: AppointmentRepository,
    employees: EmployeeRepository,
    customers: CustomerService,
}

impl AppointmentService {
    pub fn new(
        repo: AppointmentRepository,
        employees: EmployeeRepository,
        customers: CustomerService,
    ) -> Self {
        Self {
            repo,
            employees,
            customers,
        }
    }

    /// Whether the (employee, date, time) slot is free of non-cancelled
    /// bookings.
    ///
    /// An unknown employee id fails with `NotFound` instead of reporting
    /// the slot as available.
    pub async fn is_slot_available(
        &self,
        employee_id: i64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> AppResult<bool> {
        self.employees
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| AppError::not_found("employee", employee_id))?;

        let conflicts = self.repo.count_conflicts(employee_id, date, time).await?;
        Ok(conflicts == 0)
    }

    /// Books an appointment.
    ///
    /// The availability pre-check gives a friendly error in the common
    /// case; the database's partial unique index is the authority when
    /// two requests race for the same slot.
    pub async fn create_appointment(
        &self,
        new_appointment: NewAppointment,
        service_ids: Vec<i64>,
    ) -> AppResult<AppointmentDetails> {
        let available = self
            .is_slot_available(
                new_appointment.employee_id,
                new_appointment.appointment_date,
                new_appointment.appointment_time,
            )
            .await?;
        if !available {
            return Err(AppError::SlotConflict {
                employee_id: new_appointment.employee_id,
                date: new_appointment.appointment_date,
                time: new_appointment.appointment_time,
            });
        }

        let appointment = self.repo.create(new_appointment, &service_ids).await?;
        info!(
            appointment_id = appointment.id,
            employee_id = appointment.employee_id,
            date = %appointment.appointment_date,
            time = %appointment.appointment_time,
            "Appointment booked"
        );
        Ok(AppointmentDetails {
            appointment,
            service_ids,
        })
    }

    /// Gets an appointment with its service ids, or `NotFound`.
    pub async fn get_appointment(&self, id: i64) -> AppResult<AppointmentDetails> {
        let appointment = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("appointment", id))?;
        let service_ids = self.repo.service_ids(id).await?;
        Ok(AppointmentDetails {
            appointment,
            service_ids,
        })
    }

    /// Lists all appointments.
    pub async fn list_appointments(&self) -> AppResult<Vec<AppointmentDetails>> {
        let appointments = self.repo.list_all().await?;
        self.attach_services(appointments).await
    }

    /// Lists appointments on the given date.
    pub async fn list_by_date(&self, date: NaiveDate) -> AppResult<Vec<AppointmentDetails>> {
        let appointments = self.repo.find_by_date(date).await?;
        self.attach_services(appointments).await
    }

    /// Lists an employee's appointments on the given date.
    ///
    /// Mirrors the lookup order of the original flow: resolve the
    /// employee first, then filter.
    pub async fn list_by_employee_and_date(
        &self,
        employee_id: i64,
        date: NaiveDate,
    ) -> AppResult<Vec<AppointmentDetails>> {
        self.employees
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| AppError::not_found("employee", employee_id))?;
        let appointments = self.repo.find_by_employee_and_date(employee_id, date).await?;
        self.attach_services(appointments).await
    }

    /// Lists appointments with the given status.
    pub async fn list_by_status(
        &self,
        status: AppointmentStatus,
    ) -> AppResult<Vec<AppointmentDetails>> {
        let appointments = self.repo.find_by_status(status).await?;
        self.attach_services(appointments).await
    }

    /// Lists appointments with dates in `[start, end]` inclusive.
    pub async fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<AppointmentDetails>> {
        let appointments = self.repo.find_by_date_range(start, end).await?;
        self.attach_services(appointments).await
    }

    /// Overwrites an appointment and its service set, or `NotFound`.
    pub async fn update_appointment(
        &self,
        id: i64,
        update_data: UpdateAppointment,
        service_ids: Vec<i64>,
    ) -> AppResult<AppointmentDetails> {
        let appointment = self
            .repo
            .update(id, update_data, &service_ids)
            .await?
            .ok_or_else(|| AppError::not_found("appointment", id))?;
        Ok(AppointmentDetails {
            appointment,
            service_ids,
        })
    }

    /// Transitions an appointment's status.
    ///
    /// A SCHEDULED -> COMPLETED transition credits the customer's visit
    /// statistics exactly once; completing an already-completed
    /// appointment fails with `AlreadyCompleted` rather than
    /// double-counting. Other transitions pass through unchanged.
    pub async fn update_status(
        &self,
        id: i64,
        new_status: AppointmentStatus,
    ) -> AppResult<AppointmentDetails> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("appointment", id))?;

        let now = Utc::now().naive_utc();
        let appointment = if new_status == AppointmentStatus::Completed {
            self.complete(&existing, now).await?
        } else {
            self.repo
                .set_status(id, new_status, now)
                .await?
                .ok_or_else(|| AppError::not_found("appointment", id))?
        };

        info!(
            appointment_id = id,
            from = %existing.status,
            to = %new_status,
            "Appointment status updated"
        );

        let service_ids = self.repo.service_ids(id).await?;
        Ok(AppointmentDetails {
            appointment,
            service_ids,
        })
    }

    /// Completes an appointment, crediting the customer exactly once.
    ///
    /// The SCHEDULED -> COMPLETED flip is a single conditional UPDATE
    /// keyed on the current status, so when two completion requests race
    /// only the one that wins the row applies the side effect; the loser
    /// re-reads and is rejected like any other repeat completion.
    async fn complete(
        &self,
        existing: &Appointment,
        now: NaiveDateTime,
    ) -> AppResult<Appointment> {
        if existing.status.completion_applies(AppointmentStatus::Completed) {
            if let Some(appointment) = self
                .repo
                .set_status_from(
                    existing.id,
                    AppointmentStatus::Scheduled,
                    AppointmentStatus::Completed,
                    now,
                )
                .await?
            {
                self.customers
                    .apply_completion(appointment.customer_id, appointment.total)
                    .await?;
                return Ok(appointment);
            }
            // Lost the race: someone else changed the status first.
        }

        let current = self
            .repo
            .find_by_id(existing.id)
            .await?
            .ok_or_else(|| AppError::not_found("appointment", existing.id))?;
        if current.status == AppointmentStatus::Completed {
            warn!(appointment_id = existing.id, "Rejected duplicate completion");
            return Err(AppError::AlreadyCompleted {
                appointment_id: existing.id,
            });
        }

        // CANCELLED -> COMPLETED changes the status but credits nothing.
        self.repo
            .set_status(existing.id, AppointmentStatus::Completed, now)
            .await?
            .ok_or_else(|| AppError::not_found("appointment", existing.id))
    }

    /// Hard-deletes an appointment. Customer statistics credited by an
    /// earlier completion are not rolled back.
    pub async fn delete_appointment(&self, id: i64) -> AppResult<()> {
        let affected = self.repo.delete(id).await?;
        if affected == 0 {
            return Err(AppError::not_found("appointment", id));
        }
        info!(appointment_id = id, "Appointment deleted");
        Ok(())
    }

    /// Batch-resolves service ids so list endpoints avoid a query per
    /// appointment.
    async fn attach_services(
        &self,
        appointments: Vec<Appointment>,
    ) -> AppResult<Vec<AppointmentDetails>> {
        let ids: Vec<i64> = appointments.iter().map(|a| a.id).collect();
        let mut grouped = self.repo.service_ids_for(&ids).await?;
        Ok(appointments
            .into_iter()
            .map(|appointment| {
                let service_ids = grouped.remove(&appointment.id).unwrap_or_default();
                AppointmentDetails {
                    appointment,
                    service_ids,
                }
            })
            .collect())
    }
}

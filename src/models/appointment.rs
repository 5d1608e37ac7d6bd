//! Appointment models and status transitions.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};

/// Appointment booking status.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "SCHEDULED",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
        }
    }

    /// Whether moving from `self` to `new` triggers the customer stat
    /// update. Only a genuine SCHEDULED -> COMPLETED transition counts,
    /// so re-completing an appointment can never double-credit.
    pub fn completion_applies(self, new: AppointmentStatus) -> bool {
        self == AppointmentStatus::Scheduled && new == AppointmentStatus::Completed
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SCHEDULED" => Ok(AppointmentStatus::Scheduled),
            "COMPLETED" => Ok(AppointmentStatus::Completed),
            "CANCELLED" => Ok(AppointmentStatus::Cancelled),
            other => Err(format!("Unrecognized appointment status: {}", other)),
        }
    }
}

impl diesel::query_builder::QueryId for AppointmentStatus {
    type QueryId = AppointmentStatus;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for AppointmentStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for AppointmentStatus {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        AppointmentStatus::from_str(&s).map_err(Into::into)
    }
}

/// Appointment model for reading from the database.
///
/// The booked services are kept in a join table and resolved explicitly
/// by the repository; they are not part of this row type.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::appointments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Appointment {
    pub id: i64,
    pub customer_id: i64,
    pub employee_id: i64,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: AppointmentStatus,
    pub total: f64,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// NewAppointment model for inserting new records.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::appointments)]
pub struct NewAppointment {
    pub customer_id: i64,
    pub employee_id: i64,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: AppointmentStatus,
    pub total: f64,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Full-overwrite changeset for appointment updates.
#[derive(Debug, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::appointments, treat_none_as_null = true)]
pub struct UpdateAppointment {
    pub customer_id: i64,
    pub employee_id: i64,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: AppointmentStatus,
    pub total: f64,
    pub notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

/// Join row linking an appointment to a booked service.
#[derive(Debug, Insertable, Queryable, Clone)]
#[diesel(table_name = crate::schema::appointment_services)]
pub struct AppointmentServiceRow {
    pub appointment_id: i64,
    pub service_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_case_insensitively() {
        assert_eq!(
            AppointmentStatus::from_str("scheduled").unwrap(),
            AppointmentStatus::Scheduled
        );
        assert_eq!(
            AppointmentStatus::from_str("Completed").unwrap(),
            AppointmentStatus::Completed
        );
        assert!(AppointmentStatus::from_str("done").is_err());
    }

    #[test]
    fn test_completion_applies_only_from_scheduled() {
        use AppointmentStatus::*;
        assert!(Scheduled.completion_applies(Completed));
        assert!(!Completed.completion_applies(Completed));
        assert!(!Cancelled.completion_applies(Completed));
        assert!(!Scheduled.completion_applies(Cancelled));
        assert!(!Scheduled.completion_applies(Scheduled));
    }

    #[test]
    fn test_completion_credit_gate_matches_flip_precondition() {
        use AppointmentStatus::*;
        // The customer credit rides on the conditional SCHEDULED ->
        // COMPLETED flip; the gate must agree with that precondition so
        // a repeat completion can never credit twice.
        for status in [Scheduled, Completed, Cancelled] {
            assert_eq!(status.completion_applies(Completed), status == Scheduled);
        }
    }

    #[test]
    fn test_status_wire_form_round_trip() {
        for status in [
            AppointmentStatus::Scheduled,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let back: AppointmentStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }
}

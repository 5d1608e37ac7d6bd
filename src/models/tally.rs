//! Tally record models for the denormalized payment ledger.

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
use serde_json::Value as JsonValue;

/// How a tally record was paid.
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
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Card => "CARD",
            PaymentMethod::Upi => "UPI",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CASH" => Ok(PaymentMethod::Cash),
            "CARD" => Ok(PaymentMethod::Card),
            "UPI" => Ok(PaymentMethod::Upi),
            other => Err(format!("Unrecognized payment method: {}", other)),
        }
    }
}

impl diesel::query_builder::QueryId for PaymentMethod {
    type QueryId = PaymentMethod;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for PaymentMethod {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for PaymentMethod {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        PaymentMethod::from_str(&s).map_err(Into::into)
    }
}

/// Settlement state of a tally record.
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
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Completed => "COMPLETED",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(PaymentStatus::Pending),
            "COMPLETED" => Ok(PaymentStatus::Completed),
            "FAILED" => Ok(PaymentStatus::Failed),
            "CANCELLED" => Ok(PaymentStatus::Cancelled),
            other => Err(format!("Unrecognized payment status: {}", other)),
        }
    }
}

impl diesel::query_builder::QueryId for PaymentStatus {
    type QueryId = PaymentStatus;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for PaymentStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for PaymentStatus {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        PaymentStatus::from_str(&s).map_err(Into::into)
    }
}

/// Tally record for reading from the database.
///
/// Denormalized payment facts with no foreign keys; `services` holds a
/// JSON snapshot of what was billed.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::tally_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TallyRecord {
    pub id: i64,
    pub entry_date: NaiveDate,
    pub entry_time: NaiveTime,
    pub customer_name: String,
    pub customer_phone: String,
    pub staff_name: String,
    pub services: JsonValue,
    pub total_cost: f64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub payment_date: Option<NaiveDateTime>,
    pub upi_transaction_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// NewTallyRecord model for inserting new records.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::tally_records)]
pub struct NewTallyRecord {
    pub entry_date: NaiveDate,
    pub entry_time: NaiveTime,
    pub customer_name: String,
    pub customer_phone: String,
    pub staff_name: String,
    pub services: JsonValue,
    pub total_cost: f64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub payment_date: Option<NaiveDateTime>,
    pub upi_transaction_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Full-overwrite changeset for tally record updates.
#[derive(Debug, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::tally_records, treat_none_as_null = true)]
pub struct UpdateTallyRecord {
    pub entry_date: NaiveDate,
    pub entry_time: NaiveTime,
    pub customer_name: String,
    pub customer_phone: String,
    pub staff_name: String,
    pub services: JsonValue,
    pub total_cost: f64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub payment_date: Option<NaiveDateTime>,
    pub upi_transaction_id: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_parses_case_insensitively() {
        assert_eq!(PaymentMethod::from_str("upi").unwrap(), PaymentMethod::Upi);
        assert_eq!(PaymentMethod::from_str("Cash").unwrap(), PaymentMethod::Cash);
        assert!(PaymentMethod::from_str("cheque").is_err());
    }

    #[test]
    fn test_payment_status_wire_form() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Completed).unwrap(),
            "\"COMPLETED\""
        );
        let parsed: PaymentStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(parsed, PaymentStatus::Pending);
    }
}

//! Customer models for database operations.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};

/// Customer gender.
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
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    /// Parses case-insensitively, matching query-string usage.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MALE" => Ok(Gender::Male),
            "FEMALE" => Ok(Gender::Female),
            other => Err(format!("Unrecognized gender: {}", other)),
        }
    }
}

impl diesel::query_builder::QueryId for Gender {
    type QueryId = Gender;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for Gender {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for Gender {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        Gender::from_str(&s).map_err(Into::into)
    }
}

/// Customer model for reading from the database.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub gender: Gender,
    pub visit_count: i32,
    pub total_spent: f64,
    pub last_visit: Option<NaiveDateTime>,
    pub preferred_services: Vec<String>,
    pub notes: Option<String>,
    pub photo: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// NewCustomer model for inserting new records.
///
/// Timestamps are stamped explicitly by the service layer before insert.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::customers)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub gender: Gender,
    pub preferred_services: Vec<String>,
    pub notes: Option<String>,
    pub photo: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Full-overwrite changeset for customer updates.
///
/// Visit statistics are not part of the changeset; they only move through
/// the atomic completion update in the repository.
#[derive(Debug, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::customers, treat_none_as_null = true)]
pub struct UpdateCustomer {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub gender: Gender,
    pub preferred_services: Vec<String>,
    pub notes: Option<String>,
    pub photo: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parses_case_insensitively() {
        assert_eq!(Gender::from_str("male").unwrap(), Gender::Male);
        assert_eq!(Gender::from_str("FEMALE").unwrap(), Gender::Female);
        assert!(Gender::from_str("other").is_err());
    }

    #[test]
    fn test_gender_serde_wire_form() {
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"MALE\"");
        let parsed: Gender = serde_json::from_str("\"FEMALE\"").unwrap();
        assert_eq!(parsed, Gender::Female);
    }
}

//! Employee models for database operations.

use chrono::{NaiveDateTime, NaiveTime};
use diesel::prelude::*;

/// Employee model for reading from the database.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo: Option<String>,
    pub available: bool,
    pub specialties: Vec<String>,
    pub rating: f64,
    pub next_available: Option<NaiveDateTime>,
    pub work_start_time: Option<NaiveTime>,
    pub work_end_time: Option<NaiveTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// NewEmployee model for inserting new records.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::employees)]
pub struct NewEmployee {
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo: Option<String>,
    pub available: bool,
    pub specialties: Vec<String>,
    pub rating: f64,
    pub work_start_time: Option<NaiveTime>,
    pub work_end_time: Option<NaiveTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Full-overwrite changeset for employee updates.
#[derive(Debug, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::employees, treat_none_as_null = true)]
pub struct UpdateEmployee {
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo: Option<String>,
    pub available: bool,
    pub specialties: Vec<String>,
    pub rating: f64,
    pub work_start_time: Option<NaiveTime>,
    pub work_end_time: Option<NaiveTime>,
    pub updated_at: NaiveDateTime,
}

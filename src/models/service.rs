//! Salon service (catalog entry) models for database operations.

use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Service model for reading from the database.
///
/// A service is a bookable catalog entry (haircut, manicure, ...), not to
/// be confused with the business-logic layer in `crate::services`.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub duration_minutes: i32,
    pub price: f64,
    pub category: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// NewService model for inserting new records.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::services)]
pub struct NewService {
    pub name: String,
    pub duration_minutes: i32,
    pub price: f64,
    pub category: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Full-overwrite changeset for service updates.
#[derive(Debug, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::services, treat_none_as_null = true)]
pub struct UpdateService {
    pub name: String,
    pub duration_minutes: i32,
    pub price: f64,
    pub category: String,
    pub description: Option<String>,
    pub updated_at: NaiveDateTime,
}

//! HTTP request handlers organized by domain.

pub mod appointments;
pub mod customers;
pub mod employees;
pub mod health;
pub mod services;
pub mod tally;

//! Utility modules shared across the application.

pub mod validate;

pub use validate::ValidatedJson;

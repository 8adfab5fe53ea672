//! Per-entity SQL repositories. All functions take a borrowed
//! [`rusqlite::Connection`] so callers can run them inside a transaction.

pub mod appointment;
pub mod client;
pub mod employee;
pub mod sale;
pub mod service;

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use super::DatabaseError;

// IDs, dates and times are stored as TEXT; parse failures mean the row
// was written outside the application and surface as constraint errors.

pub(crate) fn parse_uuid(s: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(s).map_err(|e| DatabaseError::ConstraintViolation(format!("bad uuid '{s}': {e}")))
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| DatabaseError::ConstraintViolation(format!("bad date '{s}': {e}")))
}

pub(crate) fn parse_time(s: &str) -> Result<NaiveTime, DatabaseError> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| DatabaseError::ConstraintViolation(format!("bad time '{s}': {e}")))
}

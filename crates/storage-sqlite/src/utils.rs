//! Column conversion helpers.
//!
//! Currency amounts are stored as TEXT so that no precision is lost between
//! `Decimal` and SQLite. Instants are stored as naive UTC timestamps.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::errors::StorageError;

pub fn parse_decimal(value: &str, field: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(value)
        .map_err(|e| StorageError::CorruptValue(format!("{field} '{value}': {e}")))
}

pub fn parse_optional_decimal(
    value: Option<&str>,
    field: &str,
) -> Result<Option<Decimal>, StorageError> {
    value.map(|v| parse_decimal(v, field)).transpose()
}

pub fn to_utc(value: NaiveDateTime) -> DateTime<Utc> {
    value.and_utc()
}

use chrono::{DateTime, Utc};

use crate::error::DerivationError;

pub(crate) fn utc_datetime(timestamp: i64) -> Result<DateTime<Utc>, DerivationError> {
    DateTime::from_timestamp(timestamp, 0).ok_or(DerivationError::Timestamp(timestamp))
}

/// `timestamp` moved by `utc_offset_secs`, still carried as a UTC value.
pub(crate) fn shifted_datetime(
    timestamp: i64,
    utc_offset_secs: i64,
) -> Result<DateTime<Utc>, DerivationError> {
    let shifted = timestamp
        .checked_add(utc_offset_secs)
        .ok_or(DerivationError::Timestamp(timestamp))?;
    utc_datetime(shifted).map_err(|_| DerivationError::Timestamp(timestamp))
}

/// `HH:MM` of an epoch-seconds timestamp, read in UTC.
pub fn format_utc_hm(timestamp: i64) -> Result<String, DerivationError> {
    Ok(utc_datetime(timestamp)?.format("%H:%M").to_string())
}

/// Wall-clock time at the location, parenthesised to set it apart from UTC.
pub fn format_local_hm(timestamp: i64, utc_offset_secs: i64) -> Result<String, DerivationError> {
    let local = shifted_datetime(timestamp, utc_offset_secs)?;
    Ok(format!("({})", local.format("%H:%M")))
}

/// Whole hours, truncated toward zero: 19800 s (India) renders as `5H`.
pub fn format_offset_hours(utc_offset_secs: i64) -> String {
    format!("{}H", utc_offset_secs / 3600)
}

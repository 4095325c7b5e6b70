//! Field validation utilities for vessel CSV records
//!
//! This module provides helper functions for validating and converting the
//! individual fields of a position report line. Every optional field treats
//! empty input as valid absence; a present field that fails its rule produces
//! a descriptive error instead of a panic.

use crate::constants::POSITION_TIMESTAMP_FORMAT;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Validate a fixed-length numeric code and convert it to a number
///
/// Empty input is valid and yields `None`. Non-empty input must be exactly
/// `digits` characters long and fully numeric.
pub fn parse_fixed_digits(value: &str, digits: usize, field_name: &str) -> Result<Option<u64>> {
    if value.is_empty() {
        return Ok(None);
    }

    if value.len() != digits {
        return Err(Error::field_format(format!(
            "{} does not have the correct number of characters. Found: {} but expected: {}",
            field_name,
            value.len(),
            digits
        )));
    }

    value.parse::<u64>().map(Some).map_err(|_| {
        Error::field_format(format!(
            "Unable to construct numeric value for field: {} with value: {}",
            field_name, value
        ))
    })
}

/// Validate a decimal field against inclusive bounds
///
/// Empty input is valid and yields `None`.
pub fn parse_bounded_decimal(
    value: &str,
    lower_bound: f64,
    upper_bound: f64,
    field_name: &str,
) -> Result<Option<f64>> {
    if value.is_empty() {
        return Ok(None);
    }

    let parsed = value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            Error::field_format(format!(
                "{} value of {} could not be parsed as numeric",
                field_name, value
            ))
        })?;

    if parsed < lower_bound || parsed > upper_bound {
        return Err(Error::field_format(format!(
            "{} value of {} is not correct. Appropriate bounds: [{},{}]",
            field_name, value, lower_bound, upper_bound
        )));
    }

    Ok(Some(parsed))
}

/// Require that latitude and longitude are either both present or both absent
pub fn check_coordinate_pairing(latitude: &str, longitude: &str) -> Result<()> {
    if latitude.is_empty() != longitude.is_empty() {
        return Err(Error::field_format(
            "Both latitude and longitude must be provided or both must be omitted",
        ));
    }
    Ok(())
}

/// Require a position timestamp when both coordinates are present
pub fn check_timestamp_with_position(
    latitude: &str,
    longitude: &str,
    position_timestamp: &str,
) -> Result<()> {
    if !latitude.is_empty() && !longitude.is_empty() && position_timestamp.is_empty() {
        return Err(Error::field_format(
            "Position timestamp is missing while latitude and longitude are provided",
        ));
    }
    Ok(())
}

/// Parse a position timestamp in the legacy `yyyy-MM-dd HH:mm:ss` format
///
/// The wall-clock value is taken as UTC with seconds precision; no sub-second
/// component is retained.
pub fn parse_position_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value, POSITION_TIMESTAMP_FORMAT).map_err(|e| {
        Error::datetime_parsing(
            format!("Unable to calculate time object from given string: {}", value),
            e,
        )
    })?;

    Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
}

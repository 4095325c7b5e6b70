//! Tests for field-level validation rules

use chrono::{TimeZone, Utc};

use crate::app::services::csv_translator::field_parsers::{
    check_coordinate_pairing, check_timestamp_with_position, parse_bounded_decimal,
    parse_fixed_digits, parse_position_timestamp,
};

#[test]
fn test_fixed_digits_accepts_valid_codes() {
    assert_eq!(
        parse_fixed_digits("7710525", 7, "IMO_number").unwrap(),
        Some(7710525)
    );
    assert_eq!(
        parse_fixed_digits("232000000", 9, "MMSI").unwrap(),
        Some(232000000)
    );
    // Leading zeros keep the full width
    assert_eq!(
        parse_fixed_digits("0012345", 7, "IMO_number").unwrap(),
        Some(12345)
    );
}

#[test]
fn test_fixed_digits_empty_is_absent() {
    assert_eq!(parse_fixed_digits("", 7, "IMO_number").unwrap(), None);
}

#[test]
fn test_fixed_digits_wrong_length_names_found_and_expected() {
    let error = parse_fixed_digits("123456", 7, "IMO_number").unwrap_err();
    let message = error.to_string();
    assert!(message.contains("IMO_number"));
    assert!(message.contains("Found: 6"));
    assert!(message.contains("expected: 7"));

    let error = parse_fixed_digits("12345678", 7, "IMO_number").unwrap_err();
    assert!(error.to_string().contains("Found: 8"));
}

#[test]
fn test_fixed_digits_non_numeric_names_value() {
    let error = parse_fixed_digits("77A0525", 7, "IMO_number").unwrap_err();
    let message = error.to_string();
    assert!(message.contains("IMO_number"));
    assert!(message.contains("77A0525"));
}

#[test]
fn test_bounded_decimal_accepts_in_range() {
    assert_eq!(
        parse_bounded_decimal("34.438333", -90.0, 90.0, "Latitude").unwrap(),
        Some(34.438333)
    );
    // Bounds are inclusive
    assert_eq!(
        parse_bounded_decimal("-90", -90.0, 90.0, "Latitude").unwrap(),
        Some(-90.0)
    );
    assert_eq!(
        parse_bounded_decimal("90", -90.0, 90.0, "Latitude").unwrap(),
        Some(90.0)
    );
}

#[test]
fn test_bounded_decimal_empty_is_absent() {
    assert_eq!(
        parse_bounded_decimal("", -90.0, 90.0, "Latitude").unwrap(),
        None
    );
}

#[test]
fn test_bounded_decimal_out_of_range_names_bounds() {
    let error = parse_bounded_decimal("95.0", -90.0, 90.0, "Latitude").unwrap_err();
    let message = error.to_string();
    assert!(message.contains("Latitude"));
    assert!(message.contains("95.0"));
    assert!(message.contains("[-90,90]"));

    assert!(parse_bounded_decimal("-180.1", -180.0, 180.0, "Longitude").is_err());
}

#[test]
fn test_bounded_decimal_rejects_non_numeric() {
    let error = parse_bounded_decimal("east", -180.0, 180.0, "Longitude").unwrap_err();
    let message = error.to_string();
    assert!(message.contains("Longitude"));
    assert!(message.contains("east"));

    // NaN parses as f64 but is not a usable coordinate
    assert!(parse_bounded_decimal("NaN", -90.0, 90.0, "Latitude").is_err());
}

#[test]
fn test_coordinate_pairing() {
    // Both present or both absent never fails
    assert!(check_coordinate_pairing("34.4", "22.2").is_ok());
    assert!(check_coordinate_pairing("", "").is_ok());

    // Exactly one present always fails with the fixed message
    let error = check_coordinate_pairing("34.4", "").unwrap_err();
    assert!(
        error
            .to_string()
            .contains("Both latitude and longitude must be provided")
    );
    assert!(check_coordinate_pairing("", "22.2").is_err());
}

#[test]
fn test_timestamp_required_with_position() {
    // Both coordinates present, timestamp blank
    let error = check_timestamp_with_position("34.4", "22.2", "").unwrap_err();
    assert!(error.to_string().contains("Position timestamp is missing"));

    // Timestamp present
    assert!(check_timestamp_with_position("34.4", "22.2", "2023-09-27 05:42:44").is_ok());

    // No coordinates, no timestamp required
    assert!(check_timestamp_with_position("", "", "").is_ok());
    assert!(check_timestamp_with_position("34.4", "", "").is_ok());
}

#[test]
fn test_position_timestamp_parsing() {
    let parsed = parse_position_timestamp("2023-09-27 05:42:44").unwrap();
    assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 9, 27, 5, 42, 44).unwrap());

    assert!(parse_position_timestamp("2023-09-27T05:42:44").is_err());
    assert!(parse_position_timestamp("not a date").is_err());
    assert!(parse_position_timestamp("2023-13-41 05:42:44").is_err());
}

//! Individual line parsing for vessel CSV files
//!
//! This module splits one raw line into its positional fields, runs the field
//! validators and builds the vessel report. Any failure is captured on the
//! returned [`RecordEntry`] instead of aborting the file.

use super::entry::RecordEntry;
use super::field_parsers::{
    check_coordinate_pairing, check_timestamp_with_position, parse_bounded_decimal,
    parse_fixed_digits, parse_position_timestamp,
};
use crate::app::models::{Location, PeriodOfTime, VesselReport};
use crate::config::PatternVariant;
use crate::constants::{
    CSV_DELIMITER, CSV_HEADER_TOKEN, IMO_NUMBER_DIGITS, LATITUDE_BOUNDS, LONGITUDE_BOUNDS,
    MMSI_DIGITS,
};
use crate::{Error, Result};

/// Translation of raw field values into a vessel report
///
/// Implemented by [`CsvVesselTranslator`] for the legacy CSV feed; tests can
/// substitute their own implementation.
pub trait VesselTranslator: Send + Sync {
    /// Validate the raw fields and build the vessel report
    fn translate(
        &self,
        imo_number: &str,
        mmsi: &str,
        latitude: &str,
        longitude: &str,
        position_timestamp: &str,
    ) -> Result<VesselReport>;
}

/// Translator applying the legacy feed's validation rules
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvVesselTranslator;

impl VesselTranslator for CsvVesselTranslator {
    fn translate(
        &self,
        imo_number: &str,
        mmsi: &str,
        latitude: &str,
        longitude: &str,
        position_timestamp: &str,
    ) -> Result<VesselReport> {
        let imo = parse_fixed_digits(imo_number, IMO_NUMBER_DIGITS, "IMO_number")?;
        let mmsi = parse_fixed_digits(mmsi, MMSI_DIGITS, "MMSI")?;

        parse_bounded_decimal(latitude, LATITUDE_BOUNDS.0, LATITUDE_BOUNDS.1, "Latitude")?;
        parse_bounded_decimal(
            longitude,
            LONGITUDE_BOUNDS.0,
            LONGITUDE_BOUNDS.1,
            "Longitude",
        )?;
        check_coordinate_pairing(latitude, longitude)?;
        check_timestamp_with_position(latitude, longitude, position_timestamp)?;

        // Location only when both coordinates are present; period only when
        // the location is.
        let location = if !latitude.is_empty() && !longitude.is_empty() {
            let period = if position_timestamp.is_empty() {
                None
            } else {
                Some(PeriodOfTime::from_timestamp(parse_position_timestamp(
                    position_timestamp,
                )?))
            };
            Some(Location {
                longitude: longitude.to_string(),
                latitude: latitude.to_string(),
                period,
            })
        } else {
            None
        };

        Ok(VesselReport {
            imo_number: imo,
            mmsi,
            location,
        })
    }
}

/// Check whether a line is the file header or blank and should be skipped
pub fn is_header_or_blank(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with(CSV_HEADER_TOKEN)
}

/// Parse one raw line into a [`RecordEntry`]
///
/// The line is split on the delimiter keeping trailing empty fields. A field
/// count other than the variant's expected count fails the whole line without
/// attempting partial extraction; otherwise each field is extracted
/// positionally and handed to the translator. Failures are recorded on the
/// entry, never propagated.
pub fn parse_record_line(
    raw_line: &str,
    line_number: usize,
    variant: PatternVariant,
    translator: &dyn VesselTranslator,
) -> RecordEntry {
    let mut entry = RecordEntry {
        raw_line: raw_line.to_string(),
        line_number,
        translation_error: None,
        imo_number: String::new(),
        mmsi: String::new(),
        longitude: String::new(),
        latitude: String::new(),
        position_timestamp: String::new(),
        recipient_service_id: None,
        context_id: String::new(),
        reference_message_id: String::new(),
        vessel: None,
        generated_message_id: None,
        generated_context_id: None,
        ack_status: None,
        ack_detail: None,
    };

    let fields: Vec<&str> = raw_line.split(CSV_DELIMITER).collect();
    let expected = variant.expected_field_count();
    if fields.len() != expected {
        entry.translation_error = Some(Error::field_count(fields.len(), expected));
        return entry;
    }

    entry.imo_number = fields[0].to_string();
    entry.mmsi = fields[1].to_string();
    entry.longitude = fields[2].to_string();
    entry.latitude = fields[3].to_string();
    entry.position_timestamp = fields[4].to_string();

    match variant {
        PatternVariant::WithRecipient => {
            entry.recipient_service_id = Some(fields[5].to_string());
            entry.context_id = fields[6].to_string();
            entry.reference_message_id = fields[7].to_string();
        }
        PatternVariant::WithoutRecipient => {
            entry.context_id = fields[5].to_string();
            entry.reference_message_id = fields[6].to_string();
        }
    }

    match translator.translate(
        &entry.imo_number,
        &entry.mmsi,
        &entry.latitude,
        &entry.longitude,
        &entry.position_timestamp,
    ) {
        Ok(vessel) => entry.vessel = Some(vessel),
        Err(error) => entry.translation_error = Some(error),
    }

    entry
}

//! Integration tests for the CSV translator over real files
//!
//! These tests exercise file-level translation end to end: scanning, header
//! skipping, grouping and payload construction.

use std::io::Write;

use tempfile::NamedTempFile;
use vessel_adaptor::app::services::csv_translator::{CsvTranslator, CsvVesselTranslator};
use vessel_adaptor::config::PatternVariant;

fn write_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_single_line_file_produces_one_group_with_one_vessel() {
    let file = write_temp_csv(
        "7710525,232000000,22.253667,34.438333,2023-09-27 05:42:44,svcX,f648cfd1-aade-41b9-a29e-17a37de2c09b,h648cfd1-aade-41b9-a29e-17a37de2c09d\n",
    );

    let translated = CsvTranslator::translate_file(
        file.path(),
        PatternVariant::WithRecipient,
        &CsvVesselTranslator,
    )
    .unwrap();

    assert!(!translated.has_errors());
    assert_eq!(translated.group_count(), 1);

    let payloads = translated.resulting_message_payloads();
    assert_eq!(payloads.len(), 1);

    let (key, payload) = &payloads[0];
    assert_eq!(key.context_id, "f648cfd1-aade-41b9-a29e-17a37de2c09b");
    assert_eq!(
        key.reference_message_id,
        "h648cfd1-aade-41b9-a29e-17a37de2c09d"
    );
    assert_eq!(key.recipient_service_id.as_deref(), Some("svcX"));

    assert_eq!(payload.vessel_count(), 1);
    let vessel = &payload.vessels[0];
    assert_eq!(vessel.imo_number, Some(7710525));
    assert_eq!(vessel.mmsi, Some(232000000));

    let location = vessel.location.as_ref().unwrap();
    assert_eq!(location.longitude, "22.253667");
    assert_eq!(location.latitude, "34.438333");
}

#[test]
fn test_multi_key_file_groups_in_first_seen_order() {
    // Six lines over four distinct keys in the multiplicity pattern 2,2,1,1
    let line = |recipient: &str, context: &str| {
        format!(
            "7710525,232000000,22.253667,34.438333,2023-09-27 05:42:44,{},{},ref-1",
            recipient, context
        )
    };
    let content = [
        line("svcA", "ctx-1"),
        line("svcA", "ctx-2"),
        line("svcA", "ctx-1"),
        line("svcB", "ctx-3"),
        line("svcA", "ctx-2"),
        line("svcB", "ctx-4"),
    ]
    .join("\n");
    let file = write_temp_csv(&content);

    let translated = CsvTranslator::translate_file(
        file.path(),
        PatternVariant::WithRecipient,
        &CsvVesselTranslator,
    )
    .unwrap();

    let payloads = translated.resulting_message_payloads();
    assert_eq!(payloads.len(), 4);

    let contexts: Vec<&str> = payloads
        .iter()
        .map(|(key, _)| key.context_id.as_str())
        .collect();
    assert_eq!(contexts, vec!["ctx-1", "ctx-2", "ctx-3", "ctx-4"]);

    let counts: Vec<usize> = payloads
        .iter()
        .map(|(_, payload)| payload.vessel_count())
        .collect();
    assert_eq!(counts, vec![2, 2, 1, 1]);
}

#[test]
fn test_seven_field_variant_groups_without_recipient() {
    let content = "\
7710525,232000000,22.253667,34.438333,2023-09-27 05:42:44,ctx-1,ref-1
7710525,232000000,22.253667,34.438333,2023-09-27 05:42:44,ctx-1,ref-1
7710525,232000000,22.253667,34.438333,2023-09-27 05:42:44,ctx-2,ref-1
";
    let file = write_temp_csv(content);

    let translated = CsvTranslator::translate_file(
        file.path(),
        PatternVariant::WithoutRecipient,
        &CsvVesselTranslator,
    )
    .unwrap();

    assert!(!translated.has_errors());
    let payloads = translated.resulting_message_payloads();
    assert_eq!(payloads.len(), 2);
    assert_eq!(payloads[0].0.recipient_service_id, None);
    assert_eq!(payloads[0].1.vessel_count(), 2);
    assert_eq!(payloads[1].1.vessel_count(), 1);
}

#[test]
fn test_file_with_header_and_mixed_lines() {
    let content = "\
IMO_Number,MMSI,longitude,latitude,position_timestamp,recipientServiceId,contextId,referenceMessageId
7710525,232000000,22.253667,34.438333,2023-09-27 05:42:44,svcX,ctx-1,ref-1
bad line with no commas at all count
7710525,232000000,22.253667,34.438333,2023-09-27 05:42:44,svcX,ctx-1,ref-1
";
    let file = write_temp_csv(content);

    let translated = CsvTranslator::translate_file(
        file.path(),
        PatternVariant::WithRecipient,
        &CsvVesselTranslator,
    )
    .unwrap();

    assert!(translated.has_errors());
    // The header was skipped; three data lines were scanned
    assert_eq!(translated.entries().len(), 3);
    assert_eq!(translated.error_entries().len(), 1);
    assert_eq!(translated.error_entries()[0].line_number, 3);
    // Valid lines still grouped
    assert_eq!(translated.group_count(), 1);
}

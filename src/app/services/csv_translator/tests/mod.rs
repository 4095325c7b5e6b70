//! Test utilities for the vessel CSV translator
//!
//! Shared line fixtures and helpers used across the translator test modules.

use std::io::Write;
use tempfile::NamedTempFile;

// Test modules
mod field_parser_tests;

/// A fully valid 8-field line (recipient variant)
pub const VALID_LINE: &str = "7710525,232000000,22.253667,34.438333,2023-09-27 05:42:44,svcX,f648cfd1-aade-41b9-a29e-17a37de2c09b,h648cfd1-aade-41b9-a29e-17a37de2c09d";

/// A fully valid 7-field line (no recipient column)
pub const VALID_LINE_NO_RECIPIENT: &str = "7710525,232000000,22.253667,34.438333,2023-09-27 05:42:44,f648cfd1-aade-41b9-a29e-17a37de2c09b,h648cfd1-aade-41b9-a29e-17a37de2c09d";

/// Build a valid 8-field line with the given correlation fields
pub fn line_with_key(recipient: &str, context: &str, reference: &str) -> String {
    format!(
        "7710525,232000000,22.253667,34.438333,2023-09-27 05:42:44,{},{},{}",
        recipient, context, reference
    )
}

/// Helper to create a temporary CSV file with the given content
pub fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

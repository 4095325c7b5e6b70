//! CSV translator for legacy vessel position report files
//!
//! This module turns one flat CSV file into outbound message batches while
//! preserving everything needed for audit output.
//!
//! ## Architecture
//!
//! The translator is organized into logical components:
//! - [`translator`] - File scanning, message-key grouping and companion file output
//! - [`record_parser`] - Individual line splitting and vessel construction
//! - [`field_parsers`] - Field-level validation and conversion rules
//! - [`entry`] - The per-line record carrying fields, errors and delivery results
//!
//! ## Usage
//!
//! ```rust
//! use vessel_adaptor::app::services::csv_translator::{CsvTranslator, CsvVesselTranslator};
//! use vessel_adaptor::config::PatternVariant;
//!
//! # fn example(path: &std::path::Path) -> vessel_adaptor::Result<()> {
//! let translated = CsvTranslator::translate_file(
//!     path,
//!     PatternVariant::WithRecipient,
//!     &CsvVesselTranslator,
//! )?;
//!
//! println!(
//!     "{} lines in {} message groups, {} errors",
//!     translated.entries().len(),
//!     translated.group_count(),
//!     translated.error_entries().len()
//! );
//! # Ok(())
//! # }
//! ```

pub mod entry;
pub mod field_parsers;
pub mod record_parser;
pub mod translator;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use entry::RecordEntry;
pub use record_parser::{CsvVesselTranslator, VesselTranslator};
pub use translator::{CsvTranslator, GroupKey};

//! Translate command implementation
//!
//! One-shot validation of a single CSV file: parses every line, reports the
//! failures and the message groups that would be sent, and delivers nothing.

use colored::Colorize;
use tracing::info;

use super::shared::setup_logging;
use crate::app::services::csv_translator::{CsvTranslator, CsvVesselTranslator};
use crate::cli::args::TranslateArgs;
use crate::{Error, Result};

/// Translate command runner
pub async fn run_translate(args: TranslateArgs) -> Result<()> {
    setup_logging(args.get_log_level())?;
    args.validate()?;

    let variant = args
        .pattern
        .map(|pattern| pattern.to_variant())
        .unwrap_or_default();

    info!(
        "Validating {} as {:?} pattern",
        args.file.display(),
        variant
    );

    let translated = CsvTranslator::translate_file(&args.file, variant, &CsvVesselTranslator)?;

    println!("{}", format!("File: {}", args.file.display()).bold());
    println!(
        "Lines: {}   Message groups: {}",
        translated.entries().len(),
        translated.group_count()
    );

    for entry in translated.error_entries() {
        let message = entry
            .translation_error
            .as_ref()
            .map(|e| e.to_string())
            .unwrap_or_default();
        println!(
            "{} line {}: {}",
            "FAIL".red().bold(),
            entry.line_number,
            message
        );
    }

    let error_count = translated.error_entries().len();
    if error_count == 0 {
        println!("{}", "All lines translated cleanly".green());
        for (index, (key, payload)) in translated.resulting_message_payloads().iter().enumerate() {
            println!(
                "  group {}: {} vessels (context '{}', reference '{}')",
                index,
                payload.vessel_count(),
                key.context_id,
                key.reference_message_id
            );
        }
        Ok(())
    } else {
        println!(
            "{}",
            format!(
                "{} of {} lines failed translation",
                error_count,
                translated.entries().len()
            )
            .red()
        );
        Err(Error::field_format(format!(
            "{} of {} lines failed translation",
            error_count,
            translated.entries().len()
        )))
    }
}

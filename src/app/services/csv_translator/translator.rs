//! Translation of a whole vessel CSV file into message groups
//!
//! The [`CsvTranslator`] scans a file line by line, keeps every entry in
//! original order for audit output, groups cleanly translated entries by
//! their correlation key, and collects failed entries for the error
//! companion file.

use std::collections::HashMap;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use super::entry::RecordEntry;
use super::record_parser::{is_header_or_blank, parse_record_line, VesselTranslator};
use crate::app::models::{DeliveryReceipt, VesselPayload};
use crate::config::PatternVariant;
use crate::constants::{ERROR_HEADER_SUFFIX, SENT_DETAILS_HEADER_SUFFIX};
use crate::{Error, Result};

/// Correlation key grouping entries into one outbound message
///
/// Entries with equal context id, reference message id and recipient belong
/// to the same message group. The recipient component is `None` under the
/// pattern variant without a recipient column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub context_id: String,
    pub reference_message_id: String,
    pub recipient_service_id: Option<String>,
}

impl GroupKey {
    fn of(entry: &RecordEntry) -> Self {
        Self {
            context_id: entry.context_id.clone(),
            reference_message_id: entry.reference_message_id.clone(),
            recipient_service_id: entry.recipient_service_id.clone(),
        }
    }
}

/// Ordered batch of entries sharing one correlation key
#[derive(Debug)]
struct MessageGroup {
    key: GroupKey,
    /// Indices into the translator's entry list, in file order
    entry_indices: Vec<usize>,
}

/// Translator over one vessel CSV file
///
/// Entries are owned by a single list in original file order; message groups
/// and the error list refer to entries by index so that delivery results can
/// be written back without shared ownership.
#[derive(Debug)]
pub struct CsvTranslator {
    variant: PatternVariant,
    entries: Vec<RecordEntry>,
    groups: Vec<MessageGroup>,
    group_index: HashMap<GroupKey, usize>,
    error_indices: Vec<usize>,
}

impl CsvTranslator {
    /// Create an empty translator for the given pattern variant
    pub fn new(variant: PatternVariant) -> Self {
        Self {
            variant,
            entries: Vec::new(),
            groups: Vec::new(),
            group_index: HashMap::new(),
            error_indices: Vec::new(),
        }
    }

    /// Translate a whole CSV file
    ///
    /// Header and blank lines are skipped before parsing; every other line
    /// becomes an entry, translated along the way.
    pub fn translate_file(
        path: &Path,
        variant: PatternVariant,
        translator: &dyn VesselTranslator,
    ) -> Result<Self> {
        info!("Translating input file: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read file {}", path.display()), e)
        })?;

        let mut result = Self::new(variant);
        for (index, line) in content.lines().enumerate() {
            let line_number = index + 1;
            if is_header_or_blank(line) {
                continue;
            }
            result.add_line(line, line_number, translator);
        }

        Ok(result)
    }

    /// Parse one line and register it in the original-order, group and error
    /// bookkeeping
    pub fn add_line(
        &mut self,
        raw_line: &str,
        line_number: usize,
        translator: &dyn VesselTranslator,
    ) {
        let entry = parse_record_line(raw_line, line_number, self.variant, translator);
        let index = self.entries.len();

        if entry.is_translated() {
            let key = GroupKey::of(&entry);
            match self.group_index.get(&key) {
                Some(&group_pos) => self.groups[group_pos].entry_indices.push(index),
                None => {
                    self.group_index.insert(key.clone(), self.groups.len());
                    self.groups.push(MessageGroup {
                        key,
                        entry_indices: vec![index],
                    });
                }
            }
        } else {
            self.error_indices.push(index);
        }

        self.entries.push(entry);
    }

    /// Check whether any line failed translation
    pub fn has_errors(&self) -> bool {
        !self.error_indices.is_empty()
    }

    /// All entries in original file order, successes and failures alike
    pub fn entries(&self) -> &[RecordEntry] {
        &self.entries
    }

    /// Entries that failed translation, in file order
    pub fn error_entries(&self) -> Vec<&RecordEntry> {
        self.error_indices
            .iter()
            .map(|&index| &self.entries[index])
            .collect()
    }

    /// Number of distinct message groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Build one outbound payload per message group, in group-creation order
    ///
    /// Each payload folds the vessel reports of all member entries into one
    /// container with the fixed metadata defaults.
    pub fn resulting_message_payloads(&self) -> Vec<(GroupKey, VesselPayload)> {
        self.groups
            .iter()
            .map(|group| {
                let mut payload = VesselPayload::new();
                for &index in &group.entry_indices {
                    if let Some(vessel) = &self.entries[index].vessel {
                        payload.vessels.push(vessel.clone());
                    }
                }
                (group.key.clone(), payload)
            })
            .collect()
    }

    /// Copy a delivery receipt onto every entry of the given group
    pub fn update_entries_with_receipt(&mut self, key: &GroupKey, receipt: &DeliveryReceipt) {
        if let Some(&group_pos) = self.group_index.get(key) {
            let indices = self.groups[group_pos].entry_indices.clone();
            for index in indices {
                self.entries[index].apply_receipt(receipt);
            }
        }
    }

    /// Write the success companion file
    ///
    /// Lists every original line in file order with the generated message id,
    /// context id and acknowledgment appended.
    pub fn write_success_companion(&self, path: &Path) -> Result<()> {
        if self.entries.is_empty() {
            return Ok(());
        }

        let file = std::fs::File::create(path).map_err(|e| {
            Error::io(format!("Failed to create output file {}", path.display()), e)
        })?;
        let mut writer = BufWriter::new(file);

        writeln!(
            writer,
            "{}{}",
            self.variant.header_row(),
            SENT_DETAILS_HEADER_SUFFIX
        )?;
        for entry in &self.entries {
            writeln!(writer, "{}", entry.success_output_line())?;
        }
        writer.flush()?;

        info!(
            "Wrote {} result lines to {}",
            self.entries.len(),
            path.display()
        );
        Ok(())
    }

    /// Write the error companion file
    ///
    /// Lists only the failing lines with their error message appended.
    pub fn write_error_companion(&self, path: &Path) -> Result<()> {
        if self.error_indices.is_empty() {
            return Ok(());
        }

        let file = std::fs::File::create(path).map_err(|e| {
            Error::io(format!("Failed to create error file {}", path.display()), e)
        })?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{}{}", self.variant.header_row(), ERROR_HEADER_SUFFIX)?;
        for &index in &self.error_indices {
            writeln!(writer, "{}", self.entries[index].error_output_line())?;
        }
        writer.flush()?;

        info!(
            "Wrote {} error lines to {}",
            self.error_indices.len(),
            path.display()
        );
        Ok(())
    }
}

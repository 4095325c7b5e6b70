//! Per-file processing pipeline
//!
//! Once the watcher judges a file stable, the [`FileProcessor`] runs it end
//! to end: translate every line, deliver the message groups, write the
//! companion file and relocate the source. A file with any failing line is
//! routed to the error directory without delivering anything; a delivery
//! failure of one group is recorded on that group's lines and does not block
//! sibling groups.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use tracing::{info, warn};

use crate::app::models::{DeliveryReceipt, Destination, VesselPayload};
use crate::app::ports::{DeliveryService, MessageHistory};
use crate::app::services::correlation::CorrelationResolver;
use crate::app::services::csv_translator::{CsvTranslator, CsvVesselTranslator, GroupKey};
use crate::config::{Config, PatternVariant};
use crate::constants::FILE_TIMESTAMP_FORMAT;
use crate::{Error, Result};

/// Outcome of processing one stable file
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// Every line translated; groups were delivered and the file moved to
    /// the output directory
    Delivered {
        lines: usize,
        groups: usize,
        failed_groups: usize,
    },

    /// At least one line failed translation; nothing was delivered and the
    /// file moved to the error directory
    Rejected { lines: usize, error_lines: usize },
}

/// Destination paths derived from one input file
///
/// All names share a processing timestamp so the moved source and its
/// companion can be matched up afterwards.
#[derive(Debug)]
struct CompanionPaths {
    /// Where the source file goes on success
    output_target: PathBuf,

    /// Where the source file goes on failure
    error_target: PathBuf,

    /// Success companion listing every line with its delivery details
    sent_details: PathBuf,

    /// Error companion listing the failing lines
    error_lines: PathBuf,
}

impl CompanionPaths {
    fn derive(input: &Path, output_dir: &Path, error_dir: &Path) -> Result<Self> {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                Error::io_error(format!("Input file has no usable name: {}", input.display()))
            })?;

        let timestamp = Local::now().format(FILE_TIMESTAMP_FORMAT);
        let moved_name = format!("{}_{}.csv", stem, timestamp);

        Ok(Self {
            output_target: output_dir.join(&moved_name),
            error_target: error_dir.join(&moved_name),
            sent_details: output_dir.join(format!("{}_{}_sentDetails.csv", stem, timestamp)),
            error_lines: error_dir.join(format!("{}_{}_errors.csv", stem, timestamp)),
        })
    }
}

/// Pipeline runner for one stable input file
pub struct FileProcessor {
    variant: PatternVariant,
    translator: CsvVesselTranslator,
    resolver: CorrelationResolver,
    delivery: Arc<dyn DeliveryService>,
    output_dir: PathBuf,
    error_dir: PathBuf,
}

impl FileProcessor {
    /// Wire a processor from the configuration and the external collaborators
    pub fn new(
        config: &Config,
        history: Arc<dyn MessageHistory>,
        delivery: Arc<dyn DeliveryService>,
    ) -> Self {
        let resolver = CorrelationResolver::new(
            history,
            config.discovery_profiles.clone(),
            config.pattern.has_recipient(),
        );

        Self {
            variant: config.pattern,
            translator: CsvVesselTranslator,
            resolver,
            delivery,
            output_dir: config.output_dir.clone(),
            error_dir: config.error_dir.clone(),
        }
    }

    /// Process one stable file end to end
    ///
    /// Translation failures route the whole file to the error directory
    /// without delivering anything. When every line translates, each group is
    /// delivered in creation order; a failing group gets a failure receipt on
    /// its lines and the remaining groups still go out.
    pub async fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let paths = CompanionPaths::derive(path, &self.output_dir, &self.error_dir)?;

        let mut translated =
            CsvTranslator::translate_file(path, self.variant, &self.translator)?;

        if translated.has_errors() {
            let error_lines = translated.error_entries().len();
            translated.write_error_companion(&paths.error_lines)?;
            warn!(
                "Created error file {} with {} error lines",
                paths.error_lines.display(),
                error_lines
            );
            move_file(path, &paths.error_target)?;
            return Ok(FileOutcome::Rejected {
                lines: translated.entries().len(),
                error_lines,
            });
        }

        let payloads = translated.resulting_message_payloads();
        let groups = payloads.len();
        let mut failed_groups = 0;

        for (key, payload) in payloads {
            let receipt = match self.deliver_group(&key, &payload).await {
                Ok(receipt) => receipt,
                Err(error) => {
                    warn!(
                        "Delivery failed for group with context '{}': {}",
                        key.context_id, error
                    );
                    failed_groups += 1;
                    DeliveryReceipt::failure(key.context_id.clone(), error.to_string())
                }
            };
            translated.update_entries_with_receipt(&key, &receipt);
        }

        translated.write_success_companion(&paths.sent_details)?;
        move_file(path, &paths.output_target)?;

        Ok(FileOutcome::Delivered {
            lines: translated.entries().len(),
            groups,
            failed_groups,
        })
    }

    /// Move a file that failed unexpectedly to the error directory
    ///
    /// Used by the watcher when [`process_file`](Self::process_file) itself
    /// returns an error, so the file does not stay in the input directory.
    pub fn quarantine(&self, path: &Path) -> Result<PathBuf> {
        let paths = CompanionPaths::derive(path, &self.output_dir, &self.error_dir)?;
        move_file(path, &paths.error_target)?;
        Ok(paths.error_target)
    }

    /// Resolve correlation for one group and deliver its payload
    async fn deliver_group(
        &self,
        key: &GroupKey,
        payload: &VesselPayload,
    ) -> Result<DeliveryReceipt> {
        let resolved = self
            .resolver
            .resolve(
                &key.reference_message_id,
                &key.context_id,
                key.recipient_service_id.as_deref(),
            )
            .await?;

        let destination = match &resolved.recipient_id {
            Some(recipient) => self.resolver.destination(recipient)?,
            None => Destination::Subscribers,
        };

        self.delivery
            .deliver(payload, &resolved.context_id, &destination)
            .await
    }
}

/// Relocate a file with atomic-replace semantics
///
/// Both directories are expected to live on the same filesystem so the move
/// is a rename and never leaves a half-copied file visible.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    std::fs::rename(from, to).map_err(|e| {
        Error::io(
            format!(
                "Unable to move file {} to {}",
                from.display(),
                to.display()
            ),
            e,
        )
    })?;
    info!("Moved file {} to {}", from.display(), to.display());
    Ok(())
}

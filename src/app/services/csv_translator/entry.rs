//! One line entry of a vessel CSV file
//!
//! A [`RecordEntry`] keeps everything known about a single source line: the
//! raw text, the positionally extracted fields, either the translated vessel
//! report or the translation error, and the delivery details filled in after
//! the line's message group has been sent.

use crate::app::models::{AckStatus, DeliveryReceipt, VesselReport};
use crate::constants::{ACK_STATUS_UNKNOWN, CSV_DELIMITER};
use crate::Error;

/// One source line and everything derived from it
///
/// Invariant: after parsing, exactly one of `vessel` and `translation_error`
/// is set.
#[derive(Debug)]
pub struct RecordEntry {
    /// Raw line text as read from the file
    pub raw_line: String,

    /// 1-based line number within the source file
    pub line_number: usize,

    /// Why this line could not be translated, if it could not
    pub translation_error: Option<Error>,

    // Positionally extracted fields; empty when the split failed
    pub imo_number: String,
    pub mmsi: String,
    pub longitude: String,
    pub latitude: String,
    pub position_timestamp: String,

    /// Recipient service id; `None` under the pattern without a recipient column
    pub recipient_service_id: Option<String>,

    pub context_id: String,
    pub reference_message_id: String,

    /// Translated vessel report, present iff there is no translation error
    pub vessel: Option<VesselReport>,

    // Delivery details, filled in once the line's group has been sent
    pub generated_message_id: Option<String>,
    pub generated_context_id: Option<String>,
    pub ack_status: Option<AckStatus>,
    pub ack_detail: Option<String>,
}

impl RecordEntry {
    /// Check whether the line translated cleanly
    pub fn is_translated(&self) -> bool {
        self.translation_error.is_none()
    }

    /// Copy the delivery result of the line's message group onto this entry
    pub fn apply_receipt(&mut self, receipt: &DeliveryReceipt) {
        self.generated_message_id = Some(receipt.message_id.clone());
        self.generated_context_id = Some(receipt.context_id.clone());
        self.ack_status = Some(receipt.ack_status);
        self.ack_detail = Some(receipt.ack_detail.clone());
    }

    /// Render the success companion line: original fields plus delivery details
    pub fn success_output_line(&self) -> String {
        format!(
            "{raw}{d}{message_id}{d}{context_id}{d}{status}{d}{detail}",
            raw = self.raw_line,
            d = CSV_DELIMITER,
            message_id = self.generated_message_id.as_deref().unwrap_or(""),
            context_id = self.generated_context_id.as_deref().unwrap_or(""),
            status = self
                .ack_status
                .map(|s| s.to_string())
                .unwrap_or_else(|| ACK_STATUS_UNKNOWN.to_string()),
            detail = self.ack_detail.as_deref().unwrap_or(""),
        )
    }

    /// Render the error companion line: original fields plus the error text
    pub fn error_output_line(&self) -> String {
        let message = self
            .translation_error
            .as_ref()
            .map(|e| e.to_string())
            .unwrap_or_default();
        format!("{}{}{}", self.raw_line, CSV_DELIMITER, message)
    }
}

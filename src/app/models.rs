//! Data models for vessel position processing
//!
//! This module contains the core data structures for representing vessel
//! position reports, outbound message payloads and delivery acknowledgments.

use crate::constants::ACK_STATUS_UNKNOWN;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Vessel Report Structure
// =============================================================================

/// Vessel position report built from one valid CSV line
///
/// Identifier codes are optional: a line may carry an IMO number, an MMSI,
/// both or neither. The location is only present when both coordinates were
/// provided, and its time period is only present when the location is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VesselReport {
    /// IMO ship identification number (7 digits)
    pub imo_number: Option<u64>,

    /// Maritime Mobile Service Identity (9 digits)
    pub mmsi: Option<u64>,

    /// Reported position, present only when both coordinates were provided
    pub location: Option<Location>,
}

/// Geographic position of a vessel report
///
/// Coordinates are kept as the validated source text so that audit output
/// reproduces the input digits exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    /// Longitude in decimal degrees, validated against [-180, 180]
    pub longitude: String,

    /// Latitude in decimal degrees, validated against [-90, 90]
    pub latitude: String,

    /// Observation period, present only when a position timestamp was provided
    pub period: Option<PeriodOfTime>,
}

/// Time period of a position observation
///
/// Both fields are derived from the single position timestamp of the source
/// line, truncated to seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodOfTime {
    /// Start date of the observation
    pub start_date: DateTime<Utc>,

    /// Start time of the observation
    pub start_time: DateTime<Utc>,
}

impl PeriodOfTime {
    /// Build a period where date and time both come from one timestamp
    pub fn from_timestamp(timestamp: DateTime<Utc>) -> Self {
        Self {
            start_date: timestamp,
            start_time: timestamp,
        }
    }
}

impl VesselReport {
    /// Check whether the report carries any identifier at all
    pub fn has_identifier(&self) -> bool {
        self.imo_number.is_some() || self.mmsi.is_some()
    }
}

// =============================================================================
// Outbound Payload
// =============================================================================

/// Security level attached to an outbound payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SecurityLevel {
    #[default]
    NonSpecified,
    NonClassified,
    Restricted,
}

/// Sensitivity marking attached to an outbound payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Sensitivity {
    #[default]
    NonSpecified,
    Amber,
    Green,
}

/// Declared purpose of an outbound payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Purpose {
    #[default]
    NonSpecified,
    BorderMonitoring,
    FisheriesMonitoring,
}

/// Outbound message payload carrying all vessels of one message group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VesselPayload {
    /// Security level of the payload
    pub security_level: SecurityLevel,

    /// Sensitivity marking of the payload
    pub sensitivity: Sensitivity,

    /// Declared purpose of the payload
    pub purpose: Purpose,

    /// Whether the transport must encrypt the payload
    pub ensure_encryption: bool,

    /// Vessel reports of the group, in file order
    pub vessels: Vec<VesselReport>,
}

impl VesselPayload {
    /// Create an empty payload with the fixed metadata defaults
    pub fn new() -> Self {
        Self {
            security_level: SecurityLevel::NonSpecified,
            sensitivity: Sensitivity::NonSpecified,
            purpose: Purpose::NonSpecified,
            ensure_encryption: false,
            vessels: Vec::new(),
        }
    }

    /// Number of vessels folded into this payload
    pub fn vessel_count(&self) -> usize {
        self.vessels.len()
    }
}

impl Default for VesselPayload {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Delivery Acknowledgment
// =============================================================================

/// Acknowledgment status returned by the delivery interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AckStatus {
    /// The message was accepted by the remote service
    Success,

    /// The remote service rejected the message content
    BadRequest,

    /// The remote service or transport failed
    ServerError,

    /// No acknowledgment code was produced
    Unknown,
}

impl AckStatus {
    /// Check whether the acknowledgment reports a successful delivery
    pub fn is_success(self) -> bool {
        matches!(self, AckStatus::Success)
    }
}

impl std::fmt::Display for AckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            AckStatus::Success => "Success",
            AckStatus::BadRequest => "BadRequest",
            AckStatus::ServerError => "ServerError",
            AckStatus::Unknown => ACK_STATUS_UNKNOWN,
        };
        write!(f, "{}", value)
    }
}

/// Result of delivering one message group to the outbound transport
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryReceipt {
    /// Identifier of the message created by the transport
    pub message_id: String,

    /// Context identifier the message was sent under
    pub context_id: String,

    /// Acknowledgment status
    pub ack_status: AckStatus,

    /// Human-readable acknowledgment detail
    pub ack_detail: String,
}

impl DeliveryReceipt {
    /// Build a failure receipt for a group that could not be delivered
    ///
    /// Used when correlation resolution or the transport call fails so the
    /// audit output still records an outcome for every line of the group.
    pub fn failure(context_id: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            message_id: String::new(),
            context_id: context_id.into(),
            ack_status: AckStatus::ServerError,
            ack_detail: detail.into(),
        }
    }
}

// =============================================================================
// Message History Record
// =============================================================================

/// Prior message returned by a history lookup
///
/// Only the fields the correlation resolver needs are modelled: the context
/// the message belonged to and the service that sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRecord {
    /// Context identifier of the prior message
    pub context_id: String,

    /// Service identifier of the prior message's sender
    pub sender_service_id: String,
}

// =============================================================================
// Discovery Profile
// =============================================================================

/// Descriptor used to discover recipients when none is known explicitly
///
/// Profiles are loaded once at startup as an ordered list; a recipient id of
/// the form `unknown_<N>` selects the profile at index `N`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiscoveryProfile {
    /// Community the recipient must belong to (e.g. "Customs")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,

    /// Country code of the recipient (e.g. "ES")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Required data freshness (e.g. "NearlyRealTime")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_freshness: Option<String>,

    /// Function of the recipient (e.g. "CustomsMonitoring")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,

    /// Sea basin of interest (e.g. "ArcticOcean")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sea_basin: Option<String>,
}

impl DiscoveryProfile {
    /// Check whether at least one selector field is set
    pub fn is_defined(&self) -> bool {
        self.community.is_some()
            || self.country.is_some()
            || self.data_freshness.is_some()
            || self.function.is_some()
            || self.sea_basin.is_some()
    }
}

/// Resolved destination of one message group
#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    /// Deliver to a concrete recipient service id
    Known(String),

    /// Discover recipients matching a configured profile
    Discover(DiscoveryProfile),

    /// Deliver to the current subscribers; used by the pattern variant
    /// without a recipient column
    Subscribers,
}

//! Constants for vessel CSV processing
//!
//! Central definitions for the CSV line layout, timestamp handling and
//! watcher defaults shared across the adaptor.

/// Header row of an input file carrying an explicit recipient column
pub const CSV_HEADER_WITH_RECIPIENT: &str =
    "IMO_Number,MMSI,longitude,latitude,position_timestamp,recipientServiceId,contextId,referenceMessageId";

/// Header row of an input file without a recipient column
pub const CSV_HEADER_WITHOUT_RECIPIENT: &str =
    "IMO_Number,MMSI,longitude,latitude,position_timestamp,contextId,referenceMessageId";

/// First token of the header row, used to skip it during parsing
pub const CSV_HEADER_TOKEN: &str = "IMO_Number";

/// Field delimiter for input and companion files
pub const CSV_DELIMITER: char = ',';

/// Expected field count when the pattern carries a recipient column
pub const FIELD_COUNT_WITH_RECIPIENT: usize = 8;

/// Expected field count when the pattern has no recipient column
pub const FIELD_COUNT_WITHOUT_RECIPIENT: usize = 7;

/// Number of digits of a valid IMO number
pub const IMO_NUMBER_DIGITS: usize = 7;

/// Number of digits of a valid MMSI
pub const MMSI_DIGITS: usize = 9;

/// Inclusive latitude bounds in decimal degrees
pub const LATITUDE_BOUNDS: (f64, f64) = (-90.0, 90.0);

/// Inclusive longitude bounds in decimal degrees
pub const LONGITUDE_BOUNDS: (f64, f64) = (-180.0, 180.0);

/// Timestamp pattern of the position_timestamp column
pub const POSITION_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp pattern used when constructing companion file names
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Extension of input files considered by the watcher
pub const INPUT_FILE_EXTENSION: &str = "csv";

/// Default poll interval of the input directory watcher, in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Recipient prefix selecting a configured discovery profile instead of a
/// concrete service id, in the form `unknown_<N>`
pub const DISCOVERY_RECIPIENT_PREFIX: &str = "unknown";

/// Extra columns appended to the success companion file header
pub const SENT_DETAILS_HEADER_SUFFIX: &str =
    ",generatedMessageId,generatedContextId,ackStatus,ackDetail";

/// Extra column appended to the error companion file header
pub const ERROR_HEADER_SUFFIX: &str = ",translation_error";

/// Ack status printed when no acknowledgment code was produced
pub const ACK_STATUS_UNKNOWN: &str = "Unknown";

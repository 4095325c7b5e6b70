//! Configuration management and validation.
//!
//! Provides the adaptor configuration: directory layout, watcher poll
//! interval, the active CSV pattern variant and the ordered list of
//! discovery profiles used for `unknown_<N>` recipients. Configuration is
//! loaded from a TOML file with CLI overrides layered on top.

use crate::app::models::DiscoveryProfile;
use crate::constants::{DEFAULT_POLL_INTERVAL_SECS, FIELD_COUNT_WITH_RECIPIENT, FIELD_COUNT_WITHOUT_RECIPIENT};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Layout variant of the input CSV lines
///
/// The legacy feed exists in two shapes: one with an explicit recipient
/// column (8 fields) and one without (7 fields). The variant is fixed per
/// deployment and drives the expected field count and the companion file
/// headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternVariant {
    /// Lines carry a recipientServiceId column
    #[default]
    WithRecipient,
    /// Lines have no recipient column; recipients come from message history
    WithoutRecipient,
}

impl PatternVariant {
    /// Number of fields a line of this variant must split into
    pub fn expected_field_count(self) -> usize {
        match self {
            PatternVariant::WithRecipient => FIELD_COUNT_WITH_RECIPIENT,
            PatternVariant::WithoutRecipient => FIELD_COUNT_WITHOUT_RECIPIENT,
        }
    }

    /// Whether lines of this variant carry an explicit recipient column
    pub fn has_recipient(self) -> bool {
        matches!(self, PatternVariant::WithRecipient)
    }

    /// Header row of input files of this variant
    pub fn header_row(self) -> &'static str {
        match self {
            PatternVariant::WithRecipient => crate::constants::CSV_HEADER_WITH_RECIPIENT,
            PatternVariant::WithoutRecipient => crate::constants::CSV_HEADER_WITHOUT_RECIPIENT,
        }
    }
}

/// Adaptor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory watched for incoming CSV files
    pub input_dir: PathBuf,

    /// Directory processed files and success companions are written to
    pub output_dir: PathBuf,

    /// Directory failed files and error companions are written to
    pub error_dir: PathBuf,

    /// Watcher poll interval in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Active CSV pattern variant
    #[serde(default)]
    pub pattern: PatternVariant,

    /// Ordered discovery profiles addressed by `unknown_<N>` recipients
    #[serde(default)]
    pub discovery_profiles: Vec<DiscoveryProfile>,
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            error_dir: PathBuf::from("error"),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            pattern: PatternVariant::default(),
            discovery_profiles: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Default config file location under the user configuration directory
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("vessel-adaptor").join("config.toml"))
            .ok_or_else(|| {
                Error::configuration("Could not determine user configuration directory".to_string())
            })
    }

    /// Watcher poll interval as a [`Duration`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Validate directory layout and watcher settings
    pub fn validate(&self) -> Result<()> {
        for (name, dir) in [
            ("input", &self.input_dir),
            ("output", &self.output_dir),
            ("error", &self.error_dir),
        ] {
            if !dir.exists() {
                return Err(Error::configuration(format!(
                    "{} directory does not exist: {}",
                    name,
                    dir.display()
                )));
            }
            if !dir.is_dir() {
                return Err(Error::configuration(format!(
                    "{} path is not a directory: {}",
                    name,
                    dir.display()
                )));
            }
        }

        if self.input_dir == self.output_dir || self.input_dir == self.error_dir {
            return Err(Error::configuration(
                "Input directory must be distinct from output and error directories".to_string(),
            ));
        }

        if self.poll_interval_secs == 0 {
            return Err(Error::configuration(
                "Poll interval must be greater than 0 seconds".to_string(),
            ));
        }

        for (index, profile) in self.discovery_profiles.iter().enumerate() {
            if !profile.is_defined() {
                return Err(Error::configuration(format!(
                    "Discovery profile {} has no selector fields set",
                    index
                )));
            }
        }

        Ok(())
    }

    /// Set the directory layout
    pub fn with_directories(
        mut self,
        input_dir: PathBuf,
        output_dir: PathBuf,
        error_dir: PathBuf,
    ) -> Self {
        self.input_dir = input_dir;
        self.output_dir = output_dir;
        self.error_dir = error_dir;
        self
    }

    /// Set the poll interval in seconds
    pub fn with_poll_interval(mut self, secs: u64) -> Self {
        self.poll_interval_secs = secs;
        self
    }

    /// Set the pattern variant
    pub fn with_pattern(mut self, pattern: PatternVariant) -> Self {
        self.pattern = pattern;
        self
    }

    /// Set the discovery profile list
    pub fn with_discovery_profiles(mut self, profiles: Vec<DiscoveryProfile>) -> Self {
        self.discovery_profiles = profiles;
        self
    }
}

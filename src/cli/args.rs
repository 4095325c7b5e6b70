//! Command-line argument definitions for the vessel adaptor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::PatternVariant;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the vessel adaptor
///
/// Ingests legacy vessel position CSV files, groups them into outbound
/// message batches and writes delivery acknowledgments back as audit output.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "vessel-adaptor",
    version,
    about = "Ingest legacy vessel position CSV files and forward them as grouped outbound messages",
    long_about = "An adaptor that watches an input directory for legacy vessel position CSV files, \
                  validates and translates each line into a vessel report, groups related lines \
                  into outbound message batches, resolves correlation identifiers against message \
                  history, and reconciles delivery acknowledgments back onto the original lines \
                  for audit output."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the vessel adaptor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Watch the input directory and process incoming files (main command)
    Watch(WatchArgs),
    /// Validate a single CSV file without delivering anything
    Translate(TranslateArgs),
}

/// CSV pattern variant selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PatternArg {
    /// Lines carry a recipientServiceId column (8 fields)
    WithRecipient,
    /// Lines have no recipient column (7 fields)
    WithoutRecipient,
}

impl PatternArg {
    /// Convert to the configuration-level variant
    pub fn to_variant(self) -> PatternVariant {
        match self {
            PatternArg::WithRecipient => PatternVariant::WithRecipient,
            PatternArg::WithoutRecipient => PatternVariant::WithoutRecipient,
        }
    }
}

/// Arguments for the watch command (the polling daemon)
#[derive(Debug, Clone, Parser)]
pub struct WatchArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ~/.config/vessel-adaptor/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Input directory watched for incoming CSV files
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Input directory watched for incoming CSV files"
    )]
    pub input_dir: Option<PathBuf>,

    /// Output directory for processed files and success companions
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output directory for processed files"
    )]
    pub output_dir: Option<PathBuf>,

    /// Error directory for rejected files and error companions
    #[arg(
        short = 'e',
        long = "error",
        value_name = "PATH",
        help = "Error directory for rejected files"
    )]
    pub error_dir: Option<PathBuf>,

    /// Poll interval in seconds
    #[arg(
        long = "poll-interval",
        value_name = "SECONDS",
        help = "Poll interval of the directory watcher in seconds"
    )]
    pub poll_interval: Option<u64>,

    /// CSV pattern variant of the input files
    #[arg(
        long = "pattern",
        value_enum,
        value_name = "VARIANT",
        help = "CSV pattern variant of the input files"
    )]
    pub pattern: Option<PatternArg>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the translate command (one-shot file validation)
#[derive(Debug, Clone, Parser)]
pub struct TranslateArgs {
    /// CSV file to validate
    #[arg(value_name = "FILE", help = "CSV file to validate")]
    pub file: PathBuf,

    /// CSV pattern variant of the file
    #[arg(
        long = "pattern",
        value_enum,
        value_name = "VARIANT",
        help = "CSV pattern variant of the file"
    )]
    pub pattern: Option<PatternArg>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl WatchArgs {
    /// Validate the watch command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        for (name, dir) in [
            ("Input", &self.input_dir),
            ("Output", &self.output_dir),
            ("Error", &self.error_dir),
        ] {
            if let Some(path) = dir {
                if !path.exists() {
                    return Err(Error::configuration(format!(
                        "{} directory does not exist: {}",
                        name,
                        path.display()
                    )));
                }
                if !path.is_dir() {
                    return Err(Error::configuration(format!(
                        "{} path is not a directory: {}",
                        name,
                        path.display()
                    )));
                }
            }
        }

        if self.poll_interval == Some(0) {
            return Err(Error::configuration(
                "Poll interval must be greater than 0 seconds".to_string(),
            ));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}

impl TranslateArgs {
    /// Validate the translate command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.file.exists() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.file.display()
            )));
        }
        if !self.file.is_file() {
            return Err(Error::configuration(format!(
                "Input path is not a file: {}",
                self.file.display()
            )));
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

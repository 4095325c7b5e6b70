//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading and the default external
//! collaborators used when no real transport is wired in.

use crate::app::models::{AckStatus, DeliveryReceipt, Destination, MessageRecord, VesselPayload};
use crate::app::ports::{DeliveryService, MessageHistory};
use crate::cli::args::WatchArgs;
use crate::config::Config;
use crate::Result;
use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

/// Set up structured logging to stderr
pub fn setup_logging(log_level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vessel_adaptor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (file -> args)
pub fn load_configuration(args: &WatchArgs) -> Result<Config> {
    info!("Loading configuration");

    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    let mut config = match config_file {
        Some(path) => {
            info!("Using config file: {}", path.display());
            Config::load(path)?
        }
        None => {
            info!("No config file found, using defaults");
            Config::default()
        }
    };

    apply_cli_overrides(&mut config, args);

    Ok(config)
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut Config, args: &WatchArgs) {
    if let Some(input_dir) = &args.input_dir {
        config.input_dir = input_dir.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(error_dir) = &args.error_dir {
        config.error_dir = error_dir.clone();
    }
    if let Some(poll_interval) = args.poll_interval {
        config.poll_interval_secs = poll_interval;
    }
    if let Some(pattern) = args.pattern {
        config.pattern = pattern.to_variant();
    }
}

/// Message history with no messages
///
/// Stand-in used when no history store is wired in: every lookup misses, so
/// the resolver falls back to generating fresh context ids.
pub struct EmptyHistory;

#[async_trait]
impl MessageHistory for EmptyHistory {
    async fn lookup_message_by_id(&self, _id: &str) -> Result<Option<MessageRecord>> {
        Ok(None)
    }
}

/// Delivery channel that logs each batch and acknowledges it
///
/// Stand-in transport used until a real delivery channel is wired in;
/// useful for exercising the full pipeline against the filesystem.
pub struct LoggingDelivery;

#[async_trait]
impl DeliveryService for LoggingDelivery {
    async fn deliver(
        &self,
        payload: &VesselPayload,
        context_id: &str,
        destination: &Destination,
    ) -> Result<DeliveryReceipt> {
        let message_id = Uuid::new_v4().to_string();
        info!(
            "Delivering {} vessels under context '{}' to {:?} as message '{}'",
            payload.vessel_count(),
            context_id,
            destination,
            message_id
        );

        Ok(DeliveryReceipt {
            message_id,
            context_id: context_id.to_string(),
            ack_status: AckStatus::Success,
            ack_detail: "Accepted by logging transport".to_string(),
        })
    }
}

//! Watch command implementation
//!
//! Runs the polling daemon: loads configuration, wires the pipeline and
//! watches the input directory until cancelled.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::shared::{load_configuration, setup_logging, EmptyHistory, LoggingDelivery};
use crate::app::services::file_processor::FileProcessor;
use crate::app::services::watcher::DirectoryWatcher;
use crate::cli::args::WatchArgs;
use crate::Result;

/// Watch command runner
///
/// 1. Set up logging and configuration
/// 2. Validate the directory layout
/// 3. Wire the translator, resolver and delivery into a file processor
/// 4. Poll the input directory until the cancellation token fires
pub async fn run_watch(args: WatchArgs, cancel: CancellationToken) -> Result<()> {
    setup_logging(args.get_log_level())?;

    info!("Starting vessel adaptor");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(&args)?;
    config.validate()?;
    debug!("Loaded configuration: {:?}", config);

    // Stand-in collaborators; a deployment embeds this crate and supplies
    // its own history store and transport through the same traits.
    let processor = FileProcessor::new(&config, Arc::new(EmptyHistory), Arc::new(LoggingDelivery));

    let mut watcher = DirectoryWatcher::new(&config, processor);
    watcher.run(cancel).await?;

    info!("Vessel adaptor stopped");
    Ok(())
}

//! Command implementations for the vessel adaptor CLI
//!
//! Each command is implemented in its own module:
//! - `watch`: the polling daemon over the input directory
//! - `translate`: one-shot validation of a single CSV file
//! - `shared`: logging setup, configuration loading and default collaborators

pub mod shared;
pub mod translate;
pub mod watch;

use crate::cli::args::{Args, Commands};
use crate::Result;
use tokio_util::sync::CancellationToken;

/// Main command runner for the vessel adaptor
///
/// Dispatches to the appropriate subcommand handler based on CLI args. The
/// cancellation token is triggered on ctrl-c so the watcher can finish its
/// in-flight file before returning.
pub async fn run(args: Args, cancel: CancellationToken) -> Result<()> {
    match args.get_command() {
        Commands::Watch(watch_args) => watch::run_watch(watch_args, cancel).await,
        Commands::Translate(translate_args) => translate::run_translate(translate_args).await,
    }
}

use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;
use vessel_adaptor::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Cancellation token for coordinating graceful shutdown: on ctrl-c
        // the watcher finishes its in-flight file and returns instead of
        // being torn down mid-move
        let cancellation_token = CancellationToken::new();

        let shutdown_token = cancellation_token.clone();
        tokio::spawn(async move {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");

            eprintln!("\nReceived CTRL+C, shutting down gracefully...");
            shutdown_token.cancel();
        });

        commands::run(args, cancellation_token).await
    });

    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Vessel Adaptor - Legacy Position Report Forwarder");
    println!("=================================================");
    println!();
    println!("Watch a directory for legacy vessel position CSV files, translate them");
    println!("into grouped outbound messages and write delivery acknowledgments back");
    println!("as audit output.");
    println!();
    println!("USAGE:");
    println!("    vessel-adaptor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    watch        Watch the input directory and process incoming files");
    println!("    translate    Validate a single CSV file without delivering anything");
    println!("    help         Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Watch with directories from the config file:");
    println!("    vessel-adaptor watch --config /etc/vessel-adaptor/config.toml");
    println!();
    println!("    # Watch explicit directories, polling every 10 seconds:");
    println!("    vessel-adaptor watch --input ./in --output ./out --error ./err \\");
    println!("                         --poll-interval 10");
    println!();
    println!("    # Check a feed file by hand:");
    println!("    vessel-adaptor translate positions.csv --pattern with-recipient");
    println!();
    println!("For detailed help on any command, use:");
    println!("    vessel-adaptor <COMMAND> --help");
}

use harlens_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, logging to stderr: {err:#}");
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("harlens error: {:#}", err);
        std::process::exit(1);
    }
}

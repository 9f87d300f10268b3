use urlq_core::logging;

mod cli;

use crate::cli::{error_kind, CliCommand};

fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("log file unavailable, logging to stderr: {:#}", err);
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args() {
        match error_kind(&err) {
            Some(kind) => eprintln!("urlq error [{}]: {:#}", kind, err),
            None => eprintln!("urlq error: {:#}", err),
        }
        std::process::exit(1);
    }
}

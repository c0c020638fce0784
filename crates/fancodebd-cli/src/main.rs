use fancodebd_core::logging;

mod cli;

use crate::cli::{Cli, Outcome};

fn main() {
    // Initialize logging as early as possible; fall back to stderr if the
    // state dir is unusable.
    let logging_to_file = logging::init_logging().is_ok();
    if !logging_to_file {
        logging::init_logging_stderr();
    }

    // Failures are reported, not turned into a non-zero exit status.
    match Cli::run_from_args() {
        Outcome::Done(line) => {
            tracing::info!("{}", line);
            println!("{}", line);
        }
        Outcome::Failed(line) => {
            // On the stderr fallback the eprintln below is the only copy.
            if logging_to_file {
                tracing::error!("{}", line);
            }
            eprintln!("{}", line);
        }
    }
}

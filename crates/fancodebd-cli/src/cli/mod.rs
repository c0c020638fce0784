//! CLI for the fancodebd feed mirror.

use clap::Parser;
use fancodebd_core::{pipeline, FeedConfig, PipelineError, RunReport};
use std::path::Path;

/// Fetch the Fancode live-events feed, point stream URLs at the BD edge, and
/// save the result.
///
/// Takes no arguments; every setting is a built-in constant.
#[derive(Debug, Parser)]
#[command(name = "fancodebd", version)]
#[command(about = "Mirror the Fancode live-events feed with BD stream hosts", long_about = None)]
pub struct Cli {}

/// The single line shown to the operator at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Goes to stdout.
    Done(String),
    /// Goes to stderr.
    Failed(String),
}

impl Cli {
    pub fn run_from_args() -> Outcome {
        let _cli = Cli::parse();
        execute(&FeedConfig::default())
    }
}

/// Run the pipeline with `cfg` and turn the result into the operator line.
pub fn execute(cfg: &FeedConfig) -> Outcome {
    tracing::debug!("config: {:?}", cfg);
    outcome(pipeline::run(cfg))
}

pub fn outcome(result: Result<RunReport, PipelineError>) -> Outcome {
    match result {
        Ok(report) => Outcome::Done(success_line(&report.output_path)),
        Err(err) => Outcome::Failed(error_line(&anyhow::Error::from(err))),
    }
}

pub fn success_line(output_path: &Path) -> String {
    format!("Transformation complete. Check {}", output_path.display())
}

/// `Error: ` followed by the whole cause chain.
pub fn error_line(err: &anyhow::Error) -> String {
    format!("Error: {:#}", err)
}

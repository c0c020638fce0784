//! One run: fetch the feed, rewrite stream hosts, write the mirror file.
//!
//! Stages advance strictly forward. A failure while fetching or writing ends
//! the run in `Failed` before anything reaches the output path.

use std::fmt;
use std::path::PathBuf;

use crate::config::FeedConfig;
use crate::error::PipelineError;
use crate::fetch;
use crate::output;
use crate::rewrite::{self, RewriteSummary};

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Fetching,
    Transforming,
    Writing,
    Done,
    Failed,
}

impl Stage {
    /// Next stage on success. `Done` and `Failed` are terminal.
    pub fn advance(self) -> Stage {
        match self {
            Stage::Start => Stage::Fetching,
            Stage::Fetching => Stage::Transforming,
            Stage::Transforming => Stage::Writing,
            Stage::Writing => Stage::Done,
            Stage::Done => Stage::Done,
            Stage::Failed => Stage::Failed,
        }
    }

    /// Whether an error raised in this stage is a legal way into `Failed`.
    pub fn can_fail(self) -> bool {
        matches!(self, Stage::Fetching | Stage::Writing)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Start => "start",
            Stage::Fetching => "fetching",
            Stage::Transforming => "transforming",
            Stage::Writing => "writing",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub summary: RewriteSummary,
    pub bytes_written: u64,
}

/// Tracks the current stage and logs each transition.
struct Run {
    stage: Stage,
}

impl Run {
    fn new() -> Self {
        Run { stage: Stage::Start }
    }

    fn advance(&mut self) {
        let next = self.stage.advance();
        tracing::debug!(from = %self.stage, to = %next, "stage");
        self.stage = next;
    }

    fn fail(&mut self, err: PipelineError) -> PipelineError {
        debug_assert!(self.stage.can_fail(), "no failure path from {}", self.stage);
        tracing::debug!(stage = %self.stage, "run failed: {}", err);
        self.stage = Stage::Failed;
        err
    }
}

/// Execute one fetch → rewrite → write cycle with `cfg`.
pub fn run(cfg: &FeedConfig) -> Result<RunReport, PipelineError> {
    let mut state = Run::new();

    state.advance();
    tracing::info!(url = %cfg.source_url, "fetching feed");
    let mut doc = fetch::fetch_document(&cfg.source_url).map_err(|e| state.fail(e.into()))?;

    state.advance();
    let summary = rewrite::rewrite_matches(&mut doc, &cfg.rewrite);
    tracing::info!(
        records = summary.records,
        rewritten = summary.rewritten,
        missing = summary.missing,
        not_string = summary.not_string,
        foreign = summary.foreign,
        "rewrite applied"
    );

    state.advance();
    let bytes_written =
        output::write_document(&doc, &cfg.output_path).map_err(|e| state.fail(e.into()))?;

    state.advance();
    tracing::info!(path = %cfg.output_path.display(), bytes = bytes_written, "run complete");

    Ok(RunReport {
        output_path: cfg.output_path.clone(),
        summary,
        bytes_written,
    })
}

pub mod config;
pub mod error;
pub mod logging;

pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod rewrite;

pub use config::{FeedConfig, RewriteRule};
pub use error::{FetchError, PipelineError, WriteError};
pub use pipeline::{run, RunReport, Stage};

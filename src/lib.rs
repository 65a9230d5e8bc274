pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod feed;
pub mod output;
pub mod pipeline;

pub use error::PipelineError;
pub use pipeline::{build_end_table, run, RunOutcome, TeamEndRecord};

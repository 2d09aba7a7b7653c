pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod idempotency;
pub mod logging;
pub mod pipeline;
pub mod types;
pub mod validate;

// Layered boundaries for application and infrastructure
pub mod app;
pub mod infra;

pub use error::{MergeError, Result};
pub use pipeline::{Pipeline, PipelineResult, PipelineStats};
pub use types::{ContactRecord, MergeFields, MergeTable, OutputRow, RecipientEntry};

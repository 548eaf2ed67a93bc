// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: batch orchestration

pub mod cache;
mod orchestrator;
mod processor;
mod progress;

pub use cache::{CacheKey, ResultCache};
pub use orchestrator::{BatchAggregator, validate_inputs};
pub use processor::FileProcessor;
pub use progress::{PipelineStats, ProgressTracker};

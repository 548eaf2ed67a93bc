// file: src/pipeline/orchestrator.rs
// description: validates a batch and drives per-file analysis into the final tables
// reference: sequential and bounded-parallel fan-out with ordered fan-in

use crate::config::Config;
use crate::error::{PipelineError, Result, ValidationError};
use crate::extractor::Cancellation;
use crate::models::{BatchResult, FileFailure, FileResult, KeywordSet, PdfUpload};
use crate::pipeline::cache::ResultCache;
use crate::pipeline::processor::FileProcessor;
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use crate::utils::{OperationTimer, PerformanceMetrics};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// Checks batch preconditions and parses the raw keyword string.
///
/// Both inputs are inspected before anything is reported, so a request missing
/// files and keywords gets `NoInput` rather than whichever check ran first.
pub fn validate_inputs(
    uploads: &[PdfUpload],
    raw_keywords: &str,
) -> std::result::Result<KeywordSet, ValidationError> {
    match (uploads.is_empty(), KeywordSet::parse(raw_keywords)) {
        (true, Err(_)) => Err(ValidationError::NoInput),
        (true, Ok(_)) => Err(ValidationError::NoFiles),
        (false, Err(e)) => Err(e),
        (false, Ok(keywords)) => Ok(keywords),
    }
}

pub struct BatchAggregator {
    config: Config,
    processor: Arc<FileProcessor>,
    max_concurrent_tasks: usize,
    task_budget: Option<Duration>,
    colored: bool,
}

impl BatchAggregator {
    pub fn new(config: Config) -> Self {
        let processor = Arc::new(FileProcessor::new(config.clone()));
        Self::with_processor(config, processor)
    }

    pub fn with_cache(config: Config, cache: Arc<ResultCache>) -> Self {
        let processor = Arc::new(FileProcessor::with_cache(config.clone(), Some(cache)));
        Self::with_processor(config, processor)
    }

    fn with_processor(config: Config, processor: Arc<FileProcessor>) -> Self {
        let max_concurrent_tasks = config.pipeline.parallel_workers.max(1);
        let secs = config.extraction.timeout_secs;
        let task_budget = (secs > 0).then(|| Duration::from_secs(secs));

        Self {
            config,
            processor,
            max_concurrent_tasks,
            task_budget,
            colored: true,
        }
    }

    /// Overrides the per-file wall-clock budget used by
    /// [`BatchAggregator::run_parallel`]. `None` waits indefinitely.
    pub fn with_task_budget(mut self, budget: Option<Duration>) -> Self {
        self.task_budget = budget;
        self
    }

    pub fn with_color(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Analyzes files one after another in input order.
    pub fn run(&self, uploads: &[PdfUpload], keywords: &KeywordSet) -> Result<BatchResult> {
        ensure_files(uploads)?;

        info!(
            "Analyzing {} files for {} keywords",
            uploads.len(),
            keywords.len()
        );
        let timer = OperationTimer::new("batch analysis");
        let progress = self.progress(uploads.len());

        let mut batch = BatchResult::new(keywords.clone());
        for upload in uploads {
            progress.set_message(format!("Analyzing {}", upload.filename));
            let outcome = self.processor.process(upload, keywords);
            track(&progress, upload, &outcome);
            collect(&mut batch, upload, outcome);
        }

        self.finish(timer, &progress, &batch);
        Ok(batch)
    }

    /// Analyzes files on a bounded pool of blocking workers. Every file gets
    /// its own wall-clock budget, and results are reassembled in input order
    /// so the tables match those produced by [`BatchAggregator::run`].
    pub async fn run_parallel(
        &self,
        uploads: &[PdfUpload],
        keywords: &KeywordSet,
    ) -> Result<BatchResult> {
        ensure_files(uploads)?;

        info!(
            "Analyzing {} files for {} keywords with {} concurrent tasks",
            uploads.len(),
            keywords.len(),
            self.max_concurrent_tasks
        );
        let timer = OperationTimer::new("batch analysis");
        let progress = Arc::new(self.progress(uploads.len()));
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_tasks));
        let shared_keywords = Arc::new(keywords.clone());
        let budget = self.task_budget;

        let tasks = uploads.iter().cloned().map(|upload| {
            let semaphore = semaphore.clone();
            let processor = self.processor.clone();
            let keywords = shared_keywords.clone();
            let progress = progress.clone();

            async move {
                let permit = semaphore.acquire_owned().await.ok();
                let cancel = Cancellation::new();

                // The permit is released when the blocking work ends, even if
                // nobody is waiting for its result any more.
                let handle = tokio::task::spawn_blocking({
                    let upload = upload.clone();
                    let cancel = cancel.clone();
                    move || {
                        let _permit = permit;
                        processor.process_cancellable(&upload, &keywords, &cancel)
                    }
                });

                let outcome = match budget {
                    Some(limit) => match tokio::time::timeout(limit, handle).await {
                        Ok(joined) => flatten(joined, &upload.filename),
                        Err(_) => {
                            cancel.cancel();
                            Err(PipelineError::timeout(
                                &upload.filename,
                                format!("no result after {}s", limit.as_secs()),
                            ))
                        }
                    },
                    None => flatten(handle.await, &upload.filename),
                };

                track(&progress, &upload, &outcome);
                (upload, outcome)
            }
        });

        let outcomes: Vec<(PdfUpload, Result<FileResult>)> = stream::iter(tasks)
            .buffered(self.max_concurrent_tasks)
            .collect()
            .await;

        let mut batch = BatchResult::new(keywords.clone());
        for (upload, outcome) in outcomes {
            collect(&mut batch, &upload, outcome);
        }

        self.finish(timer, &progress, &batch);
        Ok(batch)
    }

    fn progress(&self, total: usize) -> ProgressTracker {
        if self.config.pipeline.show_progress {
            ProgressTracker::with_color(total, self.colored)
        } else {
            ProgressTracker::hidden(total)
        }
    }

    fn finish(&self, timer: OperationTimer, progress: &ProgressTracker, batch: &BatchResult) {
        progress.finish();
        let stats = progress.get_stats();
        let elapsed = timer.finish();

        self.log_final_stats(&stats);
        PerformanceMetrics::new(
            "batch analysis",
            stats.files_analyzed + stats.files_failed,
            elapsed,
        )
        .log();

        if batch.is_partial() {
            warn!(
                "{} of {} files could not be analyzed",
                batch.failures.len(),
                batch.failures.len() + batch.files_succeeded()
            );
        }
    }

    fn log_final_stats(&self, stats: &PipelineStats) {
        info!("=== Batch Analysis Summary ===");
        info!("Duration: {} seconds", stats.duration_secs);
        info!("Files analyzed: {}", stats.files_analyzed);
        info!("Files failed: {}", stats.files_failed);
        info!("Success rate: {:.2}%", stats.success_rate());
        info!("Pages processed: {}", stats.pages_processed);
        info!("Matching paragraphs: {}", stats.matches_found);
        info!(
            "Throughput: {:.2} MB/sec",
            stats.bytes_per_second() / 1_048_576.0
        );
        info!("==============================");
    }
}

fn ensure_files(uploads: &[PdfUpload]) -> Result<()> {
    if uploads.is_empty() {
        return Err(ValidationError::NoFiles.into());
    }
    Ok(())
}

fn flatten(
    joined: std::result::Result<Result<FileResult>, tokio::task::JoinError>,
    filename: &str,
) -> Result<FileResult> {
    match joined {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Analysis task for {} panicked: {}", filename, e);
            Err(PipelineError::decode(filename, format!("analysis task failed: {}", e)))
        }
    }
}

fn track(progress: &ProgressTracker, upload: &PdfUpload, outcome: &Result<FileResult>) {
    match outcome {
        Ok(result) => {
            progress.add_pages(result.page_count);
            progress.add_matches(result.matches.len());
            progress.add_bytes_processed(upload.size());
            progress.inc_files_analyzed();
        }
        Err(e) => {
            warn!("Failed to analyze {}: {}", upload.filename, e);
            progress.inc_files_failed();
        }
    }
}

fn collect(batch: &mut BatchResult, upload: &PdfUpload, outcome: Result<FileResult>) {
    match outcome {
        Ok(result) => batch.push_file(result),
        Err(e) => batch.push_failure(FileFailure::from_error(&upload.filename, &e)),
    }
}

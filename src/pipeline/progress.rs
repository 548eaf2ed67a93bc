// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for batch analysis
// reference: uses indicatif for progress bars and tracks processing metrics

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    pub files_analyzed: usize,
    pub files_failed: usize,
    pub pages_processed: usize,
    pub matches_found: usize,
    pub total_bytes_processed: u64,
    pub duration_secs: u64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files_per_second(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.files_analyzed as f64 / self.duration_secs as f64
    }

    pub fn bytes_per_second(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.total_bytes_processed as f64 / self.duration_secs as f64
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.files_analyzed + self.files_failed;
        if total == 0 {
            return 0.0;
        }
        (self.files_analyzed as f64 / total as f64) * 100.0
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    files_analyzed: Arc<AtomicUsize>,
    files_failed: Arc<AtomicUsize>,
    pages_processed: Arc<AtomicUsize>,
    matches_found: Arc<AtomicUsize>,
    bytes_processed: Arc<AtomicU64>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn with_color(total_files: usize, colored: bool) -> Self {
        Self::build(MultiProgress::new(), total_files, colored)
    }

    /// Counts without drawing anything, for library callers and tests.
    pub fn hidden(total_files: usize) -> Self {
        Self::build(
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            total_files,
            false,
        )
    }

    fn build(multi_progress: MultiProgress, total_files: usize, colored: bool) -> Self {
        let main_bar = create_progress_bar(&multi_progress, total_files as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            files_analyzed: Arc::new(AtomicUsize::new(0)),
            files_failed: Arc::new(AtomicUsize::new(0)),
            pages_processed: Arc::new(AtomicUsize::new(0)),
            matches_found: Arc::new(AtomicUsize::new(0)),
            bytes_processed: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_files_analyzed(&self) {
        self.files_analyzed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_files_failed(&self) {
        self.files_failed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn add_pages(&self, pages: usize) {
        self.pages_processed.fetch_add(pages, Ordering::SeqCst);
    }

    pub fn add_matches(&self, matches: usize) {
        self.matches_found.fetch_add(matches, Ordering::SeqCst);
    }

    pub fn add_bytes_processed(&self, bytes: u64) {
        self.bytes_processed.fetch_add(bytes, Ordering::SeqCst);
    }

    pub fn set_message(&self, message: String) {
        self.main_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Analysis complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> PipelineStats {
        let duration = self.start_time.elapsed().as_secs();

        PipelineStats {
            files_analyzed: self.files_analyzed.load(Ordering::SeqCst),
            files_failed: self.files_failed.load(Ordering::SeqCst),
            pages_processed: self.pages_processed.load(Ordering::SeqCst),
            matches_found: self.matches_found.load(Ordering::SeqCst),
            total_bytes_processed: self.bytes_processed.load(Ordering::SeqCst),
            duration_secs: duration,
        }
    }

    fn update_detail_bar(&self) {
        let pages = self.pages_processed.load(Ordering::SeqCst);
        let matches = self.matches_found.load(Ordering::SeqCst);
        let failed = self.files_failed.load(Ordering::SeqCst);

        let message = format!(
            "Pages: {} | Paragraph matches: {} | Failed: {}",
            pages, matches, failed
        );

        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    let style = if colored {
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
            )
            .map(|style| style.progress_chars("█▓▒░"))
    } else {
        ProgressStyle::default_bar()
            .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}")
            .map(|style| style.progress_chars("=>-"))
    };
    bar.set_style(style.unwrap_or_else(|_| ProgressStyle::default_bar()));
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_stats_calculations() {
        let mut stats = PipelineStats::new();
        stats.files_analyzed = 100;
        stats.files_failed = 10;
        stats.duration_secs = 10;
        stats.total_bytes_processed = 1000;

        assert_eq!(stats.files_per_second(), 10.0);
        assert_eq!(stats.bytes_per_second(), 100.0);
        assert!((stats.success_rate() - 90.909).abs() < 0.01);
    }

    #[test]
    fn test_pipeline_stats_zero_duration() {
        let stats = PipelineStats::new();
        assert_eq!(stats.files_per_second(), 0.0);
        assert_eq!(stats.bytes_per_second(), 0.0);
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_progress_tracker_increment() {
        let tracker = ProgressTracker::hidden(10);

        tracker.inc_files_analyzed();
        tracker.add_pages(12);
        tracker.add_matches(3);
        tracker.add_bytes_processed(1024);

        let stats = tracker.get_stats();
        assert_eq!(stats.files_analyzed, 1);
        assert_eq!(stats.pages_processed, 12);
        assert_eq!(stats.matches_found, 3);
        assert_eq!(stats.total_bytes_processed, 1024);
    }

    #[test]
    fn test_progress_tracker_failures() {
        let tracker = ProgressTracker::hidden(10);

        tracker.inc_files_failed();
        tracker.inc_files_failed();

        let stats = tracker.get_stats();
        assert_eq!(stats.files_failed, 2);
        assert_eq!(stats.files_analyzed, 0);
    }

    #[test]
    fn test_plain_tracker_counts_like_hidden() {
        let tracker = ProgressTracker::with_color(2, false);

        tracker.inc_files_analyzed();
        tracker.inc_files_failed();
        tracker.finish();

        let stats = tracker.get_stats();
        assert_eq!(stats.files_analyzed, 1);
        assert_eq!(stats.files_failed, 1);
        assert_eq!(stats.success_rate(), 50.0);
    }
}

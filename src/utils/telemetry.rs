// file: src/utils/telemetry.rs
// description: timing and throughput helpers for per-file and batch analysis
// reference: wall-clock measurement reported through tracing

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Operation timer for performance tracking
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        debug!("Starting operation: {}", operation);
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        debug!(
            "Completed operation: {} in {:.2}s",
            self.operation,
            elapsed.as_secs_f64()
        );
        elapsed
    }

    /// Finishes and reports `count` as pages, files or whatever unit the
    /// operation iterated over.
    pub fn finish_with_count(self, count: usize) -> Duration {
        let elapsed = self.elapsed();
        debug!(
            "Completed operation: {} - {} items in {:.2}s ({:.2} items/sec)",
            self.operation,
            count,
            elapsed.as_secs_f64(),
            if elapsed.as_secs_f64() > 0.0 {
                count as f64 / elapsed.as_secs_f64()
            } else {
                0.0
            }
        );
        elapsed
    }

    pub fn warn_if_slow(&self, threshold: Duration, message: &str) {
        let elapsed = self.elapsed();
        if elapsed > threshold {
            warn!(
                "Slow operation [{}]: {} took {:.2}s (threshold: {:.2}s)",
                self.operation,
                message,
                elapsed.as_secs_f64(),
                threshold.as_secs_f64()
            );
        }
    }
}

/// Performance metrics for operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub operation: String,
    pub count: usize,
    pub duration_ms: u64,
    pub throughput: f64, // files per second
    pub avg_item_time_ms: f64,
}

impl PerformanceMetrics {
    pub fn new(operation: &str, count: usize, duration: Duration) -> Self {
        let duration_ms = duration.as_millis() as u64;
        let duration_secs = duration.as_secs_f64();

        let throughput = if duration_secs > 0.0 {
            count as f64 / duration_secs
        } else {
            0.0
        };

        let avg_item_time_ms = if count > 0 {
            duration_ms as f64 / count as f64
        } else {
            0.0
        };

        Self {
            operation: operation.to_string(),
            count,
            duration_ms,
            throughput,
            avg_item_time_ms,
        }
    }

    pub fn format(&self) -> String {
        format!(
            "{}: {} files in {}ms ({:.2} files/sec, {:.2}ms per file)",
            self.operation, self.count, self.duration_ms, self.throughput, self.avg_item_time_ms
        )
    }

    pub fn log(&self) {
        info!("{}", self.format());
    }
}

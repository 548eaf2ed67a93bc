// file: src/pipeline/processor.rs
// description: runs page extraction and paragraph matching over one pdf
// reference: extracts pages, matches paragraphs, and sums per-page tallies

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::extractor::{Cancellation, PageTextExtractor, ParagraphMatcher};
use crate::models::{FileResult, KeywordSet, KeywordTally, PdfUpload};
use crate::pipeline::cache::{CacheKey, ResultCache};
use crate::utils::{OperationTimer, Validator};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const SLOW_FILE_THRESHOLD: Duration = Duration::from_secs(60);

pub struct FileProcessor {
    config: Config,
    extractor: PageTextExtractor,
    cache: Option<Arc<ResultCache>>,
    settings: String,
}

impl FileProcessor {
    pub fn new(config: Config) -> Self {
        let cache = if config.pipeline.enable_cache {
            Some(Arc::new(ResultCache::new()))
        } else {
            None
        };

        Self::with_cache(config, cache)
    }

    pub fn with_cache(config: Config, cache: Option<Arc<ResultCache>>) -> Self {
        Self {
            extractor: PageTextExtractor::new(config.extraction.clone()),
            settings: settings_fingerprint(&config),
            config,
            cache,
        }
    }

    pub fn cache(&self) -> Option<&Arc<ResultCache>> {
        self.cache.as_ref()
    }

    pub fn process(&self, upload: &PdfUpload, keywords: &KeywordSet) -> Result<FileResult> {
        self.process_cancellable(upload, keywords, &Cancellation::new())
    }

    /// Same as `process`, but extraction stops at the next page boundary once
    /// `cancel` is set.
    pub fn process_cancellable(
        &self,
        upload: &PdfUpload,
        keywords: &KeywordSet,
        cancel: &Cancellation,
    ) -> Result<FileResult> {
        Validator::validate_content_not_empty(&upload.filename, &upload.bytes)
            .map_err(|_| PipelineError::decode(&upload.filename, "file is empty"))?;

        let max_bytes = (self.config.pipeline.max_file_size_mb as u64) * 1_048_576;
        if max_bytes > 0 && upload.size() > max_bytes {
            warn!(
                "File too large ({} bytes), skipping: {}",
                upload.size(),
                upload.filename
            );
            return Err(PipelineError::timeout(
                &upload.filename,
                format!(
                    "file is {} bytes, limit is {} MB",
                    upload.size(),
                    self.config.pipeline.max_file_size_mb
                ),
            ));
        }

        let cache_key = self
            .cache
            .as_ref()
            .map(|_| CacheKey::new(upload, keywords, &self.settings));
        if let (Some(cache), Some(key)) = (&self.cache, &cache_key)
            && let Some(cached) = cache.get(key)
        {
            return Ok(cached);
        }

        let result = self.analyze(upload, keywords, cancel)?;

        if let (Some(cache), Some(key)) = (&self.cache, cache_key) {
            cache.insert(key, result.clone());
        }

        Ok(result)
    }

    fn analyze(
        &self,
        upload: &PdfUpload,
        keywords: &KeywordSet,
        cancel: &Cancellation,
    ) -> Result<FileResult> {
        let timer = OperationTimer::new(&format!("analyze {}", upload.filename));

        let pages = self
            .extractor
            .extract_cancellable(&upload.filename, &upload.bytes, cancel)?;
        let matcher = ParagraphMatcher::new(keywords, &self.config.matching);

        let mut matches = Vec::new();
        let mut tally = KeywordTally::zeroed(keywords);

        for page in &pages {
            let page_matches = matcher.match_page(&upload.filename, page);
            matches.extend(page_matches.records);
            tally.merge(&page_matches.tally);
        }

        debug!(
            "{}: {} pages, {} matching paragraphs, {} keyword hits",
            upload.filename,
            pages.len(),
            matches.len(),
            tally.total()
        );

        timer.warn_if_slow(SLOW_FILE_THRESHOLD, &upload.filename);
        let elapsed = timer.finish_with_count(pages.len());
        info!(
            "{} analyzed successfully in {:.1} seconds",
            upload.filename,
            elapsed.as_secs_f64()
        );

        Ok(FileResult {
            filename: upload.filename.clone(),
            matches,
            tally,
            page_count: pages.len(),
            elapsed,
        })
    }
}

// Everything besides content, name and keywords that shapes a FileResult
fn settings_fingerprint(config: &Config) -> String {
    serde_json::to_string(&(&config.extraction, &config.matching)).unwrap_or_default()
}

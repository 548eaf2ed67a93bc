// file: src/pipeline/cache.rs
// description: memoizes per-file results keyed by content, filename, keywords and settings
// reference: https://docs.rs/sha2

use crate::models::{FileResult, KeywordSet, PdfUpload};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    content_hash: String,
    filename: String,
    keywords: String,
    settings: String,
}

impl CacheKey {
    /// `settings` fingerprints every option that changes a `FileResult`, so
    /// processors with different configs can share one cache.
    pub fn new(upload: &PdfUpload, keywords: &KeywordSet, settings: &str) -> Self {
        Self {
            content_hash: upload.content_hash(),
            filename: upload.filename.clone(),
            keywords: keywords.fingerprint(),
            settings: settings.to_string(),
        }
    }
}

/// Results are pure functions of their key, so a hit is always safe to reuse.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: Mutex<HashMap<CacheKey, FileResult>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<FileResult> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(key) {
            Some(result) => {
                self.hits.fetch_add(1, Ordering::SeqCst);
                debug!("Cache hit for {}", key.filename);
                Some(result.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::SeqCst);
                None
            }
        }
    }

    pub fn insert(&self, key: CacheKey, result: FileResult) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, result);
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::SeqCst)
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

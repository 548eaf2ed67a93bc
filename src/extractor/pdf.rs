// file: src/extractor/pdf.rs
// description: decodes pdf bytes into ordered per-page plain text
// reference: https://docs.rs/lopdf

use crate::config::ExtractionConfig;
use crate::error::{PipelineError, Result};
use crate::extractor::layout;
use crate::models::{PageText, PdfUpload};
use lopdf::{Document, ObjectId};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Shared stop signal for an extraction running on another thread, checked
/// before every page.
#[derive(Debug, Clone, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

pub struct PageTextExtractor {
    config: ExtractionConfig,
    deadline: Option<Duration>,
}

impl PageTextExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        let deadline = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));
        Self { config, deadline }
    }

    /// Replaces the wall-clock budget derived from `timeout_secs`.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn extract(&self, upload: &PdfUpload) -> Result<Vec<PageText>> {
        self.extract_bytes(&upload.filename, &upload.bytes)
    }

    /// Pages come back in document order, numbered from 1. Extraction only
    /// borrows `bytes`, so the same upload can be extracted any number of times.
    pub fn extract_bytes(&self, filename: &str, bytes: &[u8]) -> Result<Vec<PageText>> {
        self.extract_cancellable(filename, bytes, &Cancellation::new())
    }

    pub fn extract_cancellable(
        &self,
        filename: &str,
        bytes: &[u8],
        cancel: &Cancellation,
    ) -> Result<Vec<PageText>> {
        let started = Instant::now();
        let mut doc = Document::load_mem(bytes).map_err(|e| PipelineError::decode(filename, e))?;
        unlock(&mut doc, filename);

        self.extract_document(filename, &doc, started, cancel)
    }

    fn extract_document(
        &self,
        filename: &str,
        doc: &Document,
        started: Instant,
        cancel: &Cancellation,
    ) -> Result<Vec<PageText>> {
        let pages = doc.get_pages();
        if pages.len() > self.config.max_pages {
            return Err(PipelineError::timeout(
                filename,
                format!(
                    "document has {} pages, limit is {}",
                    pages.len(),
                    self.config.max_pages
                ),
            ));
        }

        debug!("Extracting {} pages from {}", pages.len(), filename);

        let mut page_texts = Vec::with_capacity(pages.len());

        for (page_num, page_id) in pages {
            if cancel.is_cancelled() {
                return Err(PipelineError::timeout(
                    filename,
                    format!("cancelled at page {}", page_num),
                ));
            }

            if let Some(deadline) = self.deadline
                && started.elapsed() >= deadline
            {
                return Err(PipelineError::timeout(
                    filename,
                    format!(
                        "stopped at page {} after {}s",
                        page_num,
                        deadline.as_secs()
                    ),
                ));
            }

            let text = self.page_text(doc, filename, page_num, page_id)?;
            page_texts.push(PageText::new(page_num, text));
        }

        Ok(page_texts)
    }

    fn page_text(
        &self,
        doc: &Document,
        filename: &str,
        page_num: u32,
        page_id: ObjectId,
    ) -> Result<String> {
        match layout::page_text(doc, page_id, &self.config.layout) {
            Ok(text) => Ok(text),
            Err(layout_err) => {
                debug!(
                    "Layout pass failed on {} page {} ({}), using plain extraction",
                    filename, page_num, layout_err
                );
                doc.extract_text(&[page_num]).map_err(|e| {
                    PipelineError::decode(filename, format!("page {}: {}", page_num, e))
                })
            }
        }
    }
}

/// Encrypted files get one attempt with the empty user password. Permission
/// flags are never consulted and extraction proceeds either way.
fn unlock(doc: &mut Document, filename: &str) {
    if !doc.is_encrypted() {
        return;
    }

    debug!("{} is encrypted, trying the empty password", filename);
    if let Err(e) = doc.decrypt("") {
        warn!(
            "Could not decrypt {} ({}), attempting extraction anyway",
            filename, e
        );
    }
}

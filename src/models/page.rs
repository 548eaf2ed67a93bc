// file: src/models/page.rs
// description: pipeline inputs (uploaded pdf bytes) and per-page extracted text
// reference: internal data structures

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// One uploaded PDF. Bytes are shared and never mutated, so any number of
/// readers can extract from the same upload.
#[derive(Debug, Clone)]
pub struct PdfUpload {
    pub filename: String,
    pub bytes: Arc<[u8]>,
}

impl PdfUpload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, naming the upload after the file name only.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(filename, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        format!("{:x}", hasher.finalize())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// 1-based position within the source file.
    pub number: u32,
    pub text: String,
}

impl PageText {
    pub fn new(number: u32, text: String) -> Self {
        Self { number, text }
    }
}
